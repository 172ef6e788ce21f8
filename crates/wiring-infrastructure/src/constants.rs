//! Infrastructure layer constants
//!
//! Domain limits are defined in `wiring_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wiring.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wiring";

/// Environment variable prefix for configuration (`WIRING__REGISTRY__MAX_DEPTH`)
pub const CONFIG_ENV_PREFIX: &str = "WIRING";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable that overrides the configured log filter
pub const LOG_FILTER_ENV: &str = "WIRING_LOG";

/// File name stem for rolling log files
pub const LOG_FILE_STEM: &str = "wiring";
