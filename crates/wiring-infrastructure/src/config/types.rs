//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wiring_application::ResolutionPolicy;

use crate::constants::DEFAULT_LOG_LEVEL;

// ============================================================================
// Registry Configuration
// ============================================================================

/// Registry resolution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum nesting of producer invocations within one resolution;
    /// unbounded when absent
    pub max_depth: Option<usize>,
    /// Convert producer panics into resolution errors
    pub catch_panics: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            catch_panics: true,
        }
    }
}

impl From<&RegistryConfig> for ResolutionPolicy {
    fn from(config: &RegistryConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            catch_panics: config.catch_panics,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry resolution settings
    pub registry: RegistryConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Resolution policy derived from the registry section
    pub fn resolution_policy(&self) -> ResolutionPolicy {
        ResolutionPolicy::from(&self.registry)
    }
}
