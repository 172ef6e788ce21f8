//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the registry engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (defaults, TOML, environment) |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Centralized configuration constants |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig, RegistryConfig};
pub use error_ext::ErrorContext;
pub use logging::{init_logging, parse_log_level};
