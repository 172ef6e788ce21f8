//! Configuration
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Serializable configuration sections |
//! | [`loader`] | Figment loader and programmatic builder |

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, LoggingConfig, RegistryConfig};
