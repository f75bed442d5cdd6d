//! Configuration management
//!
//! Figment-based loading: defaults, then a TOML file, then `AWB_`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::{AdvisorConfig, AppConfig, LoggingConfig, QueryConfig, ReportConfig, ReportFormat};
