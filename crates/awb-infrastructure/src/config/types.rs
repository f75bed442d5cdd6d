//! Configuration types

use crate::constants::{
    DEFAULT_ADVISOR_BASE_URL, DEFAULT_ADVISOR_MODEL, DEFAULT_ADVISOR_TIMEOUT_SECS,
    DEFAULT_LOG_LEVEL, DEFAULT_MIN_CONFIDENCE,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging output
    pub logging: LoggingConfig,
    /// Query parser behaviour
    pub query: QueryConfig,
    /// Language-model rule advisor
    pub advisor: AdvisorConfig,
    /// Validation report rendering
    pub report: ReportConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rotated file in addition to stderr
    #[serde(skip_serializing_if = "Option::is_none")]
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

/// Query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Confidence below which a parsed query is reported as a guess
    pub min_confidence: u8,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Rule advisor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Use the hosted advisor; when off every request yields no recommendation
    pub enabled: bool,
    /// Chat-completions API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl AdvisorConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_ADVISOR_BASE_URL.to_string(),
            model: DEFAULT_ADVISOR_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_ADVISOR_TIMEOUT_SECS,
        }
    }
}

/// Output format of validation reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Sectioned plain text
    #[default]
    Human,
    /// camelCase JSON
    Json,
}

/// Report configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default output format
    pub format: ReportFormat,
    /// Treat warnings as a failing result
    pub fail_on_warnings: bool,
}
