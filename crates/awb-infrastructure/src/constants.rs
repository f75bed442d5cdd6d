//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `awb_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "awb.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "awb";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "AWB";

/// Separator between nested keys in environment variables (`AWB_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "AWB_LOG";

/// Log file stem used when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "awb";

// ============================================================================
// ADVISOR CONSTANTS
// ============================================================================

/// Default chat-completions endpoint base
pub const DEFAULT_ADVISOR_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name
pub const DEFAULT_ADVISOR_MODEL: &str = "gpt-4o-mini";

/// Default advisor timeout in seconds
pub const DEFAULT_ADVISOR_TIMEOUT_SECS: u64 = 20;

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

// ============================================================================
// QUERY CONSTANTS
// ============================================================================

/// Confidence below which the CLI warns that a query was mostly guessed
pub const DEFAULT_MIN_CONFIDENCE: u8 = 20;
