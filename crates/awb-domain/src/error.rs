//! Error handling types
//!
//! Operational failures only. Data-quality problems are never errors: they
//! are reported as validation issues, and rule-authoring mistakes come back
//! as rejection reasons.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Allocation Workbench
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Input document could not be decoded (YAML rule files, snapshots)
    #[error("Parse error in {origin}: {message}")]
    Parse {
        /// Where the input came from (file path or logical name)
        origin: String,
        /// Decoder message
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A rule was refused by the rule validator
    #[error("Rule '{name}' rejected: {}", reasons.join("; "))]
    RuleRejected {
        /// Name of the rejected rule
        name: String,
        /// Ordered rejection reasons
        reasons: Vec<String>,
    },

    /// Rule advisor (external language model) failure
    #[error("Advisor error: {message}")]
    Advisor {
        /// Description of the advisor failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a parse error for the given origin
    pub fn parse<O: Into<String>, S: Into<String>>(origin: O, message: S) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Rule and advisor error creation methods
impl Error {
    /// Create a rule rejection error
    pub fn rule_rejected<S: Into<String>>(name: S, reasons: Vec<String>) -> Self {
        Self::RuleRejected {
            name: name.into(),
            reasons,
        }
    }

    /// Create an advisor error
    pub fn advisor<S: Into<String>>(message: S) -> Self {
        Self::Advisor {
            message: message.into(),
            source: None,
        }
    }

    /// Create an advisor error with source
    pub fn advisor_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Advisor {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
