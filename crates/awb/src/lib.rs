//! # Allocation Workbench
//!
//! Certifies that a clients/workers/tasks snapshot is internally
//! consistent, checks business rules before they are accepted, and answers
//! free-text queries over the data.
//!
//! This crate is the public facade: it re-exports the layer crates and
//! hosts the command implementations behind the `awb` binary.
//!
//! ## Example
//!
//! ```rust
//! use awb::{QueryParser, Snapshot, validate};
//!
//! let snapshot: Snapshot = serde_json::from_str(
//!     r#"{"clients": [{"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 7,
//!                      "RequestedTaskIDs": "", "GroupTag": "A"}]}"#,
//! )
//! .unwrap();
//!
//! let result = validate(&snapshot);
//! assert_eq!(result.errors.len(), 1);
//! assert!(result.errors[0].auto_fixable);
//!
//! let query = QueryParser::new().parse("High priority clients");
//! assert_eq!(query.filters.len(), 1);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - entities, rule model, query types, ports, errors
//! - `validation` - data checks, auto-fixes, reports, rule validator and registry
//! - `query` - free-text parser, suggestions and filter execution
//! - `infrastructure` - configuration, logging, snapshot files, rule advisor

/// Domain layer - entities, rules, queries and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use awb_domain::*;
}

/// Validation layer - data checks and the rule gate
///
/// Re-exports from the validation crate for convenience
pub mod validation {
    pub use awb_validate::*;
}

/// Query layer - parsing, suggestions and execution
///
/// Re-exports from the query crate for convenience
pub mod query {
    pub use awb_query::*;
}

/// Infrastructure layer - config, logging, files and the advisor
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use awb_infrastructure::*;
}

pub mod commands;

// Re-export commonly used types at the crate root
pub use domain::*;
pub use query::{QueryExecutor, QueryParser, QueryResult, generate_suggestions};
pub use validation::{
    DataValidator, Reporter, RuleCheck, RuleRegistry, ValidationResult, generate_rule_set,
    validate, validate_rule,
};
