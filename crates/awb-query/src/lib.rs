//! # Allocation Workbench Query
//!
//! Heuristic free-text queries over a snapshot.
//!
//! Parsing runs three additive passes: entity-word detection, an ordered
//! list of phrase templates producing field filters, and residual keyword
//! extraction. The result carries a confidence score instead of failing on
//! text it does not understand.
//!
//! ## Example
//!
//! ```rust
//! use awb_domain::Snapshot;
//! use awb_query::{QueryExecutor, QueryParser};
//!
//! let snapshot: Snapshot = serde_json::from_str(
//!     r#"{
//!         "workers": [
//!             {"WorkerID": "W1", "Skills": "JavaScript, SQL", "MaxLoadPerPhase": 2},
//!             {"WorkerID": "W2", "Skills": ["Python"], "MaxLoadPerPhase": 4}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let query = QueryParser::new().parse("Overloaded workers");
//! let result = QueryExecutor::new().execute(&query, &snapshot);
//! assert_eq!(result.workers.len(), 1);
//! assert_eq!(result.workers[0].row_index, 1);
//! ```

pub mod constants;
pub mod executor;
pub mod keywords;
pub mod parser;
pub mod suggestions;
pub mod templates;

pub use executor::{Matched, QueryExecutor, QueryResult};
pub use keywords::extract_keywords;
pub use parser::QueryParser;
pub use suggestions::generate_suggestions;
pub use templates::{QueryTemplate, RegexTemplate, standard_templates};

use awb_domain::ParsedQuery;

/// Parse free text with the standard templates
pub fn parse(text: &str) -> ParsedQuery {
    QueryParser::new().parse(text)
}
