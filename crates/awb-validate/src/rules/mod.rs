//! Business Rule Checking
//!
//! Validation of candidate rules against a collection, the gated rule
//! registry, manifest export and rule file loading.

pub mod loader;
pub mod manifest;
pub mod registry;
pub mod validator;

pub use loader::{RuleFileFormat, RuleFileLoader, parse_rules};
pub use manifest::{generate_rule_set, generate_rule_set_at};
pub use registry::RuleRegistry;
pub use validator::{RuleCheck, validate_rule};
