//! # Allocation Workbench Infrastructure
//!
//! Cross-cutting technical concerns around the pure core:
//!
//! - `config` - figment-based configuration loading and validation
//! - `logging` - tracing subscriber initialisation
//! - `advisor` - `RuleAdvisor` adapters (hosted chat model, null)
//! - `drafting` - advisor calls under a timeout, gated by the rule validator
//! - `latest` - version-tagged validation that drops stale results
//! - `snapshot_file` - snapshot JSON documents on disk
//! - `error_ext` - context helpers for foreign errors

pub mod advisor;
pub mod config;
pub mod constants;
pub mod drafting;
pub mod error_ext;
pub mod latest;
pub mod logging;
pub mod snapshot_file;

pub use advisor::{HttpRuleAdvisor, NullRuleAdvisor, advisor_from_config};
pub use config::{AppConfig, ConfigLoader};
pub use drafting::{DraftOutcome, RuleDraftingService};
pub use latest::{LatestValidation, SnapshotVersion};
pub use logging::init_logging;
pub use snapshot_file::{load_snapshot, write_snapshot};
