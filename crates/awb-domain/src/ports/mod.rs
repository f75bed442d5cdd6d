//! Domain Ports
//!
//! Traits for external collaborators, implemented in `awb-infrastructure`.

pub mod advisor;

pub use advisor::{RuleAdvisor, RuleDraft};
