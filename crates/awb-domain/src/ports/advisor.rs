//! Rule Advisor Port
//!
//! Boundary to the hosted language model that drafts rules from plain text
//! and explains existing rules. Everything it returns is a suggestion: a
//! `RuleDraft` must pass the rule validator before it joins a collection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::Snapshot;
use crate::error::Result;
use crate::rules::{Rule, RuleKind};

/// Unvalidated rule proposal from an advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    /// Proposed rule name
    pub name: String,
    /// Proposed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Proposed priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Variant payload
    #[serde(flatten)]
    pub kind: RuleKind,
}

impl RuleDraft {
    /// Turn the draft into a candidate rule (still unvalidated)
    pub fn into_rule(self) -> Rule {
        let mut rule = Rule::new(self.name, self.kind);
        rule.description = self.description;
        if let Some(priority) = self.priority {
            rule.priority = priority;
        }
        rule
    }
}

/// Language-model collaborator
///
/// Implementations must be cheap to clone behind an `Arc` and safe to call
/// from any task. Callers wrap every call in a timeout.
#[async_trait]
pub trait RuleAdvisor: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Draft a rule from an operator request; `None` when nothing useful came back
    async fn draft_rule(&self, request: &str, snapshot: &Snapshot) -> Result<Option<RuleDraft>>;

    /// Explain a rule in plain English
    async fn explain_rule(&self, rule: &Rule) -> Result<Option<String>>;
}
