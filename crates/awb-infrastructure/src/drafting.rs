//! Rule drafting service
//!
//! Wraps a `RuleAdvisor` with a timeout and the rule gate. Advisor failures
//! of any kind (transport, timeout, unusable reply) degrade to "no
//! recommendation"; a draft that comes back is checked against the current
//! rules before the caller sees it.

use std::sync::Arc;
use std::time::Duration;

use awb_domain::ports::RuleAdvisor;
use awb_domain::{Rule, Snapshot};
use awb_validate::RuleRegistry;

/// Result of asking the advisor for a rule
#[derive(Debug, Clone, PartialEq)]
pub enum DraftOutcome {
    /// The draft passed the rule validator
    Accepted(Rule),
    /// The draft was refused; reasons in validator order
    Rejected {
        /// Candidate rule built from the draft
        rule: Rule,
        /// Why it was refused
        reasons: Vec<String>,
    },
}

impl DraftOutcome {
    /// The candidate rule, accepted or not
    pub fn rule(&self) -> &Rule {
        match self {
            Self::Accepted(rule) | Self::Rejected { rule, .. } => rule,
        }
    }

    /// True when the draft passed validation
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Advisor calls under a timeout, with every draft gated by the validator
#[derive(Clone)]
pub struct RuleDraftingService {
    advisor: Arc<dyn RuleAdvisor>,
    timeout: Duration,
}

impl RuleDraftingService {
    pub fn new(advisor: Arc<dyn RuleAdvisor>, timeout: Duration) -> Self {
        Self { advisor, timeout }
    }

    /// Ask for a rule; `None` when the advisor had nothing usable
    pub async fn draft(
        &self,
        request: &str,
        snapshot: &Snapshot,
        registry: &RuleRegistry,
    ) -> Option<DraftOutcome> {
        let call = self.advisor.draft_rule(request, snapshot);
        let draft = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(Some(draft))) => draft,
            Ok(Ok(None)) => {
                tracing::info!(advisor = self.advisor.name(), "advisor returned no draft");
                return None;
            }
            Ok(Err(e)) => {
                tracing::warn!(advisor = self.advisor.name(), error = %e, "advisor draft failed");
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    advisor = self.advisor.name(),
                    timeout = ?self.timeout,
                    "advisor draft timed out"
                );
                return None;
            }
        };

        let rule = draft.into_rule();
        let check = registry.check(&rule);
        if check.valid {
            tracing::info!(rule = %rule.name, "advisor draft accepted");
            Some(DraftOutcome::Accepted(rule))
        } else {
            tracing::info!(rule = %rule.name, reasons = check.reasons.len(), "advisor draft rejected");
            Some(DraftOutcome::Rejected {
                rule,
                reasons: check.reasons,
            })
        }
    }

    /// Plain-English explanation of a rule; `None` on any advisor failure
    pub async fn explain(&self, rule: &Rule) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.advisor.explain_rule(rule)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(advisor = self.advisor.name(), error = %e, "advisor explanation failed");
                None
            }
            Err(_) => {
                tracing::warn!(advisor = self.advisor.name(), "advisor explanation timed out");
                None
            }
        }
    }
}
