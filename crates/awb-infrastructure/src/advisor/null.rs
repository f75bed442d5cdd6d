//! Null rule advisor
//!
//! Used when the hosted advisor is disabled: every request yields no
//! recommendation.

use async_trait::async_trait;
use awb_domain::error::Result;
use awb_domain::ports::{RuleAdvisor, RuleDraft};
use awb_domain::{Rule, Snapshot};

/// Advisor that never recommends anything
///
/// # Example
///
/// ```rust
/// use awb_domain::ports::RuleAdvisor;
/// use awb_infrastructure::advisor::NullRuleAdvisor;
///
/// let advisor = NullRuleAdvisor::new();
/// assert_eq!(advisor.name(), "null");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRuleAdvisor;

impl NullRuleAdvisor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RuleAdvisor for NullRuleAdvisor {
    fn name(&self) -> &str {
        "null"
    }

    async fn draft_rule(&self, _request: &str, _snapshot: &Snapshot) -> Result<Option<RuleDraft>> {
        Ok(None)
    }

    async fn explain_rule(&self, _rule: &Rule) -> Result<Option<String>> {
        Ok(None)
    }
}
