//! Rule Registry
//!
//! Caller-owned rule collection. Every insertion and edit goes through
//! [`validate_rule`], so hand-written and advisor-drafted rules share one
//! gate.

use super::manifest::generate_rule_set;
use super::validator::{RuleCheck, validate_rule};
use awb_domain::rules::{Rule, RuleManifest};
use awb_domain::{Error, Result};
use chrono::Utc;

/// Registry holding the accepted rules, in insertion order
#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build a registry, admitting rules one by one
    ///
    /// Fails on the first rejected rule.
    pub fn from_rules<I: IntoIterator<Item = Rule>>(rules: I) -> Result<Self> {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    /// Check a candidate without admitting it
    pub fn check(&self, candidate: &Rule) -> RuleCheck {
        validate_rule(candidate, &self.rules)
    }

    /// Admit a new rule
    pub fn register(&mut self, rule: Rule) -> Result<()> {
        if self.get(&rule.id).is_some() {
            return Err(Error::invalid_argument(format!(
                "rule id '{}' is already registered",
                rule.id
            )));
        }
        self.check(&rule).into_result(&rule.name)?;
        tracing::info!(rule = %rule.name, id = %rule.id, "rule registered");
        self.rules.push(rule);
        Ok(())
    }

    /// Replace the rule with the same id, keeping its creation time
    pub fn replace(&mut self, mut rule: Rule) -> Result<()> {
        let index = self.position(&rule.id)?;
        self.check(&rule).into_result(&rule.name)?;
        rule.created_at = self.rules[index].created_at;
        rule.updated_at = Utc::now();
        self.rules[index] = rule;
        Ok(())
    }

    /// Remove a rule by id
    pub fn remove(&mut self, id: &str) -> Option<Rule> {
        let index = self.rules.iter().position(|rule| rule.id == id)?;
        Some(self.rules.remove(index))
    }

    /// Enable or disable a rule by id
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        let index = self.position(id)?;
        let rule = &mut self.rules[index];
        if rule.enabled != enabled {
            rule.enabled = enabled;
            rule.updated_at = Utc::now();
        }
        Ok(())
    }

    /// Get a rule by id
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Get all rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Export manifest of the enabled rules
    pub fn manifest(&self) -> RuleManifest {
        generate_rule_set(&self.rules)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.rules
            .iter()
            .position(|rule| rule.id == id)
            .ok_or_else(|| Error::not_found(format!("rule '{id}'")))
    }
}
