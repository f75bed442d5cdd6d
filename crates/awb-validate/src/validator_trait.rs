//! Validator Trait
//!
//! Every check module exposes a validator implementing [`Validator`]; the
//! [`ValidatorRegistry`] runs them in registration order and concatenates
//! their violations.

use crate::violation_trait::Violation;
use crate::{
    ReferenceValidator, SchedulingValidator, StructureValidator, ValueValidator,
    WorkforceValidator,
};
use awb_domain::Snapshot;

/// A battery of related checks over one snapshot
pub trait Validator: Send + Sync {
    /// Short stable name (used in logs and for selective runs)
    fn name(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Run the checks; must not panic on malformed data
    fn validate(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>>;
}

/// Ordered collection of validators
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard battery, in report order
    pub fn standard() -> Self {
        Self::new()
            .with_validator(Box::new(StructureValidator::new()))
            .with_validator(Box::new(ValueValidator::new()))
            .with_validator(Box::new(ReferenceValidator::new()))
            .with_validator(Box::new(WorkforceValidator::new()))
            .with_validator(Box::new(SchedulingValidator::new()))
    }

    /// Append a validator
    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.register(validator);
        self
    }

    /// Names of the registered validators
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator in order
    pub fn validate_all(&self, snapshot: &Snapshot) -> Vec<Box<dyn Violation>> {
        let mut violations = Vec::new();
        for validator in &self.validators {
            let found = validator.validate(snapshot);
            tracing::debug!(
                validator = validator.name(),
                count = found.len(),
                "validator finished"
            );
            violations.extend(found);
        }
        violations
    }

    /// Run only the named validators, keeping registration order
    pub fn validate_named(&self, snapshot: &Snapshot, names: &[&str]) -> Vec<Box<dyn Violation>> {
        self.validators
            .iter()
            .filter(|v| names.contains(&v.name()))
            .flat_map(|v| v.validate(snapshot))
            .collect()
    }
}
