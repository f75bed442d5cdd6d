//! Violation Trait
//!
//! Generic trait for every data-quality issue. Each check module declares its
//! own violation enum and implements this trait so the orchestrator, the
//! reporter and the auto-fixer can treat them uniformly.

use crate::autofix::FixAction;
use awb_domain::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Error or warning classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Blocks `is_valid`
    Error,
    /// Reported, never blocks
    Warning,
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Severity level for issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Category of violation for grouping in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationCategory {
    /// Required columns and identifier uniqueness
    Structure,
    /// Cell-level value checks
    Values,
    /// Cross-collection references
    References,
    /// Worker capacity and skills
    Workforce,
    /// Phase demand, co-run and phase windows
    Scheduling,
}

impl Display for ViolationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure => write!(f, "Structure"),
            Self::Values => write!(f, "Values"),
            Self::References => write!(f, "References"),
            Self::Workforce => write!(f, "Workforce"),
            Self::Scheduling => write!(f, "Scheduling"),
        }
    }
}

/// Generic violation trait - all data-quality issues implement this
pub trait Violation: Display + Send + Sync {
    /// Check code (e.g., "STR002", "SCH001")
    fn code(&self) -> &str;

    /// Category for grouping in reports
    fn category(&self) -> ViolationCategory;

    /// Error or warning
    fn kind(&self) -> IssueKind;

    /// Severity level
    fn severity(&self) -> Severity;

    /// Collection the issue belongs to
    fn entity(&self) -> EntityType;

    /// Column the issue is about
    fn field(&self) -> &str;

    /// Zero-based row; `None` for collection-wide issues
    fn row(&self) -> Option<usize>;

    /// Discriminator that keeps ids unique when one row has several issues
    /// of the same code
    fn subject(&self) -> Option<String> {
        None
    }

    /// Human-readable message describing the violation
    fn message(&self) -> String {
        self.to_string()
    }

    /// Suggested fix for the violation (if applicable)
    fn suggestion(&self) -> Option<String> {
        None
    }

    /// Mechanical repair, when one exists
    fn fix(&self) -> Option<FixAction> {
        None
    }

    /// Whether `fix` yields a repair
    fn auto_fixable(&self) -> bool {
        self.fix().is_some()
    }

    /// Stable identifier: `{code}-{entity}-{row|global}[-{subject}]`
    fn issue_id(&self) -> String {
        let row = self
            .row()
            .map_or_else(|| "global".to_string(), |row| row.to_string());
        match self.subject() {
            Some(subject) => format!("{}-{}-{}-{}", self.code(), self.entity(), row, subject),
            None => format!("{}-{}-{}", self.code(), self.entity(), row),
        }
    }

    /// Convert to a boxed trait object for dynamic dispatch
    fn boxed(self) -> Box<dyn Violation>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Extension trait for converting violations to boxed trait objects
pub trait ViolationExt {
    /// Convert to a vector of boxed violations
    fn into_boxed(self) -> Vec<Box<dyn Violation>>;
}

impl<T: Violation + 'static> ViolationExt for Vec<T> {
    fn into_boxed(self) -> Vec<Box<dyn Violation>> {
        self.into_iter()
            .map(|v| Box::new(v) as Box<dyn Violation>)
            .collect()
    }
}
