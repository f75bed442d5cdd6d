//! Validation Report Generation
//!
//! The flat, classified issue list returned by the engine and its
//! renderings:
//! - JSON for the editing front end and CI
//! - Human-readable for terminal output

use crate::autofix::FixAction;
use crate::violation_trait::{IssueKind, Severity, Violation};
use awb_domain::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One reported issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Stable identifier, e.g. `STR002-clients-1`
    pub id: String,
    /// Error or warning
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// high, medium or low
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Column the issue is about
    pub field: String,
    /// Zero-based row, `-1` for collection-wide issues
    pub row_index: i64,
    /// Collection the issue belongs to
    pub entity_type: EntityType,
    /// Suggested fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Whether `autofix::propose_fixes` can repair this issue
    #[serde(default)]
    pub auto_fixable: bool,
    /// Repair carried for the auto-fixer; not part of the wire format
    #[serde(skip)]
    pub fix: Option<FixAction>,
}

impl ValidationIssue {
    /// Flatten a violation into its reported form
    pub fn from_violation(violation: &dyn Violation) -> Self {
        let fix = violation.fix();
        Self {
            id: violation.issue_id(),
            kind: violation.kind(),
            severity: violation.severity(),
            message: violation.message(),
            field: violation.field().to_string(),
            row_index: violation.row().map_or(-1, |row| row as i64),
            entity_type: violation.entity(),
            suggestion: violation.suggestion(),
            auto_fixable: fix.is_some(),
            fix,
        }
    }
}

/// Summary of validation results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Number of error-classified issues
    pub total_errors: usize,
    /// Number of warnings
    pub total_warnings: usize,
    /// High-severity issues of either kind
    pub critical_issues: usize,
}

/// Engine output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors
    pub is_valid: bool,
    /// Error-classified issues, in check order
    pub errors: Vec<ValidationIssue>,
    /// Warnings, in check order
    pub warnings: Vec<ValidationIssue>,
    /// Totals
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// Classify issues into errors and warnings, preserving order
    pub fn from_issues<I: IntoIterator<Item = ValidationIssue>>(issues: I) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|issue| issue.kind == IssueKind::Error);
        let critical_issues = errors
            .iter()
            .chain(&warnings)
            .filter(|issue| issue.severity == Severity::High)
            .count();
        Self {
            is_valid: errors.is_empty(),
            summary: ValidationSummary {
                total_errors: errors.len(),
                total_warnings: warnings.len(),
                critical_issues,
            },
            errors,
            warnings,
        }
    }

    /// Build from violations in check order
    pub fn from_violations(violations: &[Box<dyn Violation>]) -> Self {
        Self::from_issues(
            violations
                .iter()
                .map(|violation| ValidationIssue::from_violation(violation.as_ref())),
        )
    }

    /// Errors followed by warnings
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }

    /// Result restricted to one collection
    pub fn for_entity(&self, entity: EntityType) -> Self {
        Self::from_issues(
            self.issues()
                .filter(|issue| issue.entity_type == entity)
                .cloned(),
        )
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(result: &ValidationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Generate human-readable report
    pub fn to_human_readable(result: &ValidationResult) -> String {
        let mut output = String::new();

        output.push_str("=== Data Validation Report ===\n\n");

        output.push_str("--- Summary ---\n");
        let _ = writeln!(output, "Errors:          {}", result.summary.total_errors);
        let _ = writeln!(output, "Warnings:        {}", result.summary.total_warnings);
        let _ = writeln!(output, "Critical issues: {}", result.summary.critical_issues);
        output.push('\n');

        let status = if result.is_valid { "PASSED" } else { "FAILED" };
        let _ = writeln!(output, "Status: {status}\n");

        Self::push_section(&mut output, "Errors", &result.errors);
        Self::push_section(&mut output, "Warnings", &result.warnings);

        output
    }

    fn push_section(output: &mut String, title: &str, issues: &[ValidationIssue]) {
        if issues.is_empty() {
            return;
        }
        let _ = writeln!(output, "--- {title} ---");
        for issue in issues {
            let location = if issue.row_index < 0 {
                format!("{}", issue.entity_type)
            } else {
                format!("{} row {}", issue.entity_type, issue.row_index)
            };
            let fixable = if issue.auto_fixable { " (auto-fixable)" } else { "" };
            let _ = writeln!(
                output,
                "  [{}] {location} {}: {}{fixable}",
                issue.severity, issue.field, issue.message
            );
            if let Some(suggestion) = &issue.suggestion {
                let _ = writeln!(output, "      -> {suggestion}");
            }
        }
        output.push('\n');
    }
}
