//! Command implementations behind the `awb` binary
//!
//! Everything here is synchronous and returns rendered text or data; file
//! handling and process exit codes stay in `main.rs`.

use std::fmt::Write as _;

use awb_domain::{EntityRecord, ParsedQuery, Rule, Snapshot};
use awb_infrastructure::config::ReportFormat;
use awb_query::{Matched, QueryExecutor, QueryParser, QueryResult};
use awb_validate::{
    FixProposal, Reporter, RuleCheck, ValidationResult, apply_fixes, propose_fixes, validate,
    validate_rule,
};

/// Render a validation result in the requested format
pub fn render_validation(result: &ValidationResult, format: ReportFormat) -> String {
    match format {
        ReportFormat::Human => Reporter::to_human_readable(result),
        ReportFormat::Json => Reporter::to_json(result),
    }
}

/// Whether a result counts as passing
pub fn validation_passed(result: &ValidationResult, fail_on_warnings: bool) -> bool {
    result.is_valid && !(fail_on_warnings && result.summary.total_warnings > 0)
}

/// Outcome of one auto-fix pass
#[derive(Debug, Clone)]
pub struct FixReport {
    /// Fixes that were applied, in issue order
    pub proposals: Vec<FixProposal>,
    /// Snapshot after the fixes
    pub fixed: Snapshot,
    /// Validation of the fixed snapshot
    pub remaining: ValidationResult,
}

/// Validate, apply every proposed fix, and validate again
pub fn fix_snapshot(snapshot: &Snapshot) -> FixReport {
    let before = validate(snapshot);
    let proposals = propose_fixes(snapshot, &before);
    let fixed = apply_fixes(snapshot, &proposals);
    let remaining = validate(&fixed);
    tracing::info!(
        applied = proposals.len(),
        errors_before = before.summary.total_errors,
        errors_after = remaining.summary.total_errors,
        "auto-fix pass complete"
    );
    FixReport {
        proposals,
        fixed,
        remaining,
    }
}

/// Render the applied fixes, one per line
pub fn render_fixes(report: &FixReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "=== Auto-fix ===");
    if report.proposals.is_empty() {
        let _ = writeln!(output, "No fixable issues.");
    }
    for proposal in &report.proposals {
        let _ = writeln!(
            output,
            "  {} {} row {} {}: {}",
            proposal.issue_id,
            proposal.entity_type,
            proposal.row_index,
            proposal.field,
            proposal.description
        );
    }
    let _ = writeln!(
        output,
        "Remaining: {} error(s), {} warning(s)",
        report.remaining.summary.total_errors, report.remaining.summary.total_warnings
    );
    output
}

/// Parse free text and run it against the snapshot
pub fn run_query(snapshot: &Snapshot, text: &str) -> (ParsedQuery, QueryResult) {
    let query = QueryParser::new().parse(text);
    let result = QueryExecutor::new().execute(&query, snapshot);
    (query, result)
}

/// Human-readable query report
pub fn render_query(query: &ParsedQuery, result: &QueryResult, min_confidence: u8) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "=== Query: {:?} (confidence {}%) ===",
        query.original_query, query.confidence
    );
    if query.confidence < min_confidence {
        let _ = writeln!(output, "Low confidence: the interpretation below is a guess.");
    }
    let scope: Vec<String> = query.entity_types.iter().map(ToString::to_string).collect();
    let _ = writeln!(output, "Scope: {}", scope.join(", "));
    for filter in &query.filters {
        let _ = writeln!(output, "Filter: {filter}");
    }
    if !query.search_terms.is_empty() {
        let _ = writeln!(output, "Terms: {}", query.search_terms.join(", "));
    }
    render_matches(&mut output, "clients", &result.clients);
    render_matches(&mut output, "workers", &result.workers);
    render_matches(&mut output, "tasks", &result.tasks);
    let _ = writeln!(output, "Total: {}", result.total());
    output
}

fn render_matches<R: EntityRecord>(output: &mut String, label: &str, matches: &[Matched<R>]) {
    if matches.is_empty() {
        return;
    }
    let _ = writeln!(output, "\n--- {label} ({}) ---", matches.len());
    for matched in matches {
        let id = matched.record.id().unwrap_or_else(|| "-".to_string());
        let _ = writeln!(output, "  row {} {id}", matched.row_index);
    }
}

/// Check every rule of a collection against the others
pub fn check_collection(rules: &[Rule]) -> Vec<(&Rule, RuleCheck)> {
    rules
        .iter()
        .map(|rule| (rule, validate_rule(rule, rules)))
        .collect()
}

/// Render rule checks; accepted rules get one line, rejected ones list reasons
pub fn render_rule_checks(checks: &[(&Rule, RuleCheck)]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "=== Rule Check ===");
    for (rule, check) in checks {
        let status = if check.valid { "ok" } else { "rejected" };
        let _ = writeln!(
            output,
            "  [{status}] {} ({}, priority {})",
            rule.name,
            rule.kind.type_name(),
            rule.priority
        );
        for reason in &check.reasons {
            let _ = writeln!(output, "      -> {reason}");
        }
    }
    let rejected = checks.iter().filter(|(_, check)| !check.valid).count();
    let _ = writeln!(output, "Rules: {}, rejected: {rejected}", checks.len());
    output
}
