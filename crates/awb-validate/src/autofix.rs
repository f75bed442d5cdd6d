//! Auto-Fix Proposals
//!
//! Turns auto-fixable issues into concrete, deterministic repairs. Proposing
//! never touches the snapshot; applying a proposal returns a new snapshot.

use crate::reporter::{ValidationIssue, ValidationResult};
use awb_domain::normalize;
use awb_domain::{EntityRecord, EntityType, FieldValue, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mechanical repair attached to a violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum FixAction {
    /// Overwrite the cell
    SetValue { value: FieldValue },
    /// Drop one item from a list cell, keeping the rest
    RemoveListItem { item: String },
    /// Replace a duplicate identifier with a fresh one
    ReassignId,
}

/// A repair ready to be shown to the operator and applied on request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixProposal {
    /// Issue this proposal repairs
    pub issue_id: String,
    /// Target collection
    pub entity_type: EntityType,
    /// Target row
    pub row_index: usize,
    /// Target column
    pub field: String,
    /// Value before the fix
    pub current: Option<FieldValue>,
    /// Resolved repair; never `ReassignId`
    pub action: FixAction,
    /// One-line description for listings
    pub description: String,
}

/// Proposals for every auto-fixable issue in `result`, in issue order
///
/// Duplicate identifiers are given `{id}-{n}` with the smallest `n >= 2`
/// not already used in the collection or by an earlier proposal.
pub fn propose_fixes(snapshot: &Snapshot, result: &ValidationResult) -> Vec<FixProposal> {
    let mut used_ids: BTreeMap<EntityType, BTreeSet<String>> = EntityType::ALL
        .iter()
        .map(|entity| (*entity, ids_of(snapshot, *entity)))
        .collect();

    let proposals: Vec<FixProposal> = result
        .errors
        .iter()
        .chain(&result.warnings)
        .filter_map(|issue| propose(snapshot, issue, &mut used_ids))
        .collect();
    tracing::debug!(count = proposals.len(), "fix proposals generated");
    proposals
}

fn propose(
    snapshot: &Snapshot,
    issue: &ValidationIssue,
    used_ids: &mut BTreeMap<EntityType, BTreeSet<String>>,
) -> Option<FixProposal> {
    let action = issue.fix.clone()?;
    let row = usize::try_from(issue.row_index).ok()?;
    let current = cell(snapshot, issue.entity_type, row, &issue.field);

    let action = match action {
        FixAction::ReassignId => {
            let base = current.as_ref().and_then(normalize::text)?;
            let used = used_ids.entry(issue.entity_type).or_default();
            let fresh = (2..)
                .map(|n| format!("{base}-{n}"))
                .find(|candidate| !used.contains(candidate))?;
            used.insert(fresh.clone());
            FixAction::SetValue {
                value: FieldValue::text(fresh),
            }
        }
        other => other,
    };

    let before = current
        .as_ref()
        .map_or_else(|| "(empty)".to_string(), FieldValue::display_value);
    let description = match &action {
        FixAction::SetValue { value } => format!(
            "{} row {row}: set {} from '{before}' to '{}'",
            issue.entity_type,
            issue.field,
            value.display_value()
        ),
        FixAction::RemoveListItem { item } => format!(
            "{} row {row}: remove '{item}' from {}",
            issue.entity_type, issue.field
        ),
        FixAction::ReassignId => return None,
    };

    Some(FixProposal {
        issue_id: issue.id.clone(),
        entity_type: issue.entity_type,
        row_index: row,
        field: issue.field.clone(),
        current,
        action,
        description,
    })
}

/// New snapshot with one proposal applied; the input is left untouched
///
/// A proposal whose row no longer exists yields an unchanged copy.
pub fn apply_fix(snapshot: &Snapshot, proposal: &FixProposal) -> Snapshot {
    let mut fixed = snapshot.clone();
    let applied = match proposal.entity_type {
        EntityType::Clients => apply_to_rows(&mut fixed.clients, proposal),
        EntityType::Workers => apply_to_rows(&mut fixed.workers, proposal),
        EntityType::Tasks => apply_to_rows(&mut fixed.tasks, proposal),
    };
    if !applied {
        tracing::warn!(
            issue = %proposal.issue_id,
            row = proposal.row_index,
            "fix target row not found; snapshot unchanged"
        );
    }
    fixed
}

/// Apply proposals in order
pub fn apply_fixes(snapshot: &Snapshot, proposals: &[FixProposal]) -> Snapshot {
    proposals
        .iter()
        .fold(snapshot.clone(), |current, proposal| apply_fix(&current, proposal))
}

fn apply_to_rows<R: EntityRecord>(rows: &mut [R], proposal: &FixProposal) -> bool {
    let Some(record) = rows.get_mut(proposal.row_index) else {
        return false;
    };
    match &proposal.action {
        FixAction::SetValue { value } => record.set_field(&proposal.field, value.clone()),
        FixAction::RemoveListItem { item } => {
            let remaining = record
                .field(&proposal.field)
                .map(|value| without_item(value, item))
                .unwrap_or(FieldValue::Null);
            record.set_field(&proposal.field, remaining);
        }
        FixAction::ReassignId => return false,
    }
    true
}

/// List cell minus every occurrence of `item`, keeping native arrays native
fn without_item(value: &FieldValue, item: &str) -> FieldValue {
    match value {
        FieldValue::List(items) => FieldValue::List(
            items
                .iter()
                .filter(|existing| normalize::text(existing).as_deref() != Some(item))
                .cloned()
                .collect(),
        ),
        other => FieldValue::text(
            normalize::string_list(other)
                .into_iter()
                .filter(|existing| existing != item)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

fn cell(snapshot: &Snapshot, entity: EntityType, row: usize, field: &str) -> Option<FieldValue> {
    match entity {
        EntityType::Clients => snapshot.clients.get(row)?.field(field).cloned(),
        EntityType::Workers => snapshot.workers.get(row)?.field(field).cloned(),
        EntityType::Tasks => snapshot.tasks.get(row)?.field(field).cloned(),
    }
}

fn ids_of(snapshot: &Snapshot, entity: EntityType) -> BTreeSet<String> {
    match entity {
        EntityType::Clients => snapshot.clients.iter().filter_map(EntityRecord::id).collect(),
        EntityType::Workers => snapshot.workers.iter().filter_map(EntityRecord::id).collect(),
        EntityType::Tasks => snapshot.tasks.iter().filter_map(EntityRecord::id).collect(),
    }
}
