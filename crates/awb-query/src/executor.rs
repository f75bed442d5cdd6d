//! Query Execution
//!
//! Applies a parsed query to a snapshot. Filters are conjunctive; a filter
//! tagged with an entity type only constrains that collection. A query with
//! no filters falls back to an any-term substring match over each record's
//! values, and a query with neither filters nor terms returns the whole
//! scope.

use awb_domain::{
    Client, EntityRecord, EntityType, FieldValue, FilterOperator, ParsedQuery, QueryFilter,
    Snapshot, Task, Worker, normalize,
};
use serde::Serialize;

/// A record that satisfied the query, with its source row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Matched<R> {
    /// Zero-based row in the source collection
    pub row_index: usize,
    /// The matching record
    pub record: R,
}

/// Matching records per collection, in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub clients: Vec<Matched<Client>>,
    pub workers: Vec<Matched<Worker>>,
    pub tasks: Vec<Matched<Task>>,
}

impl QueryResult {
    /// Total number of matching records
    pub fn total(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }

    /// True when nothing matched
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Matching row indices of one collection
    pub fn rows_of(&self, entity: EntityType) -> Vec<usize> {
        match entity {
            EntityType::Clients => self.clients.iter().map(|m| m.row_index).collect(),
            EntityType::Workers => self.workers.iter().map(|m| m.row_index).collect(),
            EntityType::Tasks => self.tasks.iter().map(|m| m.row_index).collect(),
        }
    }
}

/// Runs parsed queries against snapshots
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Records of the snapshot that satisfy the query
    pub fn execute(&self, query: &ParsedQuery, snapshot: &Snapshot) -> QueryResult {
        let result = QueryResult {
            clients: select(query, &snapshot.clients),
            workers: select(query, &snapshot.workers),
            tasks: select(query, &snapshot.tasks),
        };
        tracing::debug!(
            clients = result.clients.len(),
            workers = result.workers.len(),
            tasks = result.tasks.len(),
            "query executed"
        );
        result
    }
}

fn select<R: EntityRecord + Clone>(query: &ParsedQuery, records: &[R]) -> Vec<Matched<R>> {
    if !query.entity_types.contains(&R::ENTITY) {
        return Vec::new();
    }
    let filters: Vec<&QueryFilter> = query
        .filters
        .iter()
        .filter(|f| f.entity_type.is_none_or(|e| e == R::ENTITY))
        .collect();
    let terms: Vec<String> = query.search_terms.iter().map(|t| t.to_lowercase()).collect();
    let use_terms = query.filters.is_empty() && !terms.is_empty();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.iter().all(|filter| record_matches(*record, filter)))
        .filter(|(_, record)| {
            if !use_terms {
                return true;
            }
            let haystack = record.search_text();
            terms.iter().any(|term| haystack.contains(term.as_str()))
        })
        .map(|(row_index, record)| Matched {
            row_index,
            record: record.clone(),
        })
        .collect()
}

/// Whether one record satisfies one filter; absent and null cells never match
pub fn record_matches<R: EntityRecord>(record: &R, filter: &QueryFilter) -> bool {
    match record.field(&filter.field) {
        None | Some(FieldValue::Null) => false,
        Some(value) => value_matches(value, filter.operator, &filter.value),
    }
}

/// Apply an operator to a cell value and a literal operand
pub fn value_matches(value: &FieldValue, operator: FilterOperator, operand: &FieldValue) -> bool {
    match operator {
        FilterOperator::Equals => equals(value, operand),
        FilterOperator::Contains => contains(value, operand),
        FilterOperator::Greater => compare(value, operand, |a, b| a > b),
        FilterOperator::Less => compare(value, operand, |a, b| a < b),
        FilterOperator::GreaterEqual => compare(value, operand, |a, b| a >= b),
        FilterOperator::LessEqual => compare(value, operand, |a, b| a <= b),
        FilterOperator::In => membership(value, operand),
    }
}

fn equals(value: &FieldValue, operand: &FieldValue) -> bool {
    if let (Some(a), Some(b)) = (normalize::number(value), normalize::number(operand)) {
        return a == b;
    }
    match (normalize::text(value), normalize::text(operand)) {
        (Some(a), Some(b)) => a == b,
        _ => value == operand,
    }
}

fn contains(value: &FieldValue, operand: &FieldValue) -> bool {
    let Some(needle) = normalize::text(operand).map(|s| s.to_lowercase()) else {
        return false;
    };
    match normalize::elements(value) {
        Some(items) => items
            .iter()
            .filter_map(normalize::text)
            .any(|item| item.to_lowercase().contains(&needle)),
        None => normalize::text(value).is_some_and(|text| text.to_lowercase().contains(&needle)),
    }
}

fn compare(value: &FieldValue, operand: &FieldValue, op: fn(f64, f64) -> bool) -> bool {
    match (normalize::number(value), normalize::number(operand)) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

fn membership(value: &FieldValue, operand: &FieldValue) -> bool {
    if let Some(items) = normalize::elements(value) {
        return items.iter().any(|item| equals(item, operand));
    }
    if let Some(options) = normalize::elements(operand) {
        return options.iter().any(|option| equals(value, option));
    }
    equals(value, operand)
}
