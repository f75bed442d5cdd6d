//! Structured Query Types
//!
//! Output of the free-text query parser and input of the query executor.

use crate::value_objects::{EntityType, FieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Exact match
    Equals,
    /// Case-insensitive substring, per element for arrays
    Contains,
    /// Numeric `>`
    Greater,
    /// Numeric `<`
    Less,
    /// Numeric `>=`
    GreaterEqual,
    /// Numeric `<=`
    LessEqual,
    /// Array membership, equality for scalars
    In,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::Greater => "greater",
            Self::Less => "less",
            Self::GreaterEqual => "greaterEqual",
            Self::LessEqual => "lessEqual",
            Self::In => "in",
        };
        f.write_str(name)
    }
}

/// One field predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilter {
    /// Column name
    pub field: String,
    /// Comparison
    pub operator: FilterOperator,
    /// Literal operand
    pub value: FieldValue,
    /// Collection the filter applies to; `None` applies everywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
}

impl QueryFilter {
    /// Build a filter scoped to one entity type
    pub fn new<F: Into<String>, V: Into<FieldValue>>(
        entity: EntityType,
        field: F,
        operator: FilterOperator,
        value: V,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            entity_type: Some(entity),
        }
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.operator, self.value.display_value())
    }
}

/// Parser output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Field filters, in template order
    pub filters: Vec<QueryFilter>,
    /// Entity scope, canonical order
    pub entity_types: Vec<EntityType>,
    /// Residual keywords
    pub search_terms: Vec<String>,
    /// Heuristic confidence, 0 to 100
    pub confidence: u8,
    /// Text as typed by the operator
    pub original_query: String,
}
