//! Entity Record Trait
//!
//! Common column-level access for the three row types, plus the macro that
//! declares them. Columns are addressed by their spreadsheet header
//! (`ClientID`, `AvailableSlots`, ...) because that is the vocabulary used by
//! issues, filters and pattern rules.

use crate::value_objects::{EntityType, FieldValue};

/// Column-level access shared by clients, workers and tasks
pub trait EntityRecord {
    /// Collection this record belongs to
    const ENTITY: EntityType;

    /// Identifier column
    const ID_COLUMN: &'static str;

    /// Every known column, in declaration order
    const COLUMNS: &'static [&'static str];

    /// Columns that must be present on the first row of a collection
    const REQUIRED: &'static [&'static str];

    /// Value of a column; `None` when the column is absent from the row
    fn field(&self, column: &str) -> Option<&FieldValue>;

    /// Replace the value of a column (known or extra)
    fn set_field(&mut self, column: &str, value: FieldValue);

    /// Remove a column from the row
    fn clear_field(&mut self, column: &str);

    /// Columns present on this row: known columns first, then extras
    fn columns(&self) -> Vec<&str>;

    /// Identifier as trimmed text; `None` when missing or blank
    fn id(&self) -> Option<String> {
        self.field(Self::ID_COLUMN)
            .and_then(crate::normalize::text)
            .filter(|id| !id.is_empty())
    }

    /// Lowercased concatenation of every present value, for keyword search
    fn search_text(&self) -> String {
        self.columns()
            .into_iter()
            .filter_map(|column| self.field(column))
            .map(|value| value.display_value().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Declare an entity row struct with one optional `FieldValue` per column
///
/// Generates the struct (serde-renamed to the column headers, unknown
/// columns collected into `extra`) and its `EntityRecord` implementation.
macro_rules! entity_record {
    (
        $(#[$meta:meta])*
        $name:ident => $entity:expr,
        id = $id_column:literal,
        required = [$($required:literal),* $(,)?],
        {
            $(
                $(#[$field_meta:meta])*
                $field:ident => $column:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(
                    rename = $column,
                    default,
                    deserialize_with = "crate::value_objects::present",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $field: Option<$crate::value_objects::FieldValue>,
            )*
            /// Columns outside the known schema
            #[serde(flatten)]
            pub extra: std::collections::BTreeMap<String, $crate::value_objects::FieldValue>,
        }

        impl $crate::entities::EntityRecord for $name {
            const ENTITY: $crate::value_objects::EntityType = $entity;
            const ID_COLUMN: &'static str = $id_column;
            const COLUMNS: &'static [&'static str] = &[$($column),*];
            const REQUIRED: &'static [&'static str] = &[$($required),*];

            fn field(&self, column: &str) -> Option<&$crate::value_objects::FieldValue> {
                match column {
                    $( $column => self.$field.as_ref(), )*
                    other => self.extra.get(other),
                }
            }

            fn set_field(&mut self, column: &str, value: $crate::value_objects::FieldValue) {
                match column {
                    $( $column => self.$field = Some(value), )*
                    other => {
                        self.extra.insert(other.to_string(), value);
                    }
                }
            }

            fn clear_field(&mut self, column: &str) {
                match column {
                    $( $column => self.$field = None, )*
                    other => {
                        self.extra.remove(other);
                    }
                }
            }

            fn columns(&self) -> Vec<&str> {
                let mut columns = Vec::new();
                $(
                    if self.$field.is_some() {
                        columns.push($column);
                    }
                )*
                columns.extend(self.extra.keys().map(String::as_str));
                columns
            }
        }
    };
}

pub(crate) use entity_record;
