//! Value Objects
//!
//! Immutable values with no identity: cell values and entity discriminators.

pub mod entity_type;
pub mod field;

pub use entity_type::EntityType;
pub use field::{FieldValue, present};
