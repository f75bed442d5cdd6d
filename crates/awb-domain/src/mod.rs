//! # Allocation Workbench Domain
//!
//! Core types shared by every layer:
//!
//! - `entities` - client, worker and task rows and the snapshot grouping them
//! - `value_objects` - loosely-typed cell values and entity discriminators
//! - `normalize` - the single place where multi-encoding cells are parsed
//! - `rules` - the business rule model and export manifest
//! - `query` - structured queries produced from free text
//! - `ports` - traits for external collaborators
//! - `error` - operational error type

pub mod constants;
pub mod entities;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod query;
pub mod rules;
pub mod value_objects;

pub use entities::{Client, EntityRecord, Snapshot, Task, Worker};
pub use error::{Error, Result};
pub use query::{FilterOperator, ParsedQuery, QueryFilter};
pub use rules::{Rule, RuleKind, RuleManifest};
pub use value_objects::{EntityType, FieldValue};
