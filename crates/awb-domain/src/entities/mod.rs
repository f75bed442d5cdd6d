//! Domain Entities
//!
//! Row types for the three collections and the snapshot that groups them.

mod record;

pub mod client;
pub mod snapshot;
pub mod task;
pub mod worker;

pub use client::Client;
pub use record::EntityRecord;
pub use snapshot::Snapshot;
pub use task::Task;
pub use worker::Worker;
