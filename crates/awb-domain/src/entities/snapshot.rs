//! Entity Snapshot
//!
//! The three collections handed to every core operation. Components read a
//! snapshot and return new data; none of them mutates one in place.

use super::{Client, EntityRecord, Task, Worker};
use crate::value_objects::EntityType;
use serde::{Deserialize, Serialize};

/// Immutable view of clients, workers and tasks at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Client rows, in source order
    #[serde(default)]
    pub clients: Vec<Client>,
    /// Worker rows, in source order
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Task rows, in source order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Build a snapshot from its three collections
    pub fn new(clients: Vec<Client>, workers: Vec<Worker>, tasks: Vec<Task>) -> Self {
        Self {
            clients,
            workers,
            tasks,
        }
    }

    /// Number of rows in one collection
    pub fn len_of(&self, entity: EntityType) -> usize {
        match entity {
            EntityType::Clients => self.clients.len(),
            EntityType::Workers => self.workers.len(),
            EntityType::Tasks => self.tasks.len(),
        }
    }

    /// True when all three collections are empty
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.workers.is_empty() && self.tasks.is_empty()
    }

    /// Identifiers of every task, in source order (blank ids skipped)
    pub fn task_ids(&self) -> Vec<String> {
        self.tasks.iter().filter_map(EntityRecord::id).collect()
    }
}
