//! Entity type discriminator shared by issues, rules and queries

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record collections of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Client rows
    Clients,
    /// Worker rows
    Workers,
    /// Task rows
    Tasks,
}

impl EntityType {
    /// All entity types in canonical order
    pub const ALL: [EntityType; 3] = [Self::Clients, Self::Workers, Self::Tasks];

    /// Lowercase plural name, as used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Workers => "workers",
            Self::Tasks => "tasks",
        }
    }

    /// Singular noun for messages ("client", "worker", "task")
    pub fn singular(self) -> &'static str {
        match self {
            Self::Clients => "client",
            Self::Workers => "worker",
            Self::Tasks => "task",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clients" | "client" => Ok(Self::Clients),
            "workers" | "worker" => Ok(Self::Workers),
            "tasks" | "task" => Ok(Self::Tasks),
            other => Err(crate::error::Error::invalid_argument(format!(
                "Unknown entity type: {other}. Use clients, workers or tasks"
            ))),
        }
    }
}
