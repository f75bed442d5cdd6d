//! Snapshot files
//!
//! A snapshot on disk is one JSON document with `clients`, `workers` and
//! `tasks` arrays of flat records. Missing collections load as empty.

use std::path::Path;

use awb_domain::error::{Error, Result};
use awb_domain::Snapshot;

use crate::error_ext::ErrorContext;

/// Read a snapshot document
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_io_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;
    tracing::debug!(
        path = %path.display(),
        clients = snapshot.clients.len(),
        workers = snapshot.workers.len(),
        tasks = snapshot.tasks.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Write a snapshot document, pretty-printed
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)
        .with_io_context(|| format!("Failed to write snapshot {}", path.display()))?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}
