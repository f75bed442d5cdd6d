//! Latest validation result
//!
//! Validation may run off the editing path (one run per edit). Each run is
//! tagged with a monotonically increasing snapshot version; a result is
//! kept only when it is newer than the one already held, so a slow run on
//! an old snapshot never overwrites a fresher report.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use awb_domain::Snapshot;
use awb_validate::{DataValidator, ValidationResult};

/// Version tag of a snapshot submitted for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotVersion(u64);

impl SnapshotVersion {
    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

type Published = (SnapshotVersion, Arc<ValidationResult>);

/// Holder of the validation result for the newest snapshot seen
pub struct LatestValidation {
    validator: Arc<DataValidator>,
    next: AtomicU64,
    latest: RwLock<Option<Published>>,
}

impl Default for LatestValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl LatestValidation {
    /// Holder running the standard checks
    pub fn new() -> Self {
        Self::with_validator(DataValidator::new())
    }

    /// Holder running a custom validator
    pub fn with_validator(validator: DataValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            next: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Reserve the version for a new snapshot
    pub fn next_version(&self) -> SnapshotVersion {
        SnapshotVersion(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Offer a result; returns false when a newer one is already held
    pub fn publish(&self, version: SnapshotVersion, result: ValidationResult) -> bool {
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        if let Some((held, _)) = latest.as_ref()
            && *held >= version
        {
            tracing::debug!(%version, held = %held, "stale validation result discarded");
            return false;
        }
        *latest = Some((version, Arc::new(result)));
        true
    }

    /// Newest result and its version
    pub fn latest(&self) -> Option<Published> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate a snapshot on the blocking pool and publish the result
    ///
    /// Returns the result when it was kept, `None` when a newer snapshot
    /// finished first or the validation task was lost.
    pub async fn validate(&self, snapshot: Arc<Snapshot>) -> Option<Arc<ValidationResult>> {
        let version = self.next_version();
        let validator = Arc::clone(&self.validator);
        let result = match tokio::task::spawn_blocking(move || validator.validate(&snapshot)).await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(%version, error = %e, "validation task failed");
                return None;
            }
        };
        if self.publish(version, result) {
            self.latest()
                .filter(|(held, _)| *held == version)
                .map(|(_, result)| result)
        } else {
            None
        }
    }
}
