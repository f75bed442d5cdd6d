//! Worker rows

use super::record::entity_record;
use crate::value_objects::EntityType;

entity_record! {
    /// Entity: Worker
    ///
    /// Supplies capacity: `MaxLoadPerPhase` units in every phase listed in
    /// `AvailableSlots`.
    Worker => EntityType::Workers,
    id = "WorkerID",
    required = [
        "WorkerID",
        "WorkerName",
        "Skills",
        "AvailableSlots",
        "MaxLoadPerPhase",
        "WorkerGroup",
        "QualificationLevel",
    ],
    {
        /// Unique identifier
        worker_id => "WorkerID",
        /// Display name
        worker_name => "WorkerName",
        /// Skill set (comma list or array)
        skills => "Skills",
        /// Available phases (array or JSON-encoded array)
        available_slots => "AvailableSlots",
        /// Maximum concurrent load per phase
        max_load_per_phase => "MaxLoadPerPhase",
        /// Worker group used by load-limit rules
        worker_group => "WorkerGroup",
        /// Qualification level
        qualification_level => "QualificationLevel",
    }
}
