//! Task rows

use super::record::entity_record;
use crate::value_objects::EntityType;

entity_record! {
    /// Entity: Task
    ///
    /// Consumes capacity: `Duration` units in every phase it prefers.
    Task => EntityType::Tasks,
    id = "TaskID",
    required = [
        "TaskID",
        "TaskName",
        "Category",
        "Duration",
        "RequiredSkills",
        "PreferredPhases",
        "MaxConcurrent",
    ],
    {
        /// Unique identifier
        task_id => "TaskID",
        /// Display name
        task_name => "TaskName",
        /// Category
        category => "Category",
        /// Duration in phases, at least 1
        duration => "Duration",
        /// Required skill set (comma list or array)
        required_skills => "RequiredSkills",
        /// Preferred phases: array, "a-b" range or JSON text
        preferred_phases => "PreferredPhases",
        /// Maximum concurrent assignees
        max_concurrent => "MaxConcurrent",
    }
}
