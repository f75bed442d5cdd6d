//! Domain layer constants
//!
//! Bounds and defaults shared by the validation engine, the rule validator
//! and the query parser.

// ============================================================================
// ENTITY VALUE BOUNDS
// ============================================================================

/// Lowest accepted client priority level
pub const PRIORITY_LEVEL_MIN: i64 = 1;

/// Highest accepted client priority level
pub const PRIORITY_LEVEL_MAX: i64 = 5;

/// Priority assigned when a non-numeric level is repaired
pub const PRIORITY_LEVEL_DEFAULT: i64 = 3;

/// Shortest accepted task duration, in phases
pub const TASK_DURATION_MIN: i64 = 1;

/// Keyword in a task name that marks a suspected circular co-run
pub const CIRCULAR_MARKER: &str = "circular";

/// A task may spread its duration over at most this many runs per preferred phase
pub const PHASE_WINDOW_DURATION_FACTOR: usize = 2;

// ============================================================================
// RULE CONSTANTS
// ============================================================================

/// Lowest accepted rule priority
pub const RULE_PRIORITY_MIN: i32 = 1;

/// Highest accepted rule priority
pub const RULE_PRIORITY_MAX: i32 = 100;

/// Priority assigned to rules built without an explicit priority
pub const RULE_PRIORITY_DEFAULT: i32 = 50;

/// Minimum distinct tasks in a co-run rule
pub const CO_RUN_MIN_TASKS: usize = 2;

/// Version stamped into exported rule manifests
pub const RULE_MANIFEST_VERSION: &str = "1.0";
