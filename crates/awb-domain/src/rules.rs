//! Business Rule Model
//!
//! A closed set of rule variants. Rules are owned by the caller's rule
//! collection; validation and manifest generation live in `awb-validate`.

use crate::constants::{RULE_MANIFEST_VERSION, RULE_PRIORITY_DEFAULT};
use crate::value_objects::EntityType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A business rule over the snapshot
///
/// ## Example
///
/// ```rust
/// use awb_domain::rules::{CoRunMode, Rule, RuleKind};
///
/// let rule = Rule::new(
///     "Pair onboarding tasks",
///     RuleKind::CoRun {
///         tasks: vec!["T1".to_string(), "T2".to_string()],
///         mode: CoRunMode::Together,
///     },
/// )
/// .with_priority(80);
///
/// assert_eq!(rule.kind.type_name(), "coRun");
/// assert!(rule.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Rule identifier
    pub id: String,
    /// Human-readable name, unique within a collection
    pub name: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Disabled rules are kept but never exported
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Priority, 1 (lowest) to 100 (highest)
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Creation time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Variant-specific payload, tagged by `type`
    #[serde(flatten)]
    pub kind: RuleKind,
}

fn default_enabled() -> bool {
    true
}

fn default_priority() -> i32 {
    RULE_PRIORITY_DEFAULT
}

impl Rule {
    /// Create an enabled rule with a generated id and default priority
    pub fn new<S: Into<String>>(name: S, kind: RuleKind) -> Self {
        let now = Utc::now();
        Self {
            id: format!("rule-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            description: None,
            enabled: true,
            priority: RULE_PRIORITY_DEFAULT,
            created_at: now,
            updated_at: now,
            kind,
        }
    }

    /// Set an explicit identifier
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the rule disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Variant payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RuleKind {
    /// Tasks that must (or must not) run in the same phase
    CoRun {
        /// Task identifiers, at least two distinct
        tasks: Vec<String>,
        /// Together or apart
        #[serde(default)]
        mode: CoRunMode,
    },
    /// A client or worker group must share at least N phase slots
    SlotRestriction {
        /// Which collection the group tag refers to
        group_type: GroupScope,
        /// Group tag value
        group: String,
        /// Minimum number of common slots
        min_common_slots: i64,
        /// Optional phase scope
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phases: Option<Vec<u32>>,
    },
    /// Per-phase load ceiling for a worker group
    LoadLimit {
        /// Worker group tag
        worker_group: String,
        /// Maximum slots per phase
        max_slots_per_phase: i64,
    },
    /// A task restricted to a set of phases
    PhaseWindow {
        /// Task identifier
        task_id: String,
        /// Allowed phases
        allowed_phases: Vec<u32>,
        /// Strict windows are hard constraints; advisory ones are preferences
        #[serde(default = "default_enabled")]
        strict: bool,
    },
    /// A field on an entity type matched against a regular expression
    PatternMatch {
        /// Entity the pattern applies to
        entity: EntityType,
        /// Column name
        field: String,
        /// Regular expression
        pattern: String,
        /// What to do on match
        action: PatternAction,
    },
    /// Ordering between global and specific rules
    Precedence {
        /// Global rule ids, in order
        #[serde(default)]
        global_rules: Vec<String>,
        /// Specific rule ids, in order
        #[serde(default)]
        specific_rules: Vec<String>,
        /// How conflicts are resolved
        policy: ConflictPolicy,
    },
}

impl RuleKind {
    /// Wire name of the variant (`coRun`, `loadLimit`, ...)
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CoRun { .. } => "coRun",
            Self::SlotRestriction { .. } => "slotRestriction",
            Self::LoadLimit { .. } => "loadLimit",
            Self::PhaseWindow { .. } => "phaseWindow",
            Self::PatternMatch { .. } => "patternMatch",
            Self::Precedence { .. } => "precedence",
        }
    }
}

/// Co-run semantics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoRunMode {
    /// Tasks run in the same phase
    #[default]
    Together,
    /// Tasks never share a phase
    Apart,
}

/// Collection a slot-restriction group refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupScope {
    /// `GroupTag` on clients
    Client,
    /// `WorkerGroup` on workers
    Worker,
}

/// Action of a pattern-match rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternAction {
    /// Matching rows are allowed
    Allow,
    /// Matching rows are rejected
    Deny,
    /// Matching rows are flagged for review
    Flag,
}

/// Conflict resolution for precedence rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictPolicy {
    /// Higher priority wins
    PriorityBased,
    /// Specific rules override global ones
    SpecificOverGlobal,
    /// First listed rule wins
    FirstMatch,
}

/// Export hand-off format for downstream allocators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleManifest {
    /// Manifest format version
    pub version: String,
    /// Generation time
    pub created_at: DateTime<Utc>,
    /// Enabled rules, priority descending
    pub rules: Vec<Rule>,
    /// Counts
    pub metadata: ManifestMetadata,
}

/// Manifest counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestMetadata {
    /// Rules in the source collection
    pub total_rules: usize,
    /// Enabled rules exported
    pub enabled_rules: usize,
    /// Exported rules per variant
    pub rule_types: BTreeMap<String, usize>,
}

impl RuleManifest {
    /// Empty manifest stamped with the current format version
    pub fn empty(created_at: DateTime<Utc>) -> Self {
        Self {
            version: RULE_MANIFEST_VERSION.to_string(),
            created_at,
            rules: Vec::new(),
            metadata: ManifestMetadata::default(),
        }
    }
}
