//! Query parser constants

use awb_domain::EntityType;

/// Confidence added for each entity type mentioned
pub const ENTITY_CONFIDENCE: u32 = 20;

/// Confidence added for each resolved field filter
pub const FILTER_CONFIDENCE: u32 = 15;

/// Confidence ceiling
pub const MAX_CONFIDENCE: u32 = 100;

/// Maximum number of example queries offered
pub const SUGGESTION_LIMIT: usize = 8;

/// Data-driven suggestions built from worker skills
pub const SKILL_SUGGESTIONS: usize = 3;

/// Data-driven suggestions built from task categories
pub const CATEGORY_SUGGESTIONS: usize = 2;

/// `MaxLoadPerPhase` above which a worker counts as overloaded
pub const OVERLOAD_THRESHOLD: i64 = 3;

/// Lowest `PriorityLevel` counted as high priority
pub const HIGH_PRIORITY_THRESHOLD: i64 = 4;

/// Words naming each entity type
pub const ENTITY_VOCABULARY: &[(EntityType, &[&str])] = &[
    (EntityType::Clients, &["client", "clients", "customer", "customers"]),
    (
        EntityType::Workers,
        &[
            "worker",
            "workers",
            "employee",
            "employees",
            "staff",
            "developer",
            "developers",
            "engineer",
            "engineers",
        ],
    ),
    (EntityType::Tasks, &["task", "tasks", "job", "jobs", "project", "projects"]),
];

/// Words never kept as search terms
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "who", "are", "all", "any", "show", "find", "list", "get",
    "give", "that", "have", "has", "having", "than", "more", "less", "greater", "above",
    "below", "from", "into", "what", "which", "where", "there", "their", "them", "this",
    "those", "these", "can", "will", "should", "would", "could", "been", "was", "were",
    "not", "only", "some", "skill", "skills", "please", "display", "whose", "over", "under",
    "client", "clients", "customer", "customers", "worker", "workers", "employee",
    "employees", "staff", "developer", "developers", "engineer", "engineers", "task",
    "tasks", "job", "jobs", "project", "projects",
];

/// Words that never name a worker group
///
/// Pronouns, determiners and qualifiers that commonly precede "workers" in
/// everyday phrasing. Stop words and words of two letters or fewer are
/// rejected as well.
pub const RESERVED_GROUP_WORDS: &[&str] = &[
    // pronouns and determiners
    "our", "your", "you", "they", "its", "his", "her", "each", "every", "other", "another",
    "many", "most", "few", "several", "both", "either", "neither", "such", "here", "how",
    // verbs and fillers
    "need", "want", "see", "tell", "fetch", "return", "include", "available", "assign",
    // qualifiers
    "overloaded", "qualified", "skilled", "senior", "junior", "experienced", "good", "best",
    "top", "new", "free", "busy", "idle", "active", "current", "remaining", "possible",
    "suitable", "eligible", "priority", "high", "low",
];

/// Words that never name a task category
pub const RESERVED_CATEGORY_WORDS: &[&str] = &["phase", "the", "category", "all", "any"];

/// Queries offered regardless of the data
pub const CURATED_SUGGESTIONS: &[&str] = &[
    "High priority clients",
    "Overloaded workers",
    "Tasks with duration greater than 2",
    "Workers available in phase 1",
    "Clients with priority above 3",
    "Tasks with duration less than 3",
];
