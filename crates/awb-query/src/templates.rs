//! Query Templates
//!
//! Phrase templates tried in a fixed order against the lowercased query.
//! Each template is independent: several may fire on one input and none
//! suppresses another. A template fires when it yields at least one filter.

use crate::constants::{
    HIGH_PRIORITY_THRESHOLD, OVERLOAD_THRESHOLD, RESERVED_CATEGORY_WORDS, RESERVED_GROUP_WORDS,
    STOP_WORDS,
};
use awb_domain::{EntityType, FieldValue, FilterOperator, QueryFilter};
use regex::{Captures, Regex};

/// A matcher that turns phrases into field filters
pub trait QueryTemplate: Send + Sync {
    /// Short stable name
    fn name(&self) -> &'static str;

    /// Entity types the produced filters apply to
    fn entity_types(&self) -> &[EntityType];

    /// Filters for every match in `text` (already lowercased)
    fn extract(&self, text: &str) -> Vec<QueryFilter>;
}

/// Builds the filters for one regex match
pub type Extractor = fn(&Captures<'_>) -> Vec<QueryFilter>;

/// Template backed by a regular expression
pub struct RegexTemplate {
    name: &'static str,
    regex: Regex,
    entity_types: Vec<EntityType>,
    extractor: Extractor,
}

impl RegexTemplate {
    /// Compile a template
    pub fn new(
        name: &'static str,
        pattern: &str,
        entity_types: &[EntityType],
        extractor: Extractor,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            entity_types: entity_types.to_vec(),
            extractor,
        })
    }
}

impl QueryTemplate for RegexTemplate {
    fn name(&self) -> &'static str {
        self.name
    }

    fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    fn extract(&self, text: &str) -> Vec<QueryFilter> {
        self.regex
            .captures_iter(text)
            .flat_map(|captures| (self.extractor)(&captures))
            .collect()
    }
}

const WORKER_WORDS: &str = r"(?:workers?|employees?|staff|developers?|engineers?|people)";

/// The standard templates, in evaluation order
pub fn standard_templates() -> Vec<Box<dyn QueryTemplate>> {
    [
        template(
            "worker-skills",
            &format!(r"\b{WORKER_WORDS}\s+(?:with|having|who\s+(?:have|know))\s+(.+?)\s+skills?\b"),
            EntityType::Workers,
            worker_skills,
        ),
        template(
            "duration-greater",
            r"\btasks?\s+(?:with\s+)?(?:a\s+)?duration\s+(?:greater|more|longer|over|above)\s+(?:than\s+)?(\d+)",
            EntityType::Tasks,
            |c| numeric(c, EntityType::Tasks, "Duration", FilterOperator::Greater),
        ),
        template(
            "duration-less",
            r"\btasks?\s+(?:with\s+)?(?:a\s+)?duration\s+(?:less|shorter|fewer|under|below)\s+(?:than\s+)?(\d+)",
            EntityType::Tasks,
            |c| numeric(c, EntityType::Tasks, "Duration", FilterOperator::Less),
        ),
        template(
            "priority-above",
            r"\bclients?\s+(?:with\s+)?priority\s+(?:above|over|greater\s+than|more\s+than|higher\s+than)\s+(\d+)",
            EntityType::Clients,
            |c| numeric(c, EntityType::Clients, "PriorityLevel", FilterOperator::Greater),
        ),
        template(
            "priority-below",
            r"\bclients?\s+(?:with\s+)?priority\s+(?:below|under|less\s+than|lower\s+than)\s+(\d+)",
            EntityType::Clients,
            |c| numeric(c, EntityType::Clients, "PriorityLevel", FilterOperator::Less),
        ),
        template(
            "available-in-phase",
            &format!(r"\b{WORKER_WORDS}\s+(?:who\s+are\s+)?available\s+(?:in|during|for)\s+phase\s+(\d+)"),
            EntityType::Workers,
            |c| numeric(c, EntityType::Workers, "AvailableSlots", FilterOperator::In),
        ),
        template(
            "tasks-in-category",
            r"\btasks?\s+(?:in|from)\s+(?:the\s+)?(?:category\s+)?([a-z][\w-]*)",
            EntityType::Tasks,
            task_category,
        ),
        template(
            "overloaded-workers",
            &format!(r"\boverloaded\s+{WORKER_WORDS}"),
            EntityType::Workers,
            |_| {
                vec![QueryFilter::new(
                    EntityType::Workers,
                    "MaxLoadPerPhase",
                    FilterOperator::Greater,
                    OVERLOAD_THRESHOLD,
                )]
            },
        ),
        template(
            "high-priority-clients",
            r"\bhigh[\s-]+priority\s+clients?\b",
            EntityType::Clients,
            |_| {
                vec![QueryFilter::new(
                    EntityType::Clients,
                    "PriorityLevel",
                    FilterOperator::GreaterEqual,
                    HIGH_PRIORITY_THRESHOLD,
                )]
            },
        ),
        template(
            "group-workers",
            r"\b([a-z][\w-]*)\s+(?:workers|developers)\b",
            EntityType::Workers,
            worker_group,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn template(
    name: &'static str,
    pattern: &str,
    entity: EntityType,
    extractor: Extractor,
) -> Option<Box<dyn QueryTemplate>> {
    match RegexTemplate::new(name, pattern, &[entity], extractor) {
        Ok(template) => Some(Box::new(template)),
        Err(e) => {
            tracing::warn!(template = name, error = %e, "query template skipped");
            None
        }
    }
}

fn worker_skills(captures: &Captures<'_>) -> Vec<QueryFilter> {
    let Some(list) = captures.get(1) else {
        return Vec::new();
    };
    split_skill_list(list.as_str())
        .into_iter()
        .map(|skill| {
            QueryFilter::new(EntityType::Workers, "Skills", FilterOperator::Contains, skill)
        })
        .collect()
}

/// Split "react, node and sql" into its skills
pub fn split_skill_list(list: &str) -> Vec<String> {
    let normalized = format!(" {list} ")
        .replace(" and ", ",")
        .replace(" or ", ",")
        .replace(['&', '/'], ",");
    normalized
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn numeric(
    captures: &Captures<'_>,
    entity: EntityType,
    field: &str,
    operator: FilterOperator,
) -> Vec<QueryFilter> {
    captures
        .get(1)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|n| QueryFilter::new(entity, field, operator, FieldValue::from(n)))
        .into_iter()
        .collect()
}

fn task_category(captures: &Captures<'_>) -> Vec<QueryFilter> {
    word_filter(captures, RESERVED_CATEGORY_WORDS)
        .map(|word| QueryFilter::new(EntityType::Tasks, "Category", FilterOperator::Contains, word))
        .into_iter()
        .collect()
}

fn worker_group(captures: &Captures<'_>) -> Vec<QueryFilter> {
    word_filter(captures, RESERVED_GROUP_WORDS)
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(&word.as_str()))
        .map(|word| {
            QueryFilter::new(EntityType::Workers, "WorkerGroup", FilterOperator::Contains, word)
        })
        .into_iter()
        .collect()
}

fn word_filter(captures: &Captures<'_>, reserved: &[&str]) -> Option<String> {
    let word = captures.get(1)?.as_str();
    (!reserved.contains(&word)).then(|| word.to_string())
}
