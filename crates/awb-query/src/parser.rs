//! Query Parser
//!
//! Three additive passes over the input: entity detection, ordered
//! templates, residual keywords. Parsing never fails; unrecognized text
//! yields the full entity scope, no filters and a keyword list.

use crate::constants::{ENTITY_CONFIDENCE, ENTITY_VOCABULARY, FILTER_CONFIDENCE, MAX_CONFIDENCE};
use crate::keywords::{extract_keywords, words};
use crate::templates::{QueryTemplate, standard_templates};
use awb_domain::{EntityType, ParsedQuery};
use std::collections::BTreeSet;

/// Free-text to structured query translator
pub struct QueryParser {
    templates: Vec<Box<dyn QueryTemplate>>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    /// Parser with the standard templates
    pub fn new() -> Self {
        Self::with_templates(standard_templates())
    }

    /// Parser over a custom ordered template list
    pub fn with_templates(templates: Vec<Box<dyn QueryTemplate>>) -> Self {
        Self { templates }
    }

    /// Names of the templates, in evaluation order
    pub fn template_names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    /// Translate free text into a structured query
    ///
    /// # Example
    ///
    /// ```rust
    /// use awb_domain::EntityType;
    /// use awb_query::QueryParser;
    ///
    /// let query = QueryParser::new().parse("Workers with JavaScript skills");
    /// assert_eq!(query.entity_types, vec![EntityType::Workers]);
    /// assert_eq!(query.filters[0].to_string(), "Skills contains \"javascript\"");
    /// assert_eq!(query.confidence, 35);
    /// ```
    pub fn parse(&self, text: &str) -> ParsedQuery {
        let lowered = text.to_lowercase();

        let detected = detect_entities(&lowered);

        let mut filters = Vec::new();
        let mut template_scope = BTreeSet::new();
        for template in &self.templates {
            let found = template.extract(&lowered);
            if found.is_empty() {
                continue;
            }
            tracing::trace!(template = template.name(), filters = found.len(), "template fired");
            template_scope.extend(template.entity_types().iter().copied());
            filters.extend(found);
        }

        let entity_types: Vec<EntityType> = if !template_scope.is_empty() {
            template_scope.into_iter().collect()
        } else if !detected.is_empty() {
            detected.clone()
        } else {
            EntityType::ALL.to_vec()
        };

        let confidence = (ENTITY_CONFIDENCE * detected.len() as u32
            + FILTER_CONFIDENCE * filters.len() as u32)
            .min(MAX_CONFIDENCE) as u8;

        let query = ParsedQuery {
            filters,
            entity_types,
            search_terms: extract_keywords(text),
            confidence,
            original_query: text.to_string(),
        };
        tracing::debug!(
            filters = query.filters.len(),
            terms = query.search_terms.len(),
            confidence = query.confidence,
            "query parsed"
        );
        query
    }
}

/// Entity types whose vocabulary appears in the text, canonical order
fn detect_entities(lowered: &str) -> Vec<EntityType> {
    let words = words(lowered);
    ENTITY_VOCABULARY
        .iter()
        .filter(|(_, vocabulary)| words.iter().any(|w| vocabulary.contains(&w.as_str())))
        .map(|(entity, _)| *entity)
        .collect()
}
