// 🔎 Filter Engine - criteria as data, applied to in-memory entity arrays
//
// Pure and synchronous: input is never mutated, output keeps input order.
// Every active criterion must match (AND); "all" or empty means inactive.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entities::{Field, FieldValue, Record};

/// Selector value that imposes no constraint.
pub const ALL: &str = "all";

/// Stage selector that means "backed by Y Combinator".
pub const YC_ALUMNI: &str = "YC Alumni";

const YC_INVESTOR: &str = "y combinator";

// ============================================================================
// CRITERIA
// ============================================================================

/// Current UI selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: String,
    pub stage: String,
    pub technology: String,
    pub region: String,
    pub search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            category: ALL.to_string(),
            stage: ALL.to_string(),
            technology: ALL.to_string(),
            region: ALL.to_string(),
            search: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn with_category(mut self, value: impl Into<String>) -> Self {
        self.category = value.into();
        self
    }

    pub fn with_stage(mut self, value: impl Into<String>) -> Self {
        self.stage = value.into();
        self
    }

    pub fn with_technology(mut self, value: impl Into<String>) -> Self {
        self.technology = value.into();
        self
    }

    pub fn with_region(mut self, value: impl Into<String>) -> Self {
        self.region = value.into();
        self
    }

    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search = value.into();
        self
    }

    /// Every field at its neutral value.
    pub fn is_neutral(&self) -> bool {
        selector(&self.category).is_none()
            && selector(&self.stage).is_none()
            && selector(&self.technology).is_none()
            && selector(&self.region).is_none()
            && search_term(&self.search).is_none()
    }
}

/// Active selector value, or `None` for "all"/empty.
fn selector(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value)
    }
}

/// Lower-cased search term, or `None` when blank.
fn search_term(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}

// ============================================================================
// FIELD MAP
// ============================================================================

/// Which entity field backs each criterion on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub category: Option<Field>,
    pub stage: Option<Field>,
    pub technology: Option<Field>,
    pub region: Option<Field>,
    /// Field checked by the YC alumni stage
    pub investors: Option<Field>,
    /// Fields searched by the free-text query
    pub search: Vec<Field>,
}

impl Default for FieldMap {
    fn default() -> Self {
        FieldMap {
            category: Some(Field::Category),
            stage: None,
            technology: None,
            region: None,
            investors: None,
            search: vec![Field::Name, Field::Description, Field::Category],
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    map: FieldMap,
}

impl FilterEngine {
    pub fn new(map: FieldMap) -> Self {
        FilterEngine { map }
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.map
    }

    /// Subset of `records` matching `criteria`, in input order.
    pub fn apply<R: Record + Clone>(&self, records: &[R], criteria: &FilterCriteria) -> Vec<R> {
        if criteria.is_neutral() {
            return records.to_vec();
        }

        let filtered: Vec<R> = records
            .iter()
            .filter(|r| self.matches(*r, criteria))
            .cloned()
            .collect();

        trace!(kept = filtered.len(), total = records.len(), "filter applied");
        filtered
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R, criteria: &FilterCriteria) -> bool {
        self.matches_category(record, criteria)
            && self.matches_stage(record, criteria)
            && self.matches_selector(record, self.map.technology, &criteria.technology)
            && self.matches_selector(record, self.map.region, &criteria.region)
            && self.matches_search(record, criteria)
    }

    fn matches_category<R: Record + ?Sized>(&self, record: &R, criteria: &FilterCriteria) -> bool {
        self.matches_selector(record, self.map.category, &criteria.category)
    }

    fn matches_stage<R: Record + ?Sized>(&self, record: &R, criteria: &FilterCriteria) -> bool {
        match selector(&criteria.stage) {
            Some(stage) if stage == YC_ALUMNI => match self.map.investors {
                Some(field) => serialized(record.field(field))
                    .is_some_and(|s| s.to_lowercase().contains(YC_INVESTOR)),
                None => true,
            },
            _ => self.matches_selector(record, self.map.stage, &criteria.stage),
        }
    }

    fn matches_selector<R: Record + ?Sized>(
        &self,
        record: &R,
        field: Option<Field>,
        value: &str,
    ) -> bool {
        let (Some(wanted), Some(field)) = (selector(value), field) else {
            return true;
        };
        let wanted = wanted.to_lowercase();

        match record.field(field) {
            FieldValue::Text(text) => text.to_lowercase().contains(&wanted),
            FieldValue::List(items) => items.iter().any(|i| i.to_lowercase().contains(&wanted)),
            FieldValue::Missing => false,
        }
    }

    fn matches_search<R: Record + ?Sized>(&self, record: &R, criteria: &FilterCriteria) -> bool {
        let Some(term) = search_term(&criteria.search) else {
            return true;
        };

        self.map.search.iter().any(|field| {
            serialized(record.field(*field)).is_some_and(|s| s.to_lowercase().contains(&term))
        })
    }
}

/// Text as-is, lists as their JSON form, missing as `None`.
fn serialized(value: FieldValue<'_>) -> Option<String> {
    match value {
        FieldValue::Text(text) => Some(text.to_string()),
        FieldValue::List(items) => serde_json::to_string(items).ok(),
        FieldValue::Missing => None,
    }
}

/// Distinct values of a field, in first-seen order (for selector options).
pub fn distinct_values<R: Record>(records: &[R], field: Field) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    let mut push = |v: &str| {
        let v = v.trim();
        if !v.is_empty() && !values.iter().any(|e| e.eq_ignore_ascii_case(v)) {
            values.push(v.to_string());
        }
    };

    for record in records {
        match record.field(field) {
            FieldValue::Text(text) => push(text),
            FieldValue::List(items) => items.iter().for_each(|i| push(i)),
            FieldValue::Missing => {}
        }
    }
    values
}
