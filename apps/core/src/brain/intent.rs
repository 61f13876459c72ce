//! Intent types and the classification result.
//!
//! An [`IntentResult`] is the only thing the brain hands back to callers:
//! a closed-set [`Intent`], a heuristic confidence and the extracted
//! [`Entities`] the downstream handler needs.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Permit number lookup (9-15 digits, or a letter + 6 digits)
    LookupPermit,
    /// Complaint / enforcement search
    SearchComplaint,
    /// Parcel search by block and lot
    SearchParcel,
    /// Plan set validation request
    ValidatePlans,
    /// Permits at a street address
    SearchAddress,
    /// Permits by a person or firm
    SearchPerson,
    /// Free-form project description to analyze
    AnalyzeProject,
    /// Anything else
    GeneralQuestion,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Every intent, in classification priority order
    pub const ALL: [Intent; 8] = [
        Intent::LookupPermit,
        Intent::SearchComplaint,
        Intent::SearchParcel,
        Intent::ValidatePlans,
        Intent::SearchAddress,
        Intent::SearchPerson,
        Intent::AnalyzeProject,
        Intent::GeneralQuestion,
    ];

    /// Returns the wire tag for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::LookupPermit => "lookup_permit",
            Intent::SearchComplaint => "search_complaint",
            Intent::SearchParcel => "search_parcel",
            Intent::ValidatePlans => "validate_plans",
            Intent::SearchAddress => "search_address",
            Intent::SearchPerson => "search_person",
            Intent::AnalyzeProject => "analyze_project",
            Intent::GeneralQuestion => "general_question",
        }
    }
}

impl FromStr for Intent {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.label().eq_ignore_ascii_case(tag))
            .ok_or_else(|| EngineError::Validation(format!("unknown intent tag '{}'", s)))
    }
}

/// Value of a single extracted entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityValue {
    Text(String),
    Number(f64),
}

impl EntityValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntityValue::Text(s) => Some(s),
            EntityValue::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EntityValue::Number(n) => Some(*n),
            EntityValue::Text(_) => None,
        }
    }
}

impl From<String> for EntityValue {
    fn from(s: String) -> Self {
        EntityValue::Text(s)
    }
}

impl From<&str> for EntityValue {
    fn from(s: &str) -> Self {
        EntityValue::Text(s.to_string())
    }
}

impl From<f64> for EntityValue {
    fn from(n: f64) -> Self {
        EntityValue::Number(n)
    }
}

/// Insertion-ordered entity map.
///
/// Key sets are small (at most four or five per intent) so a vector of
/// pairs beats hashing and keeps the order handlers see stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entities {
    fields: Vec<(&'static str, EntityValue)>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing key in place.
    pub fn insert(&mut self, key: &'static str, value: impl Into<EntityValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&EntityValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(EntityValue::as_str)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(EntityValue::as_f64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &EntityValue)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Entities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Extracted entities, keyed per intent
    pub entities: Entities,
}

impl IntentResult {
    pub fn new(intent: Intent, confidence: f32, entities: Entities) -> Self {
        Self {
            intent,
            confidence: confidence.clamp(0.0, 1.0),
            entities,
        }
    }

    /// Catch-all result echoing the query back
    pub fn general_question(query: &str, confidence: f32) -> Self {
        let mut entities = Entities::new();
        entities.insert("query", query);
        Self::new(Intent::GeneralQuestion, confidence, entities)
    }

    /// True when no specific tier claimed the query
    pub fn is_fallback(&self) -> bool {
        self.intent == Intent::GeneralQuestion
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        let keys: Vec<&str> = self.entities.keys().collect();
        format!(
            "Intent: {} ({:.0}%), Entities: [{}]",
            self.intent,
            self.confidence * 100.0,
            keys.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_labels_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(intent.label().parse::<Intent>().unwrap(), intent);
        }
        assert!("lookup".parse::<Intent>().is_err());
    }

    #[test]
    fn test_entities_keep_insertion_order() {
        let mut entities = Entities::new();
        entities.insert("street_number", "456");
        entities.insert("street_name", "Market");
        entities.insert("street_number", "457");

        let keys: Vec<&str> = entities.keys().collect();
        assert_eq!(keys, vec!["street_number", "street_name"]);
        assert_eq!(entities.get_str("street_number"), Some("457"));
        assert_eq!(entities.get_number("street_number"), None);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let result = IntentResult::new(Intent::SearchPerson, 1.7, Entities::new());
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_summary() {
        let result = IntentResult::general_question("hello", 0.5);
        let summary = result.summary();

        assert!(summary.contains("general_question"));
        assert!(summary.contains("query"));
        assert!(result.is_fallback());
    }
}
