//! Priority resolver.
//!
//! Detectors run in a fixed order and the first one that claims the query
//! wins; there is no scoring across tiers and no backtracking. The order
//! is part of the contract:
//!
//! 1. permit number
//! 2. complaint keywords (before parcel, so violation queries that mention
//!    a parcel stay complaints)
//! 3. block / lot
//! 4. validate plans (before analyze, which shares vocabulary)
//! 5. street address
//! 6. person
//! 7. analyze project
//! 8. general question (always matches)

use tracing::{debug, trace};

use super::config::ClassifierConfig;
use super::detector::{
    AddressDetector, AnalyzeProjectDetector, ComplaintDetector, DetectContext, Detector,
    GeneralQuestionDetector, ParcelDetector, PermitNumberDetector, PersonDetector,
    ValidatePlansDetector, FALLBACK_CONFIDENCE,
};
use super::intent::{Entities, Intent, IntentResult};
use super::neighborhood::{NormalizedLevenshtein, Similarity};
use crate::error::EngineError;

/// Rule-based intent classifier for permit search queries
pub struct IntentClassifier {
    detectors: Vec<Box<dyn Detector>>,
    config: ClassifierConfig,
    similarity: Box<dyn Similarity>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with default thresholds
    pub fn new() -> Self {
        Self::build(ClassifierConfig::default(), Box::new(NormalizedLevenshtein))
    }

    /// Create a classifier with custom thresholds
    pub fn with_config(config: ClassifierConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config, Box::new(NormalizedLevenshtein)))
    }

    /// Swap the similarity used for fuzzy neighborhood matching
    pub fn with_similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    fn build(config: ClassifierConfig, similarity: Box<dyn Similarity>) -> Self {
        let detectors: Vec<Box<dyn Detector>> = vec![
            Box::new(PermitNumberDetector),
            Box::new(ComplaintDetector),
            Box::new(ParcelDetector),
            Box::new(ValidatePlansDetector),
            Box::new(AddressDetector),
            Box::new(PersonDetector),
            Box::new(AnalyzeProjectDetector),
            Box::new(GeneralQuestionDetector),
        ];

        Self {
            detectors,
            config,
            similarity,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Detector names in the order they are tried
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Classify a query, optionally resolving neighborhoods from `neighborhoods`.
    pub fn classify<S: AsRef<str>>(&self, text: &str, neighborhoods: Option<&[S]>) -> IntentResult {
        let text = text.trim();

        if text.is_empty() {
            let mut entities = Entities::new();
            entities.insert("query", "");
            return IntentResult::new(Intent::GeneralQuestion, 0.0, entities);
        }

        let names: Vec<&str> = neighborhoods
            .map(|list| list.iter().map(|s| s.as_ref()).collect())
            .unwrap_or_default();
        let ctx = DetectContext::new(text, &names, &self.config, self.similarity.as_ref());

        for detector in &self.detectors {
            match detector.try_match(&ctx) {
                Some(detection) => {
                    debug!(
                        "Detector '{}' matched: {} ({:.2})",
                        detector.name(),
                        detector.intent(),
                        detection.confidence
                    );
                    return IntentResult::new(
                        detector.intent(),
                        detection.confidence,
                        detection.entities,
                    );
                }
                None => trace!("Detector '{}' declined", detector.name()),
            }
        }

        // The cascade ends in an always-matching tier; this only guards
        // against a classifier assembled without it.
        IntentResult::general_question(text, FALLBACK_CONFIDENCE)
    }
}
