//! Detectors, one per priority tier.
//!
//! Each detector pairs a matcher with an extractor. A detector either
//! claims the query with a confident entity set or declines, letting the
//! next tier try. Detectors hold no state between calls.

use tracing::trace;

use super::address::{extract_address, has_address_signal, AddressMode, StreetAddress};
use super::config::ClassifierConfig;
use super::intent::{Entities, Intent};
use super::neighborhood::{NeighborhoodMatcher, Similarity};
use super::patterns::{
    BLOCK_LOT, COMPLAINT_KEYWORDS, COMPLAINT_NUMBER, PERMIT_NUMBER, VALIDATE_PHRASES,
};
use super::person::extract_person;
use super::project::{analyze_confidence, count_signals, extract_cost, extract_square_footage};

pub const PERMIT_CONFIDENCE: f32 = 0.95;
pub const COMPLAINT_CONFIDENCE: f32 = 0.90;
pub const PARCEL_CONFIDENCE: f32 = 0.90;
pub const VALIDATE_CONFIDENCE: f32 = 0.85;
pub const ADDRESS_CONFIDENCE: f32 = 0.85;
pub const PERSON_CONFIDENCE: f32 = 0.80;
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Everything a detector may look at for one query
pub struct DetectContext<'a> {
    /// Trimmed query text
    pub text: &'a str,
    /// Whitespace-separated word count of `text`
    pub word_count: usize,
    /// Canonical neighborhood names supplied by the caller
    pub neighborhoods: &'a [&'a str],
    pub config: &'a ClassifierConfig,
    pub similarity: &'a dyn Similarity,
}

impl<'a> DetectContext<'a> {
    pub fn new(
        text: &'a str,
        neighborhoods: &'a [&'a str],
        config: &'a ClassifierConfig,
        similarity: &'a dyn Similarity,
    ) -> Self {
        Self {
            text,
            word_count: text.split_whitespace().count(),
            neighborhoods,
            config,
            similarity,
        }
    }
}

/// A successful match
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub confidence: f32,
    pub entities: Entities,
}

impl Detection {
    fn new(confidence: f32, entities: Entities) -> Self {
        Self {
            confidence,
            entities,
        }
    }
}

/// One tier of the priority cascade.
pub trait Detector: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Intent reported when this detector matches
    fn intent(&self) -> Intent;

    /// Claim the query, or decline with `None`.
    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection>;
}

/// Pull a 9-digit complaint number ("20" year prefix) out of text.
pub fn extract_complaint_number(text: &str) -> Option<String> {
    COMPLAINT_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pull a permit number out of text.
pub fn extract_permit_number(text: &str) -> Option<String> {
    PERMIT_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pull a (block, lot) pair out of text.
pub fn extract_block_lot(text: &str) -> Option<(String, String)> {
    let caps = BLOCK_LOT.captures(text)?;
    Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
}

/// A bare "number + word" counts only behind an address phrase or in a short query.
fn address_mode(ctx: &DetectContext<'_>) -> AddressMode {
    if has_address_signal(ctx.text) || ctx.word_count <= ctx.config.short_query_max_words {
        AddressMode::AllowBare
    } else {
        AddressMode::SuffixOnly
    }
}

fn insert_address(entities: &mut Entities, address: StreetAddress) {
    entities.insert("street_number", address.street_number);
    entities.insert("street_name", address.street_name);
}

pub struct PermitNumberDetector;

impl Detector for PermitNumberDetector {
    fn name(&self) -> &'static str {
        "permit_number"
    }

    fn intent(&self) -> Intent {
        Intent::LookupPermit
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let permit_number = extract_permit_number(ctx.text)?;
        let mut entities = Entities::new();
        entities.insert("permit_number", permit_number);
        Some(Detection::new(PERMIT_CONFIDENCE, entities))
    }
}

/// Complaint keywords win over parcel and address patterns in the same text;
/// whatever address or parcel is present rides along as extra entities.
pub struct ComplaintDetector;

impl Detector for ComplaintDetector {
    fn name(&self) -> &'static str {
        "complaint"
    }

    fn intent(&self) -> Intent {
        Intent::SearchComplaint
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        if !COMPLAINT_KEYWORDS.is_match(ctx.text) {
            return None;
        }

        let mut entities = Entities::new();
        if let Some(number) = extract_complaint_number(ctx.text) {
            entities.insert("complaint_number", number);
        }
        // A bare match like "2 complaints" is the keyword, not a street.
        if let Some(address) = extract_address(ctx.text, address_mode(ctx))
            .filter(|a| !COMPLAINT_KEYWORDS.is_match(&a.street_name))
        {
            insert_address(&mut entities, address);
        }
        if let Some((block, lot)) = extract_block_lot(ctx.text) {
            entities.insert("block", block);
            entities.insert("lot", lot);
        }
        Some(Detection::new(COMPLAINT_CONFIDENCE, entities))
    }
}

pub struct ParcelDetector;

impl Detector for ParcelDetector {
    fn name(&self) -> &'static str {
        "block_lot"
    }

    fn intent(&self) -> Intent {
        Intent::SearchParcel
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let (block, lot) = extract_block_lot(ctx.text)?;
        let mut entities = Entities::new();
        entities.insert("block", block);
        entities.insert("lot", lot);
        Some(Detection::new(PARCEL_CONFIDENCE, entities))
    }
}

pub struct ValidatePlansDetector;

impl Detector for ValidatePlansDetector {
    fn name(&self) -> &'static str {
        "validate_plans"
    }

    fn intent(&self) -> Intent {
        Intent::ValidatePlans
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let lower = ctx.text.to_lowercase();
        VALIDATE_PHRASES
            .iter()
            .any(|phrase| lower.contains(phrase))
            .then(|| Detection::new(VALIDATE_CONFIDENCE, Entities::new()))
    }
}

/// Suffixed addresses always count; a bare "number + word" only counts
/// behind an address phrase or in a short query.
pub struct AddressDetector;

impl Detector for AddressDetector {
    fn name(&self) -> &'static str {
        "address"
    }

    fn intent(&self) -> Intent {
        Intent::SearchAddress
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let address = extract_address(ctx.text, address_mode(ctx))?;
        let mut entities = Entities::new();
        insert_address(&mut entities, address);
        Some(Detection::new(ADDRESS_CONFIDENCE, entities))
    }
}

pub struct PersonDetector;

impl Detector for PersonDetector {
    fn name(&self) -> &'static str {
        "person"
    }

    fn intent(&self) -> Intent {
        Intent::SearchPerson
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let person = extract_person(ctx.text)?;
        let mut entities = Entities::new();
        entities.insert("person_name", person.name);
        if let Some(role) = person.role {
            entities.insert("role", role);
        }
        Some(Detection::new(PERSON_CONFIDENCE, entities))
    }
}

pub struct AnalyzeProjectDetector;

impl Detector for AnalyzeProjectDetector {
    fn name(&self) -> &'static str {
        "analyze_project"
    }

    fn intent(&self) -> Intent {
        Intent::AnalyzeProject
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let signals = count_signals(ctx.text);
        if signals == 0 || ctx.word_count < ctx.config.analyze_min_words {
            trace!(
                "Analyze tier declined: {} signals, {} words",
                signals,
                ctx.word_count
            );
            return None;
        }

        let mut entities = Entities::new();
        entities.insert("description", ctx.text);
        if let Some(cost) = extract_cost(ctx.text) {
            entities.insert("estimated_cost", cost);
        }
        if let Some(sqft) = extract_square_footage(ctx.text) {
            entities.insert("square_footage", sqft);
        }
        let matcher = NeighborhoodMatcher::new(ctx.similarity, ctx.config.similarity_cutoff);
        if let Some(neighborhood) = matcher.find(ctx.text, ctx.neighborhoods) {
            entities.insert("neighborhood", neighborhood);
        }
        Some(Detection::new(analyze_confidence(signals), entities))
    }
}

/// Always matches, echoing the query back.
pub struct GeneralQuestionDetector;

impl Detector for GeneralQuestionDetector {
    fn name(&self) -> &'static str {
        "general_question"
    }

    fn intent(&self) -> Intent {
        Intent::GeneralQuestion
    }

    fn try_match(&self, ctx: &DetectContext<'_>) -> Option<Detection> {
        let mut entities = Entities::new();
        entities.insert("query", ctx.text);
        Some(Detection::new(FALLBACK_CONFIDENCE, entities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::neighborhood::NormalizedLevenshtein;

    fn detect(detector: &dyn Detector, text: &str) -> Option<Detection> {
        let config = ClassifierConfig::default();
        let ctx = DetectContext::new(text, &[], &config, &NormalizedLevenshtein);
        detector.try_match(&ctx)
    }

    #[test]
    fn test_extract_complaint_number() {
        assert_eq!(
            extract_complaint_number("complaint 202312345 at my house"),
            Some("202312345".to_string())
        );
        assert_eq!(extract_complaint_number("complaint 192312345"), None);
        assert_eq!(extract_complaint_number("complaint 2023123456"), None);
    }

    #[test]
    fn test_extract_block_lot_separators() {
        assert_eq!(
            extract_block_lot("Block 2920, Lot 020"),
            Some(("2920".to_string(), "020".to_string()))
        );
        assert_eq!(
            extract_block_lot("block 3512/lot 001"),
            Some(("3512".to_string(), "001".to_string()))
        );
        assert_eq!(extract_block_lot("block 12 lot 1"), None);
    }

    #[test]
    fn test_complaint_detector_attaches_address_and_parcel() {
        let detection =
            detect(&ComplaintDetector, "violations at 123 Main St block 2920 lot 020").unwrap();
        assert_eq!(detection.entities.get_str("street_number"), Some("123"));
        assert_eq!(detection.entities.get_str("street_name"), Some("Main St"));
        assert_eq!(detection.entities.get_str("block"), Some("2920"));
        assert_eq!(detection.entities.get_str("lot"), Some("020"));
        assert!(!detection.entities.contains_key("complaint_number"));
    }

    #[test]
    fn test_complaint_detector_attaches_complaint_number() {
        let detection =
            detect(&ComplaintDetector, "complaint 202312345 at 123 Main St").unwrap();
        assert_eq!(
            detection.entities.get_str("complaint_number"),
            Some("202312345")
        );
        assert_eq!(detection.entities.get_str("street_number"), Some("123"));
        assert_eq!(detection.entities.get_str("street_name"), Some("Main St"));
    }

    #[test]
    fn test_complaint_detector_skips_years_as_addresses() {
        for text in [
            "violations since 2019 on the property",
            "complaints filed in 2021 about noise",
            "how many violations were issued across the city in 2019 Market area",
        ] {
            let detection = detect(&ComplaintDetector, text).unwrap();
            assert!(
                !detection.entities.contains_key("street_number"),
                "Unexpected address for '{}'",
                text
            );
        }
    }

    #[test]
    fn test_complaint_detector_ignores_keyword_as_street() {
        let detection = detect(&ComplaintDetector, "2 complaints").unwrap();
        assert!(detection.entities.is_empty());
    }

    #[test]
    fn test_validate_detector_has_no_entities() {
        let detection = detect(&ValidatePlansDetector, "Please check my plans").unwrap();
        assert!(detection.entities.is_empty());
        assert!(detect(&ValidatePlansDetector, "remodel my kitchen").is_none());
    }

    #[test]
    fn test_address_detector_bare_needs_guard() {
        assert!(detect(&AddressDetector, "456 Market").is_some());
        assert!(detect(
            &AddressDetector,
            "we have 456 Market people waiting on the corner for the parade today"
        )
        .is_none());
        assert!(detect(
            &AddressDetector,
            "find permits for the old storefront over at 456 Market please"
        )
        .is_some());
    }

    #[test]
    fn test_analyze_detector_needs_four_words() {
        assert!(detect(&AnalyzeProjectDetector, "kitchen remodel").is_none());
        let detection = detect(&AnalyzeProjectDetector, "remodel the kitchen soon").unwrap();
        assert_eq!(
            detection.entities.get_str("description"),
            Some("remodel the kitchen soon")
        );
        assert!(!detection.entities.contains_key("neighborhood"));
    }

    #[test]
    fn test_fallback_always_matches() {
        let detection = detect(&GeneralQuestionDetector, "what are the fees").unwrap();
        assert_eq!(detection.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(detection.entities.get_str("query"), Some("what are the fees"));
    }
}
