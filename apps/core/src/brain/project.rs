//! Project description signals and numeric entities.
//!
//! A query reads as a project description when it names at least one
//! construction action or topic and is long enough to be a sentence.
//! Cost and square footage parsing is defensive: anything that does not
//! parse cleanly is left out instead of failing the query.

use super::patterns::{ANALYZE_SIGNALS, COST, SQUARE_FOOTAGE};

/// Base confidence for a project description with no signals counted
const BASE_CONFIDENCE: f32 = 0.5;
/// Added per matched signal
const PER_SIGNAL: f32 = 0.1;
/// Upper bound for the analyze tier
const MAX_CONFIDENCE: f32 = 0.9;

/// Count how many signal words or phrases appear in the lowercased text.
pub fn count_signals(text: &str) -> usize {
    let lower = text.to_lowercase();
    ANALYZE_SIGNALS
        .iter()
        .filter(|signal| lower.contains(*signal))
        .count()
}

/// `min(0.5 + 0.1 * signals, 0.9)`
pub fn analyze_confidence(signal_count: usize) -> f32 {
    (BASE_CONFIDENCE + PER_SIGNAL * signal_count as f32).min(MAX_CONFIDENCE)
}

/// Parse "85,000" / "1500.50" into a number, ignoring separators.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Dollar amount such as "$85K", "$85,000" or "$1500".
pub fn extract_cost(text: &str) -> Option<f64> {
    let caps = COST.captures(text)?;
    let amount = parse_amount(caps.get(1)?.as_str())?;
    let multiplier = if caps.get(2).is_some() { 1000.0 } else { 1.0 };
    Some(amount * multiplier)
}

/// Square footage such as "1,200 sq ft", "800 sqft", "500 square feet" or "650sf".
pub fn extract_square_footage(text: &str) -> Option<f64> {
    let caps = SQUARE_FOOTAGE.captures(text)?;
    parse_amount(caps.get(1)?.as_str())
}
