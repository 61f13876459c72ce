//! Classifier tuning knobs.

use serde::{Deserialize, Serialize};

use super::neighborhood::DEFAULT_CUTOFF;
use crate::error::EngineError;

/// Thresholds used by the detectors.
///
/// Deserializable so a host can keep it in its own config file; every
/// field has a default, so a partial table is fine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum similarity for a fuzzy neighborhood match
    pub similarity_cutoff: f64,
    /// Queries with at most this many words may be read as bare addresses
    pub short_query_max_words: usize,
    /// Project descriptions need at least this many words
    pub analyze_min_words: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            similarity_cutoff: DEFAULT_CUTOFF,
            short_query_max_words: 8,
            analyze_min_words: 4,
        }
    }
}

impl ClassifierConfig {
    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.similarity_cutoff > 0.0 && self.similarity_cutoff <= 1.0) {
            return Err(EngineError::Config(format!(
                "similarity_cutoff must be in (0, 1], got {}",
                self.similarity_cutoff
            )));
        }
        if self.short_query_max_words == 0 {
            return Err(EngineError::Config(
                "short_query_max_words must be at least 1".to_string(),
            ));
        }
        if self.analyze_min_words == 0 {
            return Err(EngineError::Config(
                "analyze_min_words must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
