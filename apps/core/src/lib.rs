//! Permit search query brain.
//!
//! Turns a raw search-box string into an [`IntentResult`]: one intent, a
//! heuristic confidence and the entities the matching handler needs
//! (permit number, address, block/lot, person, cost, ...). Pure pattern
//! matching, no model, no I/O; safe to call from any number of threads.
//!
//! ```
//! use permit_search_core::{classify, Intent};
//!
//! let result = classify("block 3512 lot 001", None::<&[&str]>);
//! assert_eq!(result.intent, Intent::SearchParcel);
//! assert_eq!(result.entities.get_str("block"), Some("3512"));
//! ```

pub mod brain;
pub mod error;

#[cfg(test)]
mod tests;

use std::sync::LazyLock;

pub use brain::{ClassifierConfig, Entities, EntityValue, Intent, IntentClassifier, IntentResult};
pub use error::EngineError;

/// Process-wide classifier with default thresholds
static DEFAULT_CLASSIFIER: LazyLock<IntentClassifier> = LazyLock::new(IntentClassifier::new);

/// Classify `text` with the default classifier.
///
/// `neighborhoods` is the caller's list of canonical neighborhood names;
/// `None` or an empty list skips neighborhood extraction.
pub fn classify<S: AsRef<str>>(text: &str, neighborhoods: Option<&[S]>) -> IntentResult {
    DEFAULT_CLASSIFIER.classify(text, neighborhoods)
}
