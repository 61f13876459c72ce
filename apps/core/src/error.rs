use thiserror::Error;

/// Crate-wide error type.
///
/// Classification itself never fails; these only surface when building a
/// classifier from configuration or parsing values coming from outside.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Represents configuration-related errors (e.g. a cutoff out of range).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g. an unknown intent tag).
    #[error("Validation error: {0}")]
    Validation(String),
}
