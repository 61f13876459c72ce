//! # Brain Module
//!
//! Fast, non-LLM analysis of a permit search query.
//! Classifies the query BEFORE dispatch so the router can pick a handler.
//!
//! ## Components
//! - `patterns`: Regex and keyword tables, compiled once
//! - `address`: Address normalization pipeline and extraction
//! - `person`: Person/role extraction
//! - `project`: Project description signals, cost and square footage
//! - `neighborhood`: Fuzzy neighborhood matching
//! - `detector`: One detector per priority tier
//! - `classifier`: Main orchestrator (priority cascade)
//! - `intent`: Output data structures

pub mod address;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod intent;
pub mod neighborhood;
pub mod patterns;
pub mod person;
pub mod project;

// Re-export main types for convenience
pub use address::{
    extract_address, normalize_address, strip_mailing_tail, strip_trailing_unit, strip_unit,
    AddressMode, StreetAddress,
};
pub use classifier::IntentClassifier;
pub use config::ClassifierConfig;
pub use detector::{
    extract_block_lot, extract_complaint_number, extract_permit_number, DetectContext, Detection,
    Detector,
};
pub use intent::{Entities, EntityValue, Intent, IntentResult};
pub use neighborhood::{match_neighborhood, NeighborhoodMatcher, NormalizedLevenshtein, Similarity};
pub use person::{detect_role, extract_person, PersonQuery, Role};
pub use project::{extract_cost, extract_square_footage};
