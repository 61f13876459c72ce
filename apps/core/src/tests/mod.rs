//! Test Module
//!
//! Cross-module test suite for the permit search brain.
//!
//! ## Test Categories
//! - `brain_tests`: End-to-end classification scenarios, tier priority,
//!   entity extraction through `classify`, concurrency and serialization


use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test writer so debug logs show on failure.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}
