//! Street address normalization and extraction.
//!
//! Normalization is a fixed pipeline run before any address pattern:
//! strip the mailing tail, strip inline unit markers, then strip a bare
//! unit number left dangling after the street suffix.

use tracing::trace;

use super::patterns::{
    ADDRESS_BARE, ADDRESS_SIGNALS, ADDRESS_WITH_SUFFIX, MAILING_TAIL, MEASUREMENT_WORDS,
    STREET_STOPWORDS, TRAILING_UNIT, UNIT_MARKER,
};

/// Extracted street address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetAddress {
    pub street_number: String,
    pub street_name: String,
}

/// Which address strategies an extraction may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Only the "number + name + suffix" form
    SuffixOnly,
    /// Suffix form first, then the bare "number + word" form
    AllowBare,
}

/// Remove a trailing "San Francisco, CA 94118 US" style tail.
pub fn strip_mailing_tail(text: &str) -> String {
    MAILING_TAIL.replace(text, "").trim().to_string()
}

/// Remove inline "#4", "apt 2B", "suite 300", "unit 5", "fl 3" markers.
pub fn strip_unit(text: &str) -> String {
    UNIT_MARKER.replace_all(text, "").trim().to_string()
}

/// Remove a bare unit number following the street suffix ("146 Lake St 1425").
pub fn strip_trailing_unit(text: &str) -> String {
    TRAILING_UNIT.replace(text, "${1}").trim().to_string()
}

/// Full normalization pipeline, in order.
pub fn normalize_address(text: &str) -> String {
    let text = strip_mailing_tail(text);
    let text = strip_unit(&text);
    strip_trailing_unit(&text)
}

/// True when the text carries a phrase that introduces an address.
pub fn has_address_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    ADDRESS_SIGNALS.iter().any(|signal| lower.contains(signal))
}

/// Drop trailing prepositions and articles ("Market in the" -> "Market").
fn strip_trailing_stopwords(name: &str) -> String {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    while let Some(last) = words.last() {
        if STREET_STOPWORDS.contains(&last.to_lowercase().as_str()) {
            words.pop();
        } else {
            break;
        }
    }
    words.join(" ")
}

/// A street name is a measurement when it, or its first word, is a unit word.
fn is_measurement(name: &str) -> bool {
    let lower = name.to_lowercase();
    let first = lower.split_whitespace().next().unwrap_or_default();
    MEASUREMENT_WORDS.contains(lower.as_str()) || MEASUREMENT_WORDS.contains(first)
}

fn clean_match(number: &str, raw_name: &str) -> Option<StreetAddress> {
    let street_name = strip_trailing_stopwords(raw_name.trim());
    if street_name.is_empty() {
        return None;
    }
    if is_measurement(&street_name) {
        trace!("Rejected address '{} {}': measurement word", number, street_name);
        return None;
    }
    Some(StreetAddress {
        street_number: number.to_string(),
        street_name,
    })
}

/// "number + name + suffix" on already-normalized text.
fn match_with_suffix(text: &str) -> Option<StreetAddress> {
    let caps = ADDRESS_WITH_SUFFIX.captures(text)?;
    clean_match(caps.get(1)?.as_str(), caps.get(2)?.as_str())
}

/// True when the name opens with a preposition or article ("on the property").
fn starts_with_stopword(name: &str) -> bool {
    name.split_whitespace()
        .next()
        .is_some_and(|first| STREET_STOPWORDS.contains(&first.to_lowercase().as_str()))
}

/// Bare "number + word" on already-normalized text.
fn match_bare(text: &str) -> Option<StreetAddress> {
    let caps = ADDRESS_BARE.captures(text)?;
    let raw_name = caps.get(2)?.as_str();
    if starts_with_stopword(raw_name) {
        trace!("Rejected bare address '{}': not a street name", caps.get(0)?.as_str());
        return None;
    }
    clean_match(caps.get(1)?.as_str(), raw_name)
}

/// Normalize `text` and pull a street address out of it.
///
/// The bare form is only attempted in [`AddressMode::AllowBare`]; callers
/// decide when a bare number is trustworthy enough.
pub fn extract_address(text: &str, mode: AddressMode) -> Option<StreetAddress> {
    let normalized = normalize_address(text);
    if let Some(address) = match_with_suffix(&normalized) {
        return Some(address);
    }
    match mode {
        AddressMode::SuffixOnly => None,
        AddressMode::AllowBare => match_bare(&normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_mailing_tail() {
        assert_eq!(
            strip_mailing_tail("146 Lake St 1425 San Francisco, CA 94118 US"),
            "146 Lake St 1425"
        );
        assert_eq!(strip_mailing_tail("456 Market St, SF"), "456 Market St");
        assert_eq!(strip_mailing_tail("456 Market St, CA 94103"), "456 Market St");
        assert_eq!(strip_mailing_tail("456 Market St"), "456 Market St");
    }

    #[test]
    fn test_strip_unit() {
        assert_eq!(strip_unit("123 Main St #4"), "123 Main St");
        assert_eq!(strip_unit("123 Main St, Apt 2B"), "123 Main St");
        assert_eq!(strip_unit("500 Howard St Suite 300"), "500 Howard St");
        assert_eq!(strip_unit("123 Main St unit 7"), "123 Main St");
        assert_eq!(strip_unit("123 Main St fl 3"), "123 Main St");
        assert_eq!(strip_unit("a 5 unit building"), "a 5 unit building");
    }

    #[test]
    fn test_strip_trailing_unit() {
        assert_eq!(strip_trailing_unit("146 Lake St 1425"), "146 Lake St");
        assert_eq!(strip_trailing_unit("146 Lake St."), "146 Lake St.");
        assert_eq!(strip_trailing_unit("456 Market"), "456 Market");
    }

    #[test]
    fn test_normalize_pipeline() {
        assert_eq!(
            normalize_address("146 Lake St 1425 San Francisco, CA 94118 US"),
            "146 Lake St"
        );
    }

    #[test]
    fn test_with_suffix_numbered_street() {
        let address = extract_address("permits at 1200 16th Ave", AddressMode::SuffixOnly).unwrap();
        assert_eq!(address.street_number, "1200");
        assert_eq!(address.street_name, "16th Ave");

        let address = extract_address("55 3rd St.", AddressMode::SuffixOnly).unwrap();
        assert_eq!(address.street_name, "3rd St.");
    }

    #[test]
    fn test_bare_only_when_allowed() {
        assert!(extract_address("456 Market", AddressMode::SuffixOnly).is_none());

        let address = extract_address("456 Market", AddressMode::AllowBare).unwrap();
        assert_eq!(address.street_number, "456");
        assert_eq!(address.street_name, "Market");
    }

    #[test]
    fn test_trailing_stopwords_removed() {
        let address =
            extract_address("what's happening at 456 Market in the Mission", AddressMode::AllowBare)
                .unwrap();
        assert_eq!(address.street_name, "Market");
    }

    #[test]
    fn test_measurement_words_rejected() {
        assert!(extract_address("40 units", AddressMode::AllowBare).is_none());
        assert!(extract_address("3 bedrooms and 2 baths", AddressMode::AllowBare).is_none());
        assert!(extract_address("1500 sqft", AddressMode::AllowBare).is_none());
    }

    #[test]
    fn test_bare_name_starting_with_preposition_rejected() {
        for text in [
            "violations since 2019 on the property",
            "complaints filed in 2021 about noise",
        ] {
            assert!(
                extract_address(text, AddressMode::AllowBare).is_none(),
                "Unexpected address for '{}'",
                text
            );
        }
    }

    #[test]
    fn test_address_signal() {
        assert!(has_address_signal("Find permits near 12 Oak"));
        assert!(!has_address_signal("remodel my kitchen"));
    }
}
