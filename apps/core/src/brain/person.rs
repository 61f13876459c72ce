//! Person search extraction.
//!
//! Four phrasing templates are tried in order; the first that matches
//! owns the query. The role is read from the whole text (canonical word
//! or a known misspelling) and cut out of the captured name before the
//! name is cleaned.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use super::patterns::{
    LEADING_NOISE, PERSON_ABOUT, PERSON_BY, PERSON_FIND, PERSON_POSSESSIVE, ROLES, ROLE_TYPOS,
    ROLE_WORD, TRAILING_NOISE,
};

/// Templates in the order they are tried.
static TEMPLATES: [&LazyLock<Regex>; 4] =
    [&PERSON_BY, &PERSON_FIND, &PERSON_POSSESSIVE, &PERSON_ABOUT];

/// Names shorter than this after cleaning are not names.
const MIN_NAME_LEN: usize = 2;

/// A detected professional role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Canonical role ("architect", "consultant", ...)
    pub canonical: &'static str,
    /// The word as the user typed it
    pub surface: String,
}

/// Extracted person search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonQuery {
    pub name: String,
    pub role: Option<&'static str>,
}

/// Find a role anywhere in `text`: canonical words first, then the typo table.
pub fn detect_role(text: &str) -> Option<Role> {
    if let Some(m) = ROLE_WORD.captures(text) {
        let word = m.get(1)?.as_str().to_lowercase();
        let canonical = ROLES
            .iter()
            .copied()
            .find(|role| *role == word)?;
        return Some(Role {
            canonical,
            surface: m.get(0)?.as_str().to_string(),
        });
    }

    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .find_map(|word| {
            ROLE_TYPOS.get(word.to_lowercase().as_str()).map(|&canonical| Role {
                canonical,
                surface: word.to_string(),
            })
        })
}

/// Remove every whole-word occurrence of `word` from `name`.
fn remove_word(name: &str, word: &str) -> String {
    name.split_whitespace()
        .filter(|w| {
            let bare = w.trim_matches(|c: char| !c.is_alphanumeric());
            !bare.eq_ignore_ascii_case(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `word` off the front of `text` when it is a whole word there.
fn strip_word_prefix<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let head = text.get(..word.len())?;
    let tail = &text[word.len()..];
    if head.eq_ignore_ascii_case(word) && (tail.is_empty() || tail.starts_with(char::is_whitespace)) {
        Some(tail.trim_start())
    } else {
        None
    }
}

fn strip_leading_noise(name: &str) -> &str {
    let mut rest = name.trim();
    while let Some(stripped) = LEADING_NOISE
        .iter()
        .find_map(|noise| strip_word_prefix(rest, noise))
    {
        rest = stripped;
    }
    rest
}

fn trim_punctuation(name: &str) -> &str {
    name.trim_end_matches(|c: char| !c.is_alphanumeric())
}

fn strip_possessive(name: &str) -> &str {
    name.strip_suffix("'s")
        .or_else(|| name.strip_suffix("’s"))
        .or_else(|| name.strip_suffix("'S"))
        .unwrap_or(name)
}

fn strip_trailing_noise(name: &str) -> String {
    let mut words: Vec<&str> = name.split_whitespace().collect();
    while let Some(last) = words.last() {
        let bare = trim_punctuation(last).to_lowercase();
        if TRAILING_NOISE.contains(&bare.as_str()) {
            words.pop();
        } else {
            break;
        }
    }
    words.join(" ")
}

/// Clean a raw captured name: noise words, punctuation, possessive.
pub fn clean_name(raw: &str) -> String {
    let name = strip_leading_noise(raw);
    let name = strip_trailing_noise(name);
    let name = trim_punctuation(&name);
    strip_possessive(name).trim().to_string()
}

/// Match the person templates against `text`.
pub fn extract_person(text: &str) -> Option<PersonQuery> {
    let captured = TEMPLATES
        .iter()
        .find_map(|template| template.captures(text))
        .and_then(|caps| caps.get(1))?
        .as_str();

    let role = detect_role(text);
    let without_role = match &role {
        Some(role) => remove_word(captured, &role.surface),
        None => captured.to_string(),
    };

    let name = clean_name(&without_role);
    if name.chars().count() < MIN_NAME_LEN {
        trace!("Rejected person match '{}': name too short", captured);
        return None;
    }

    Some(PersonQuery {
        name,
        role: role.map(|r| r.canonical),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_by_template() {
        let person = extract_person("permits by John Smith").unwrap();
        assert_eq!(person.name, "John Smith");
        assert_eq!(person.role, None);
    }

    #[test]
    fn test_find_with_role() {
        let person = extract_person("find architect Jane Doe").unwrap();
        assert_eq!(person.name, "Jane Doe");
        assert_eq!(person.role, Some("architect"));
    }

    #[test]
    fn test_possessive_template() {
        let person = extract_person("Amy Lee's projects").unwrap();
        assert_eq!(person.name, "Amy Lee");
    }

    #[test]
    fn test_show_me_possessive() {
        let person = extract_person("show me Amy Lee's projects").unwrap();
        assert_eq!(person.name, "Amy Lee");
    }

    #[test]
    fn test_who_is_template() {
        let person = extract_person("who is Bob Builder?").unwrap();
        assert_eq!(person.name, "Bob Builder");
    }

    #[test]
    fn test_typo_role_is_corrected_and_removed() {
        let person = extract_person("tell me about expiditer Maria Lopez").unwrap();
        assert_eq!(person.name, "Maria Lopez");
        assert_eq!(person.role, Some("consultant"));

        let role = detect_role("work by the architech Sam Wu").unwrap();
        assert_eq!(role.canonical, "architect");
        assert_eq!(role.surface, "architech");
    }

    #[test]
    fn test_plural_role_word() {
        let role = detect_role("find contractors").unwrap();
        assert_eq!(role.canonical, "contractor");
        assert_eq!(role.surface, "contractors");
    }

    #[test]
    fn test_preposition_left_by_role_is_stripped() {
        let person = extract_person("find architects at Studio Kim").unwrap();
        assert_eq!(person.name, "Studio Kim");
        assert_eq!(person.role, Some("architect"));

        let person = extract_person("find architects in the Mission").unwrap();
        assert_eq!(person.name, "Mission");
    }

    #[test]
    fn test_short_name_is_rejected() {
        assert!(extract_person("find me").is_none());
        assert!(extract_person("who is X").is_none());
        assert!(extract_person("find the contractor").is_none());
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("info on Acme Builders permits."), "Acme Builders");
        assert_eq!(clean_name("the Smith's"), "Smith");
    }
}
