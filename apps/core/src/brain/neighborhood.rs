//! Fuzzy neighborhood matching.
//!
//! Two passes over the caller's neighborhood list:
//! 1. Case-insensitive containment, longest name first, so "Mission Bay"
//!    beats "Mission".
//! 2. Per-word similarity: each text word of 3+ characters is scored
//!    against every name; the first word (in text order) whose best score
//!    reaches the cutoff decides the match.

/// Words shorter than this are never fuzzy-matched
pub const MIN_WORD_LEN: usize = 3;

/// Default similarity needed for a fuzzy match
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// String similarity in `[0.0, 1.0]`, 1.0 meaning identical.
pub trait Similarity: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Levenshtein distance normalized by the longer string's length
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Matches neighborhood mentions against a supplied list of canonical names
pub struct NeighborhoodMatcher<'s> {
    similarity: &'s dyn Similarity,
    cutoff: f64,
}

impl<'s> NeighborhoodMatcher<'s> {
    pub fn new(similarity: &'s dyn Similarity, cutoff: f64) -> Self {
        Self { similarity, cutoff }
    }

    /// Resolve a neighborhood mentioned in `text`, returning the canonical name.
    pub fn find<'n>(&self, text: &str, neighborhoods: &[&'n str]) -> Option<&'n str> {
        if neighborhoods.is_empty() {
            return None;
        }
        let lower = text.to_lowercase();
        self.find_contained(&lower, neighborhoods)
            .or_else(|| self.find_similar(&lower, neighborhoods))
    }

    fn find_contained<'n>(&self, lower: &str, neighborhoods: &[&'n str]) -> Option<&'n str> {
        let mut by_length: Vec<&'n str> = neighborhoods.to_vec();
        // Stable sort keeps list order among equal lengths.
        by_length.sort_by_key(|name| std::cmp::Reverse(name.chars().count()));
        by_length.into_iter().find(|name| {
            let needle = name.trim().to_lowercase();
            !needle.is_empty() && lower.contains(&needle)
        })
    }

    fn find_similar<'n>(&self, lower: &str, neighborhoods: &[&'n str]) -> Option<&'n str> {
        let candidates: Vec<(String, &'n str)> = neighborhoods
            .iter()
            .map(|name| (name.trim().to_lowercase(), *name))
            .collect();

        lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
            .filter(|word| word.chars().count() >= MIN_WORD_LEN)
            .find_map(|word| self.best_for_word(word, &candidates))
    }

    fn best_for_word<'n>(&self, word: &str, candidates: &[(String, &'n str)]) -> Option<&'n str> {
        let mut best: Option<(f64, &'n str)> = None;
        for (lowered, canonical) in candidates {
            let score = self.similarity.ratio(word, lowered);
            if score < self.cutoff {
                continue;
            }
            // Strictly greater: ties go to the earlier name in the list.
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, *canonical));
            }
        }
        best.map(|(_, name)| name)
    }
}

/// Match with the default similarity and cutoff.
pub fn match_neighborhood<'n>(text: &str, neighborhoods: &[&'n str]) -> Option<&'n str> {
    NeighborhoodMatcher::new(&NormalizedLevenshtein, DEFAULT_CUTOFF).find(text, neighborhoods)
}
