//! Pattern library.
//!
//! Every regex and keyword table the detectors use, compiled once at
//! startup. Patterns stick to what the `regex` crate supports (no
//! lookaround, no backreferences), so matching stays linear in the input.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// Compile patterns once at startup.
// A pattern that fails to compile is a bug, so expect() here is fine.

/// Permit numbers: a 9-15 digit run, or one letter followed by 6+ digits.
pub static PERMIT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{9,15}|[A-Za-z]\d{6,})\b").expect("Invalid regex: permit number")
});

/// Complaint numbers: 9 digits starting with the "20" year prefix.
pub static COMPLAINT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(20\d{7})\b").expect("Invalid regex: complaint number")
});

pub static COMPLAINT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(complaints?|violations?|enforcement|cited|citations?|abated|abatement|nov|notices? of violation)\b",
    )
    .expect("Invalid regex: complaint keywords")
});

pub static BLOCK_LOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bblock\s+(\d{3,5})\s*[,/]?\s*lot\s+(\d{1,4})\b")
        .expect("Invalid regex: block/lot")
});

/// Phrases that ask for plan set validation (substring match on lowercased text).
pub const VALIDATE_PHRASES: &[&str] = &[
    "validate",
    "validation",
    "check my plans",
    "check my plan set",
    "check plans",
    "plan check",
    "epr compliance",
    "epr check",
    "upload pdf",
    "upload my pdf",
    "upload plans",
    "review my plans",
    "are my plans compliant",
];

/// Street suffix alternation shared by the address patterns.
const SUFFIX_ALT: &str = "street|st|avenue|ave|boulevard|blvd|road|rd|drive|dr|way|court|ct|lane|ln|place|pl|terrace|ter";

/// Number, street name (possibly "16th"/"3rd"), then a known suffix.
pub static ADDRESS_WITH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,5}})\s+((?:\d{{1,3}}(?:st|nd|rd|th)|[a-z][a-z'\-]*)(?:\s+[a-z][a-z'\-]*){{0,3}}?\s+(?:{SUFFIX_ALT})\b\.?)"
    ))
    .expect("Invalid regex: address with suffix")
});

/// Bare "number + word" form, only tried behind extra guards.
pub static ADDRESS_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,5})\s+([a-z][a-z'\-]*(?:\s+[a-z][a-z'\-]*){0,2})")
        .expect("Invalid regex: bare address")
});

/// Trailing "San Francisco, CA 94118 US" style mailing tails.
pub static MAILING_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[,\s]+(?:(?:san\s+francisco|sf)\b(?:[,\s]+(?:ca|california)\b)?(?:[,\s]+\d{5}(?:-\d{4})?)?|(?:ca|california)[,\s]+\d{5}(?:-\d{4})?)(?:[,\s]+(?:usa|us|united\s+states(?:\s+of\s+america)?)\b)?[\s,.]*$",
    )
    .expect("Invalid regex: mailing tail")
});

/// Inline unit markers: "#4", "apt 2B", "suite 300", "unit 5", "fl 3".
pub static UNIT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:,\s*|\s+)(?:#\s*|(?:apt|apartment|suite|ste|unit|fl|floor)\b\.?\s*#?\s*)(?:[a-z0-9\-]*\d[a-z0-9\-]*|[a-z])\b",
    )
    .expect("Invalid regex: unit marker")
});

/// A bare 1-5 digit number right after a street suffix at the end of the text.
pub static TRAILING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b((?:{SUFFIX_ALT})\.?)\s+#?\d{{1,5}}\s*$"))
        .expect("Invalid regex: trailing unit")
});

/// Phrases that make a bare "number + word" worth reading as an address.
pub const ADDRESS_SIGNALS: &[&str] = &[
    "permits at",
    "permits for",
    "permit at",
    "find permits",
    "show permits",
    "what's happening at",
    "whats happening at",
    "what is happening at",
    "activity at",
    "property at",
    "address",
];

/// Words that, as a "street name", mean the number was a quantity.
pub static MEASUREMENT_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "sqft", "sq", "ft", "feet", "foot", "square", "sf", "cost", "costs", "dollars", "bucks",
        "k", "units", "unit", "stories", "story", "floors", "floor", "rooms", "room", "bedrooms",
        "bedroom", "bathrooms", "bathroom", "beds", "bed", "baths", "bath", "years", "year",
        "months", "month", "weeks", "week", "days", "day", "percent", "people", "permits",
        "projects", "windows", "doors", "panels", "spaces", "parking", "lot", "lots", "block",
    ]
    .into_iter()
    .collect()
});

/// Prepositions and articles: trimmed off the tail of a street name, and
/// never the first word of a bare one.
pub const STREET_STOPWORDS: &[&str] = &[
    "in", "at", "for", "near", "of", "the", "on", "by", "to", "a", "an", "and", "with", "from",
    "about", "since", "after", "before", "during", "over", "under", "into", "please",
];

pub static PERSON_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:projects?|permits?|work|portfolio)\s+(?:by|for|of)\s+(.+)$")
        .expect("Invalid regex: person by")
});

pub static PERSON_FIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:find|search(?:\s+for)?|show(?:\s+me)?|look\s*up)\s+(.+)$")
        .expect("Invalid regex: person find")
});

pub static PERSON_POSSESSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([a-z][a-z.\-]*(?:\s+[a-z][a-z.\-]*){0,2})['’]s\s+(?:projects?|permits?|work|portfolio|jobs?)\b",
    )
    .expect("Invalid regex: person possessive")
});

pub static PERSON_ABOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:who\s+is|tell\s+me\s+about|info(?:rmation)?\s+on|details\s+on)\s+(.+)$")
        .expect("Invalid regex: person about")
});

/// Canonical professional roles.
pub const ROLES: &[&str] = &[
    "contractor",
    "architect",
    "engineer",
    "consultant",
    "owner",
    "designer",
];

pub static ROLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(contractor|architect|engineer|consultant|owner|designer)s?\b")
        .expect("Invalid regex: role word")
});

/// Common misspellings mapped to their canonical role.
pub static ROLE_TYPOS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("expiditer", "consultant"),
        ("expediter", "consultant"),
        ("expeditor", "consultant"),
        ("expidator", "consultant"),
        ("architech", "architect"),
        ("archetect", "architect"),
        ("architecht", "architect"),
        ("contracter", "contractor"),
        ("contracor", "contractor"),
        ("enginer", "engineer"),
        ("engeneer", "engineer"),
        ("desginer", "designer"),
        ("designor", "designer"),
    ])
});

/// Words stripped from the front of a captured name.
pub const LEADING_NOISE: &[&str] = &[
    "info on",
    "information on",
    "details on",
    "details about",
    "me",
    "the",
    "a",
    "an",
    "about",
    "for",
    "all",
    "in",
    "at",
    "from",
    "near",
    "on",
    "of",
    "by",
    "with",
];

/// Words stripped from the end of a captured name.
pub const TRAILING_NOISE: &[&str] = &[
    "projects",
    "project",
    "permits",
    "permit",
    "work",
    "portfolio",
    "jobs",
    "job",
    "details",
    "info",
];

/// Action verbs and project topics that mark a project description.
pub const ANALYZE_SIGNALS: &[&str] = &[
    "renovate",
    "renovation",
    "remodel",
    "build",
    "construct",
    "construction",
    "convert",
    "conversion",
    "install",
    "demolish",
    "demolition",
    "expand",
    "expansion",
    "extend",
    "kitchen",
    "bathroom",
    "adu",
    "accessory dwelling",
    "in-law",
    "garage",
    "deck",
    "addition",
    "commercial",
    "restaurant",
    "storefront",
    "solar",
    "seismic",
    "retrofit",
    "foundation",
    "change of use",
    "tenant improvement",
];

pub static COST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)([kK])?\b").expect("Invalid regex: cost")
});

pub static SQUARE_FOOTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)\s*(?:sqft|sq\.?\s*ft|square\s+f(?:ee|oo)t|sf)\b",
    )
    .expect("Invalid regex: square footage")
});
