//! Name, headline title and location.

use folio_core::text_utils::{title_case, truncate_chars};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Substrings that disqualify a line from being the candidate's name.
const NAME_SKIP_MARKERS: &[&str] = &[
    "resume",
    "cv",
    "curriculum",
    "@",
    "http",
    "phone",
    "email",
    "address",
];

/// Nouns that mark a line as a job title.
pub(crate) const ROLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "designer",
    "manager",
    "analyst",
    "architect",
];

pub const DEFAULT_TITLE: &str = "Software Developer";

static DEFAULT_TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:software|senior|junior|lead|full[- ]?stack|front[- ]?end|back[- ]?end|web|mobile|data|ml|ai|cloud|devops|qa|test|ui/?ux)\s*(?:developer|engineer|architect|designer|analyst|scientist|specialist)\b",
        r"\b(?:project|product|program|engineering|technical)\s*manager\b",
        r"\b(?:cto|ceo|vp|director|head)\b\s*(?:of)?\s*(?:engineering|technology|development)?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Pick the candidate's name from the first five non-empty lines.
///
/// A line qualifies when it has 1-5 words, every purely alphabetic word is
/// capitalized, and it is 4-49 characters long.
pub fn extract_name(lines: &[&str]) -> String {
    for line in lines.iter().take(5) {
        let lower = line.to_lowercase();
        if NAME_SKIP_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let capitalized = words
            .iter()
            .filter(|w| w.chars().all(char::is_alphabetic))
            .all(|w| w.chars().next().is_some_and(char::is_uppercase));
        let len = line.chars().count();
        if (1..=5).contains(&words.len()) && capitalized && len > 3 && len < 50 {
            return line.to_string();
        }
    }
    match lines.first() {
        Some(first) => truncate_chars(first, 40).to_string(),
        None => "Professional".to_string(),
    }
}

/// Headline role, e.g. "Senior Full-Stack Developer".
pub fn extract_title(text: &str, lines: &[&str]) -> String {
    extract_title_with_config(text, lines, &ParsingConfig::default())
}

/// Config-aware version of [`extract_title`].
pub(crate) fn extract_title_with_config(
    text: &str,
    lines: &[&str],
    config: &ParsingConfig,
) -> String {
    let lower = text.to_lowercase();
    let patterns = config.title_patterns.resolve(&DEFAULT_TITLE_PATTERNS);
    for re in &patterns {
        if let Some(m) = re.find(&lower) {
            let phrase = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            if !phrase.is_empty() {
                return title_case(&phrase);
            }
        }
    }

    for line in lines.iter().skip(1).take(5) {
        let line_lower = line.to_lowercase();
        if ROLE_KEYWORDS.iter().any(|kw| line_lower.contains(kw)) {
            return truncate_chars(line, 60).to_string();
        }
    }

    DEFAULT_TITLE.to_string()
}

/// City or region, or `""` when nothing recognizable is present.
///
/// A "City, Country" match yields just the city.
pub fn extract_location(text: &str) -> String {
    static LABELLED_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:location|address|city|based in)\b[: \t]*([A-Za-z ,\t]+)").unwrap()
    });
    static CITY_COUNTRY_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?),[ \t]*(?i:india|usa|uk|canada|australia|germany|france|singapore)\b",
        )
        .unwrap()
    });
    static CITY_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)\b(?:bangalore|bengaluru|mumbai|delhi|hyderabad|chennai|pune|kolkata|new york|san francisco|london|berlin|singapore)\b",
        )
        .unwrap()
    });

    let found = LABELLED_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty() && s.chars().any(char::is_alphabetic))
        .or_else(|| {
            CITY_COUNTRY_RE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim())
        })
        .or_else(|| CITY_RE.find(text).map(|m| m.as_str()));

    found
        .map(|loc| truncate_chars(loc, 50).trim().to_string())
        .unwrap_or_default()
}
