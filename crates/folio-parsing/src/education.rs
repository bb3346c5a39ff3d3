use folio_core::EducationEntry;
use folio_core::text_utils::{title_case, truncate_chars};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::section::{Section, find_section};

const DEFAULT_INSTITUTION: &str = "University";

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor(?:'?s)?|master(?:'?s)?|ph\.?d|b\.?tech|m\.?tech|b\.e|m\.e|b\.?sc|m\.?sc|b\.a|m\.a|mba|bca|mca)\b[^\n]{0,60}",
    )
    .unwrap()
});

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(computer science|information technology|software engineering|electrical engineering|mechanical engineering)\b[^\n]{0,40}",
    )
    .unwrap()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

static INSTITUTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\bfrom|\bat|,)\s*([A-Z][A-Za-z\s]+(?:University|Institute|College|School))")
        .unwrap()
});

/// Degrees found in the Education section, or in the whole text when there
/// is no such section.
///
/// A field-of-study mention inside a degree line fills that entry's `field`;
/// one standing alone becomes its own entry.
pub fn extract_education(text: &str, max: usize) -> Vec<EducationEntry> {
    let search = find_section(text, Section::Education).unwrap_or(text);

    let mut spans = Vec::new();
    let mut entries: Vec<EducationEntry> = Vec::new();
    for m in DEGREE_RE.find_iter(search) {
        spans.push(m.range());
        entries.push(entry_for(search, m.start(), m.as_str()));
    }

    for caps in FIELD_RE.captures_iter(search) {
        let (Some(whole), Some(field)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let field_name = title_case(field.as_str());
        match spans.iter().position(|span| span.contains(&whole.start())) {
            Some(idx) => {
                if entries[idx].field.is_empty() {
                    entries[idx].field = field_name;
                }
            }
            None => {
                let mut entry = entry_for(search, whole.start(), whole.as_str());
                entry.field = field_name;
                entries.push(entry);
            }
        }
    }

    entries.truncate(max);
    entries
}

fn entry_for(search: &str, start: usize, matched: &str) -> EducationEntry {
    let degree = matched.trim();
    let year = YEAR_RE
        .find(degree)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    // Institution is looked for within 200 characters of the degree.
    let window = truncate_chars(&search[start..], 200);
    let institution = INSTITUTION_RE
        .captures(window)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| DEFAULT_INSTITUTION.to_string());

    EducationEntry {
        degree: truncate_chars(degree, 80).to_string(),
        institution,
        field: String::new(),
        year,
    }
}
