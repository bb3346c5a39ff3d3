use folio_core::ExperienceEntry;
use folio_core::text_utils::truncate_chars;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::section::{Section, find_section};

/// Words that mark one side of an "A - B" job line as the role.
const ROLE_WORDS: &[&str] = &[
    "developer",
    "engineer",
    "designer",
    "manager",
    "analyst",
    "architect",
    "consultant",
    "scientist",
    "specialist",
    "intern",
    "lead",
];

const FALLBACK_TITLE: &str = "Software Developer";

fn mentions_role(s: &str) -> bool {
    let lower = s.to_lowercase();
    ROLE_WORDS.iter().any(|w| lower.contains(w))
}

/// Work history, newest entries as they appear, at most `max` entries.
pub fn extract_experience(text: &str, max: usize) -> Vec<ExperienceEntry> {
    let mut entries = find_section(text, Section::Experience)
        .map(parse_job_lines)
        .unwrap_or_default();

    if entries.is_empty() {
        entries = scan_employers(text);
    }

    entries.truncate(max);
    entries
}

/// Parse "Title - Company" (or "Company - Title") lines followed by an
/// optional year range on the next line.
fn parse_job_lines(section: &str) -> Vec<ExperienceEntry> {
    static JOB_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)([A-Z][^\n]{5,60})\s*[-–|]\s*([A-Z][^\n]{3,40})\s*\n\s*(?:(\d{4}\s*[-–]\s*(?:\d{4}|present|current)))?",
        )
        .unwrap()
    });

    let mut entries = Vec::new();
    for caps in JOB_RE.captures_iter(section) {
        let (Some(whole), Some(left), Some(right)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let left = left.as_str().trim();
        let right = right.as_str().trim();
        let (title, company) = if mentions_role(right) && !mentions_role(left) {
            (right, left)
        } else {
            (left, right)
        };
        let period = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");

        // Description runs to the next blank line, else the next 200 characters.
        let after = &section[whole.end()..];
        let raw_desc = match after.find("\n\n") {
            Some(0) | None => truncate_chars(after, 200),
            Some(end) => &after[..end],
        };
        let desc = raw_desc.trim();

        entries.push(ExperienceEntry {
            company: company.to_string(),
            title: title.to_string(),
            period: period.to_string(),
            description: if desc.is_empty() {
                format!("Worked as {title}")
            } else {
                truncate_chars(desc, 300).to_string()
            },
        });
    }
    entries
}

/// Fallback: "at Company" / "@ Company" mentions paired positionally with
/// year ranges found anywhere in the text.
fn scan_employers(text: &str) -> Vec<ExperienceEntry> {
    static COMPANY_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:\bat|@)\s+([A-Z][A-Za-z\s&]+?)(?:\s+|,|\n)").unwrap());
    static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(\d{4})\s*[-–]\s*(\d{4}|present|current)").unwrap()
    });

    let ranges: Vec<String> = RANGE_RE
        .captures_iter(text)
        .map(|c| format!("{} - {}", &c[1], &c[2]))
        .collect();

    COMPANY_RE
        .captures_iter(text)
        .take(4)
        .enumerate()
        .map(|(i, caps)| {
            let company = caps[1].trim().to_string();
            ExperienceEntry {
                description: format!("Worked at {company}"),
                company,
                title: FALLBACK_TITLE.to_string(),
                period: ranges.get(i).cloned().unwrap_or_default(),
            }
        })
        .collect()
}
