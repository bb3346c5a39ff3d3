use std::ops::Range;

use folio_core::CertificationEntry;
use folio_core::text_utils::truncate_chars;
use once_cell::sync::Lazy;
use regex::Regex;

static CERT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Cloud-certified phrasing: "AWS Certified Solutions Architect".
        r"(?i)\baws\s+(?:certified|solutions?\s+architect|developer|sysops)[^\n]{0,40}",
        // Vendor-named certification.
        r"(?i)\b(?:google|azure|oracle|cisco|comptia|pmp|scrum)[^\n]{0,50}(?:certified|certificate|certification)?",
        r"(?i)\b(?:certified|certificate)\s+[^\n]{10,50}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Certifications in template order. A match overlapping an earlier one is
/// the same certification and is skipped.
pub fn extract_certifications(text: &str, max: usize) -> Vec<CertificationEntry> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

    let mut taken: Vec<Range<usize>> = Vec::new();
    let mut certs = Vec::new();
    for re in CERT_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let span = m.range();
            if taken
                .iter()
                .any(|t| t.start < span.end && span.start < t.end)
            {
                continue;
            }
            taken.push(span);

            let name = m.as_str().trim();
            certs.push(CertificationEntry {
                name: truncate_chars(name, 60).to_string(),
                issuer: String::new(),
                year: YEAR_RE
                    .find(name)
                    .map(|y| y.as_str().to_string())
                    .unwrap_or_default(),
            });
        }
    }

    certs.truncate(max);
    certs
}
