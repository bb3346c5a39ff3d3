use std::collections::BTreeMap;

use folio_core::Skill;
use folio_core::text_utils::title_case;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::skills::categories_in_order;

const DEFAULT_HIGHLIGHTS: &[&str] = &["Problem Solver", "Team Player", "Quick Learner"];

/// A summary paragraph, or `None` when the resume has none.
///
/// Prefers the line after a summary/objective/profile/about heading, then
/// the first 50-250 character sentence that starts a line.
pub fn extract_summary(text: &str) -> Option<String> {
    static HEADED_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(?:summary|objective|profile|about)[:\s]*\n([^\n]{50,300})").unwrap()
    });
    static SENTENCE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?im)^([a-z][^.\n]{50,250}\.)").unwrap());

    [&*HEADED_RE, &*SENTENCE_RE]
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Bio used when the resume has no summary of its own.
pub fn synthesize_bio(title: &str, detected: &BTreeMap<String, Vec<Skill>>) -> String {
    let areas = categories_in_order(detected);
    let expertise = if areas.is_empty() {
        "software development".to_string()
    } else {
        areas.iter().take(3).copied().collect::<Vec<_>>().join(", ")
    };
    format!("{title} with expertise in {expertise}.")
}

/// Short bullet points for the "about" block.
pub fn extract_highlights(
    text: &str,
    skills: &BTreeMap<String, Vec<Skill>>,
    max: usize,
) -> Vec<String> {
    static YEARS_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)(\d+)\+?\s*years?\s*(?:of)?\s*experience").unwrap());

    let mut highlights: Vec<String> = categories_in_order(skills)
        .into_iter()
        .filter_map(|category| {
            skills
                .get(category)
                .map(|list| format!("{}: {}+ technologies", title_case(category), list.len()))
        })
        .collect();

    if let Some(caps) = YEARS_RE.captures(text) {
        highlights.push(format!("{}+ years of experience", &caps[1]));
    }

    let lower = text.to_lowercase();
    if lower.contains("master") || lower.contains("ph.d") {
        highlights.push("Advanced Degree".to_string());
    } else if lower.contains("bachelor") || lower.contains("b.tech") {
        highlights.push("Bachelor's Degree".to_string());
    }

    highlights.truncate(max);
    if highlights.is_empty() {
        DEFAULT_HIGHLIGHTS.iter().map(|s| s.to_string()).collect()
    } else {
        highlights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::extract_skills;

    #[test]
    fn test_summary_after_heading() {
        let text = "Jane\nProfessional Summary:\nBackend engineer focused on storage engines and distributed consensus.\nSkills";
        assert_eq!(
            extract_summary(text).as_deref(),
            Some("Backend engineer focused on storage engines and distributed consensus.")
        );
    }

    #[test]
    fn test_summary_first_long_sentence() {
        let text = "Jane\nI build reliable data pipelines and care deeply about observability.";
        assert_eq!(
            extract_summary(text).as_deref(),
            Some("I build reliable data pipelines and care deeply about observability.")
        );
        assert_eq!(extract_summary("Jane\nShort line."), None);
    }

    #[test]
    fn test_synthesized_bio() {
        let skills = crate::skills::detect_skills("react, python, docker, jira");
        assert_eq!(
            synthesize_bio("Software Engineer", &skills),
            "Software Engineer with expertise in frontend, backend, devops."
        );
        assert_eq!(
            synthesize_bio("Analyst", &BTreeMap::new()),
            "Analyst with expertise in software development."
        );
    }

    #[test]
    fn test_highlights() {
        let text = "8+ years of experience with Python and React. Master of Science.";
        let skills = extract_skills(text);
        let highlights = extract_highlights(text, &skills, 5);
        assert_eq!(
            highlights,
            vec![
                "Frontend: 1+ technologies",
                "Backend: 1+ technologies",
                "8+ years of experience",
                "Advanced Degree",
            ]
        );
    }

    #[test]
    fn test_highlights_cap_and_default() {
        let text = "react python mysql docker jira 3 years experience bachelor";
        let skills = extract_skills(text);
        assert_eq!(extract_highlights(text, &skills, 5).len(), 5);
        assert_eq!(
            extract_highlights("", &BTreeMap::new(), 5),
            vec!["Problem Solver", "Team Player", "Quick Learner"]
        );
    }
}
