use folio_core::ProjectEntry;
use folio_core::text_utils::{title_case, truncate_chars};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::section::{Section, find_section};

const TECH_KEYWORDS: &[&str] = &[
    "react",
    "node",
    "python",
    "java",
    "aws",
    "docker",
    "mongodb",
    "postgresql",
    "typescript",
    "javascript",
];

/// Blocks whose first line names another section are not projects.
const SECTION_WORDS: &[&str] = &["experience", "education", "skills"];

/// Only the first few blocks of the section are considered.
const MAX_BLOCKS: usize = 6;

pub fn extract_projects(text: &str, max: usize) -> Vec<ProjectEntry> {
    static BLOCK_SPLIT_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\n\s*\n|\n\s*[-•]\s*").unwrap());

    let Some(section) = find_section(text, Section::Projects) else {
        return Vec::new();
    };

    let mut projects = Vec::new();
    for block in BLOCK_SPLIT_RE.split(section).take(MAX_BLOCKS) {
        let block = block.trim();
        if block.chars().count() <= 20 {
            continue;
        }

        let mut lines = block.split('\n');
        let name = lines
            .next()
            .map(|l| {
                let l = l.trim_start_matches(['-', '•', ' ', '\t']).trim();
                truncate_chars(l, 60).to_string()
            })
            .unwrap_or_default();
        let rest = lines.collect::<Vec<_>>().join(" ");
        let description = truncate_chars(&rest, 200).to_string();

        let name_lower = name.to_lowercase();
        if name.is_empty() || SECTION_WORDS.iter().any(|w| name_lower.contains(w)) {
            continue;
        }

        let block_lower = block.to_lowercase();
        let technologies = TECH_KEYWORDS
            .iter()
            .filter(|kw| block_lower.contains(*kw))
            .take(4)
            .map(|kw| title_case(kw))
            .collect();

        projects.push(ProjectEntry {
            description: if description.is_empty() {
                format!("Project: {name}")
            } else {
                description
            },
            name,
            technologies,
        });
    }

    projects.truncate(max);
    projects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_split_on_bullets_and_blank_lines() {
        let text = "Projects\n- Budget Tracker web app\nBuilt with React and Node on AWS\n\
            - Chess engine written in Rust\n- tiny\nSkills: Rust";
        let projects = extract_projects(text, 6);
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Budget Tracker web app");
        assert_eq!(projects[0].description, "Built with React and Node on AWS");
        assert_eq!(projects[0].technologies, vec!["React", "Node", "Aws"]);
        assert_eq!(projects[1].name, "Chess engine written in Rust");
        assert_eq!(projects[1].description, "Project: Chess engine written in Rust");
        assert!(projects[1].technologies.is_empty());
    }

    #[test]
    fn test_technologies_capped() {
        let text = "Projects\nPlatform rewrite for payments\nreact node python java aws docker";
        let projects = extract_projects(text, 6);
        assert_eq!(projects[0].technologies.len(), 4);
    }

    #[test]
    fn test_skips_section_named_blocks() {
        let text = "Projects\nWork experience summary block\n\nA real project with details\nmore";
        let projects = extract_projects(text, 6);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "A real project with details");
    }

    #[test]
    fn test_no_section() {
        assert!(extract_projects("Jane Doe\nSkills: Rust", 6).is_empty());
    }
}
