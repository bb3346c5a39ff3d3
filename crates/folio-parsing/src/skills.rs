use std::collections::BTreeMap;

use folio_core::Skill;
use folio_core::text_utils::title_case;
use once_cell::sync::Lazy;
use regex::Regex;

/// Skill taxonomy in display order.
pub const SKILL_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            "react",
            "angular",
            "vue",
            "javascript",
            "typescript",
            "html",
            "css",
            "sass",
            "tailwind",
            "bootstrap",
            "jquery",
            "next.js",
            "redux",
            "webpack",
        ],
    ),
    (
        "backend",
        &[
            "python", "java", "node.js", "nodejs", "express", "django", "flask", "spring", "php",
            "ruby", "rails", "go", "golang", "rust", "c#", ".net", "fastapi",
        ],
    ),
    (
        "database",
        &[
            "mysql",
            "postgresql",
            "postgres",
            "mongodb",
            "redis",
            "elasticsearch",
            "oracle",
            "sql server",
            "sqlite",
            "dynamodb",
            "cassandra",
            "firebase",
        ],
    ),
    (
        "devops",
        &[
            "aws",
            "azure",
            "gcp",
            "docker",
            "kubernetes",
            "jenkins",
            "ci/cd",
            "terraform",
            "ansible",
            "linux",
            "git",
            "github actions",
            "gitlab",
        ],
    ),
    (
        "other",
        &[
            "machine learning",
            "deep learning",
            "nlp",
            "computer vision",
            "tensorflow",
            "pytorch",
            "agile",
            "scrum",
            "jira",
            "rest api",
            "graphql",
            "microservices",
        ],
    ),
];

/// Category used for the fallback skill when nothing matched.
pub const FALLBACK_CATEGORY: &str = "other";
pub const FALLBACK_SKILL: &str = "Problem Solving";

struct Keyword {
    word: &'static str,
    re: Regex,
}

static COMPILED: Lazy<Vec<(&'static str, Vec<Keyword>)>> = Lazy::new(|| {
    SKILL_TAXONOMY
        .iter()
        .map(|(category, words)| {
            let keywords = words
                .iter()
                .map(|&word| Keyword {
                    word,
                    re: Regex::new(&format!(r"\b{}\b", regex::escape(word))).unwrap(),
                })
                .collect();
            (*category, keywords)
        })
        .collect()
});

/// Display label for a keyword: acronyms upper-cased, the rest title-cased.
fn skill_label(word: &str) -> String {
    if word.chars().count() > 3 {
        title_case(word)
    } else {
        word.to_uppercase()
    }
}

/// Skills found in the text, by category, without the fallback entry.
///
/// Categories with no match are absent.
pub fn detect_skills(text: &str) -> BTreeMap<String, Vec<Skill>> {
    let lower = text.to_lowercase();
    let mut found = BTreeMap::new();
    for (category, keywords) in COMPILED.iter() {
        let skills: Vec<Skill> = keywords
            .iter()
            .filter(|k| lower.contains(k.word) && k.re.is_match(&lower))
            .map(|k| Skill::new(skill_label(k.word)))
            .collect();
        if !skills.is_empty() {
            found.insert(category.to_string(), skills);
        }
    }
    found
}

/// Skills by category, defaulting to a single generic skill when none matched.
pub fn extract_skills(text: &str) -> BTreeMap<String, Vec<Skill>> {
    let mut found = detect_skills(text);
    if found.is_empty() {
        found.insert(FALLBACK_CATEGORY.to_string(), vec![Skill::new(FALLBACK_SKILL)]);
    }
    found
}

/// Category names of `skills` in taxonomy order.
pub fn categories_in_order(skills: &BTreeMap<String, Vec<Skill>>) -> Vec<&'static str> {
    SKILL_TAXONOMY
        .iter()
        .map(|(category, _)| *category)
        .filter(|category| skills.get(*category).is_some_and(|s| !s.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &BTreeMap<String, Vec<Skill>>, category: &str) -> Vec<String> {
        skills
            .get(category)
            .map(|v| v.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_categorizes_keywords() {
        let skills = extract_skills("Skills: Python, React, AWS, PostgreSQL");
        assert_eq!(names(&skills, "backend"), vec!["Python"]);
        assert_eq!(names(&skills, "frontend"), vec!["React"]);
        assert_eq!(names(&skills, "devops"), vec!["AWS"]);
        assert_eq!(names(&skills, "database"), vec!["Postgresql"]);
        assert!(!skills.contains_key("other"));
        assert!(skills.values().flatten().all(|s| s.level == 80));
    }

    #[test]
    fn test_word_boundary_required() {
        // "javascript" must not also count as "java"; "going" is not "go".
        let skills = extract_skills("javascript and going places");
        assert_eq!(names(&skills, "frontend"), vec!["Javascript"]);
        assert!(!skills.contains_key("backend"));
    }

    #[test]
    fn test_multi_word_and_dotted_keywords() {
        let skills = extract_skills("Used Next.js, GitHub Actions and machine learning");
        assert_eq!(names(&skills, "frontend"), vec!["Next.Js"]);
        assert_eq!(names(&skills, "devops"), vec!["Github Actions"]);
        assert_eq!(names(&skills, "other"), vec!["Machine Learning"]);
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let skills = extract_skills("Gardening and cooking");
        assert_eq!(skills.len(), 1);
        assert_eq!(names(&skills, "other"), vec![FALLBACK_SKILL]);
        assert!(detect_skills("Gardening and cooking").is_empty());
    }

    #[test]
    fn test_category_never_exceeds_keyword_list() {
        let everything: String = SKILL_TAXONOMY
            .iter()
            .flat_map(|(_, words)| words.iter())
            .map(|w| format!("{w} {w}, "))
            .collect();
        let skills = extract_skills(&everything);
        for (category, words) in SKILL_TAXONOMY {
            assert!(names(&skills, category).len() <= words.len());
        }
    }

    #[test]
    fn test_categories_in_order() {
        let skills = extract_skills("docker and react");
        assert_eq!(categories_in_order(&skills), vec!["frontend", "devops"]);
    }
}
