use folio_core::{About, Links, Personal, PortfolioRecord};

use crate::config::ParsingConfig;
use crate::quality::{self, GarbageReason};
use crate::{certifications, contact, education, experience, identity, projects, skills, summary};

/// A configurable resume-to-portfolio extractor.
///
/// Holds a [`ParsingConfig`] and runs every field extractor over sanitized
/// text. Each extractor either finds its field or yields the field's
/// default; none of them can fail the whole record.
pub struct PortfolioExtractor {
    config: ParsingConfig,
}

impl Default for PortfolioExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Run the quality gate with this extractor's thresholds.
    pub fn check(&self, text: &str) -> Result<(), GarbageReason> {
        quality::check_with_config(text, &self.config)
    }

    /// Gate the text first; unusable text yields the placeholder record.
    pub fn extract_or_placeholder(&self, text: &str, fallback_email: Option<&str>) -> PortfolioRecord {
        match self.check(text) {
            Ok(()) => self.extract(text, fallback_email),
            Err(reason) => {
                tracing::info!(%reason, "text rejected, returning placeholder portfolio");
                PortfolioRecord::placeholder(fallback_email)
            }
        }
    }

    /// Build a portfolio from sanitized text.
    ///
    /// `fallback_email` is used only when the text contains no email address.
    pub fn extract(&self, text: &str, fallback_email: Option<&str>) -> PortfolioRecord {
        let cfg = &self.config;
        let lines: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let email = contact::extract_email(text)
            .or_else(|| fallback_email.map(|e| e.trim().to_string()))
            .unwrap_or_default();
        let phone = contact::extract_phone(text).unwrap_or_default();
        let name = identity::extract_name(&lines);
        let title = identity::extract_title_with_config(text, &lines, cfg);
        let location = identity::extract_location(text);

        let detected = skills::detect_skills(text);
        let bio = summary::extract_summary(text)
            .unwrap_or_else(|| summary::synthesize_bio(&title, &detected));
        let skills = skills::extract_skills(text);
        let highlights = summary::extract_highlights(text, &skills, cfg.max_highlights);

        let tagline = if location.is_empty() {
            title.clone()
        } else {
            format!("{title} | {location}")
        };

        let record = PortfolioRecord {
            personal: Personal {
                name,
                title,
                tagline,
                email: email.clone(),
                phone,
                location,
                bio: bio.clone(),
            },
            about: About {
                headline: "About Me".to_string(),
                description: bio,
                highlights,
            },
            education: education::extract_education(text, cfg.max_education),
            experience: experience::extract_experience(text, cfg.max_experience),
            projects: projects::extract_projects(text, cfg.max_projects),
            certifications: certifications::extract_certifications(text, cfg.max_certifications),
            skills,
            links: Links {
                github: contact::extract_github(text).unwrap_or_default(),
                linkedin: contact::extract_linkedin(text).unwrap_or_default(),
                twitter: String::new(),
                email: Links::mailto(&email),
            },
        };

        tracing::debug!(
            name = %record.personal.name,
            skills = record.skill_count(),
            experience = record.experience.len(),
            education = record.education.len(),
            projects = record.projects.len(),
            "extracted portfolio"
        );
        record
    }
}
