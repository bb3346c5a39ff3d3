//! The normalized portfolio record.
//!
//! Every field is always present when serialized: strings default to `""`
//! and lists to `[]`. Deserializing a partial document fills the gaps the
//! same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Proficiency assigned to every detected skill.
pub const DEFAULT_SKILL_LEVEL: u8 = 80;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub headline: String,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub field: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: DEFAULT_SKILL_LEVEL,
        }
    }
}

/// Profile links. Each value is a full URI or `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub email: String,
}

impl Links {
    pub fn mailto(email: &str) -> String {
        if email.is_empty() {
            String::new()
        } else {
            format!("mailto:{email}")
        }
    }
}

/// Structured portfolio derived from resume text.
///
/// `skills` is keyed by category (`frontend`, `backend`, `database`,
/// `devops`, `other`). A `BTreeMap` keeps serialization order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioRecord {
    pub personal: Personal,
    pub about: About,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub skills: BTreeMap<String, Vec<Skill>>,
    pub links: Links,
}

impl PortfolioRecord {
    /// The record returned when no usable text could be extracted.
    ///
    /// Carries the caller's email so the user only has to fill in the rest.
    pub fn placeholder(email: Option<&str>) -> Self {
        let email = email.unwrap_or("").trim();
        Self {
            personal: Personal {
                name: "Your Name".into(),
                title: "Professional".into(),
                tagline: "Your tagline here".into(),
                email: email.to_string(),
                phone: String::new(),
                location: String::new(),
                bio: "Add your professional summary here.".into(),
            },
            about: About {
                headline: "About Me".into(),
                description: "Add your description here.".into(),
                highlights: Vec::new(),
            },
            links: Links {
                email: Links::mailto(email),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Total number of skills across all categories.
    pub fn skill_count(&self) -> usize {
        self.skills.values().map(Vec::len).sum()
    }
}
