use once_cell::sync::Lazy;
use regex::Regex;

/// Resume sections that bound each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Projects,
}

impl Section {
    fn heading(&self) -> &'static Regex {
        static EXPERIENCE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)(?:work\s*)?experiences?[:\s]*\n").unwrap());
        static EDUCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)education[:\s]*\n").unwrap());
        static PROJECTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)projects?[:\s]*\n").unwrap());
        match self {
            Self::Experience => &EXPERIENCE,
            Self::Education => &EDUCATION,
            Self::Projects => &PROJECTS,
        }
    }

    /// Headings that end this section.
    fn end(&self) -> &'static Regex {
        static AFTER_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\n(?:education|projects?|skills?|certification)").unwrap()
        });
        static AFTER_EDUCATION: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\n(?:experience|projects?|skills?|certification)").unwrap()
        });
        static AFTER_PROJECTS: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\n(?:education|experience|skills?|certification)").unwrap()
        });
        match self {
            Self::Experience => &AFTER_EXPERIENCE,
            Self::Education => &AFTER_EDUCATION,
            Self::Projects => &AFTER_PROJECTS,
        }
    }
}

/// Locate the body of a section: the text after its first heading, up to
/// the next bounding heading or the end of the text.
///
/// Returns `None` when the heading is absent or the body is blank.
pub fn find_section(text: &str, section: Section) -> Option<&str> {
    let heading = section.heading().find(text)?;
    let rest = &text[heading.end()..];
    let end = section.end().find(rest).map_or(rest.len(), |m| m.start());
    let body = &rest[..end];
    if body.trim().is_empty() {
        None
    } else {
        Some(body)
    }
}
