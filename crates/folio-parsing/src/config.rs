use regex::Regex;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Resume-domain terms; text must mention a few of these to count as a resume.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work",
    "project",
    "email",
    "phone",
    "address",
    "university",
    "degree",
    "company",
    "developer",
    "engineer",
    "manager",
    "bachelor",
    "master",
    "year",
    "resume",
    "cv",
    "summary",
    "objective",
    "professional",
    "technical",
    "software",
    "programming",
    "languages",
    "certifications",
    "achievements",
];

/// Configuration for the quality gate and the field extractors.
///
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── quality.rs ──
    /// Texts shorter than this many characters are rejected (default: 50).
    pub(crate) min_chars: usize,
    /// More decode artifacts than this rejects the text (default: 10).
    pub(crate) max_artifacts: usize,
    /// Minimum share of readable characters (default: 0.6).
    pub(crate) min_readable_ratio: f64,
    /// Minimum number of vocabulary terms that must appear (default: 2).
    pub(crate) min_vocabulary_hits: usize,
    pub(crate) vocabulary: ListOverride<String>,

    // ── identity.rs ──
    /// Role templates tried, in order, against the lower-cased text.
    pub(crate) title_patterns: ListOverride<Regex>,

    // ── caps ──
    pub(crate) max_experience: usize,
    pub(crate) max_education: usize,
    pub(crate) max_projects: usize,
    pub(crate) max_certifications: usize,
    pub(crate) max_highlights: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            min_chars: 50,
            max_artifacts: 10,
            min_readable_ratio: 0.6,
            min_vocabulary_hits: 2,
            vocabulary: ListOverride::Default,
            title_patterns: ListOverride::Default,
            max_experience: 6,
            max_education: 4,
            max_projects: 6,
            max_certifications: 5,
            max_highlights: 5,
        }
    }
}

impl ParsingConfig {
    /// The effective vocabulary, lower-cased.
    pub fn vocabulary(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect();
        self.vocabulary
            .resolve(&defaults)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect()
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    min_chars: Option<usize>,
    max_artifacts: Option<usize>,
    min_readable_ratio: Option<f64>,
    min_vocabulary_hits: Option<usize>,
    vocabulary: ListOverride<String>,
    title_patterns: ListOverride<String>,
    max_experience: Option<usize>,
    max_education: Option<usize>,
    max_projects: Option<usize>,
    max_certifications: Option<usize>,
    max_highlights: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Quality gate ──

    pub fn min_chars(mut self, n: usize) -> Self {
        self.min_chars = Some(n);
        self
    }

    pub fn max_artifacts(mut self, n: usize) -> Self {
        self.max_artifacts = Some(n);
        self
    }

    pub fn min_readable_ratio(mut self, ratio: f64) -> Self {
        self.min_readable_ratio = Some(ratio);
        self
    }

    pub fn min_vocabulary_hits(mut self, n: usize) -> Self {
        self.min_vocabulary_hits = Some(n);
        self
    }

    pub fn set_vocabulary(mut self, terms: Vec<String>) -> Self {
        self.vocabulary = ListOverride::Replace(terms);
        self
    }

    pub fn add_vocabulary_term(mut self, term: String) -> Self {
        match &mut self.vocabulary {
            ListOverride::Extend(v) => v.push(term),
            _ => self.vocabulary = ListOverride::Extend(vec![term]),
        }
        self
    }

    // ── Title templates ──

    pub fn set_title_patterns(mut self, patterns: Vec<String>) -> Self {
        self.title_patterns = ListOverride::Replace(patterns);
        self
    }

    pub fn add_title_pattern(mut self, pattern: String) -> Self {
        match &mut self.title_patterns {
            ListOverride::Extend(v) => v.push(pattern),
            _ => self.title_patterns = ListOverride::Extend(vec![pattern]),
        }
        self
    }

    // ── Caps ──

    pub fn max_experience(mut self, n: usize) -> Self {
        self.max_experience = Some(n);
        self
    }

    pub fn max_education(mut self, n: usize) -> Self {
        self.max_education = Some(n);
        self
    }

    pub fn max_projects(mut self, n: usize) -> Self {
        self.max_projects = Some(n);
        self
    }

    pub fn max_certifications(mut self, n: usize) -> Self {
        self.max_certifications = Some(n);
        self
    }

    pub fn max_highlights(mut self, n: usize) -> Self {
        self.max_highlights = Some(n);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile_all = |patterns: Vec<String>| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };
        let title_patterns = match self.title_patterns {
            ListOverride::Default => ListOverride::Default,
            ListOverride::Replace(p) => ListOverride::Replace(compile_all(p)?),
            ListOverride::Extend(p) => ListOverride::Extend(compile_all(p)?),
        };

        let defaults = ParsingConfig::default();
        Ok(ParsingConfig {
            min_chars: self.min_chars.unwrap_or(defaults.min_chars),
            max_artifacts: self.max_artifacts.unwrap_or(defaults.max_artifacts),
            min_readable_ratio: self
                .min_readable_ratio
                .unwrap_or(defaults.min_readable_ratio),
            min_vocabulary_hits: self
                .min_vocabulary_hits
                .unwrap_or(defaults.min_vocabulary_hits),
            vocabulary: self.vocabulary,
            title_patterns,
            max_experience: self.max_experience.unwrap_or(defaults.max_experience),
            max_education: self.max_education.unwrap_or(defaults.max_education),
            max_projects: self.max_projects.unwrap_or(defaults.max_projects),
            max_certifications: self
                .max_certifications
                .unwrap_or(defaults.max_certifications),
            max_highlights: self.max_highlights.unwrap_or(defaults.max_highlights),
        })
    }
}
