pub mod certifications;
pub mod config;
pub mod contact;
pub mod education;
pub mod experience;
pub mod extractor;
pub mod identity;
pub mod projects;
pub mod quality;
pub mod section;
pub mod skills;
pub mod summary;

pub use config::{DEFAULT_VOCABULARY, ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::PortfolioExtractor;
pub use quality::{GarbageReason, is_garbage, measure};
pub use section::{Section, find_section};
// Re-export domain types from core (canonical definitions live there)
pub use folio_core::{PortfolioRecord, TextMetrics};

/// Build a portfolio from sanitized text with the default configuration.
///
/// Never fails: fields that cannot be found take their default values.
pub fn extract_portfolio(text: &str, fallback_email: Option<&str>) -> PortfolioRecord {
    PortfolioExtractor::new().extract(text, fallback_email)
}

/// Gate the text, then extract; rejected text yields the placeholder record.
pub fn extract_or_placeholder(text: &str, fallback_email: Option<&str>) -> PortfolioRecord {
    PortfolioExtractor::new().extract_or_placeholder(text, fallback_email)
}
