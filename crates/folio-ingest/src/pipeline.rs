use folio_core::config_file::ConfigFile;
use folio_core::text_utils::truncate_chars;
use folio_core::{ExtractedText, PortfolioRecord, RawDocument};
use folio_parsing::{ParsingConfig, ParsingConfigBuilder, PortfolioExtractor};
use folio_pdf::{ChainThresholds, StrategyChain};

use crate::{IngestError, default_chain, load_text};

/// Characters of extracted text echoed back to the caller for review.
pub const DEFAULT_PREVIEW_CHARS: usize = 5000;

/// Loader, strategy chain, quality gate and field extractor wired together.
pub struct Pipeline {
    chain: StrategyChain,
    extractor: PortfolioExtractor,
    preview_chars: usize,
}

/// A successful run: the record and the text it was built from.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub record: PortfolioRecord,
    pub text: ExtractedText,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_parts(
            default_chain(ChainThresholds::default()),
            ParsingConfig::default(),
            DEFAULT_PREVIEW_CHARS,
        )
    }

    pub fn with_parts(chain: StrategyChain, parsing: ParsingConfig, preview_chars: usize) -> Self {
        Self {
            chain,
            extractor: PortfolioExtractor::with_config(parsing),
            preview_chars,
        }
    }

    /// Build from the `[extraction]` and `[quality]` sections of a config
    /// file; unset values keep their defaults.
    pub fn from_config(config: &ConfigFile) -> Result<Self, IngestError> {
        let defaults = ChainThresholds::default();
        let extraction = config.extraction.clone().unwrap_or_default();
        let thresholds = ChainThresholds {
            layout_min_chars: extraction
                .layout_min_chars
                .unwrap_or(defaults.layout_min_chars),
            structural_min_chars: extraction
                .structural_min_chars
                .unwrap_or(defaults.structural_min_chars),
            raw_stream_min_chars: extraction
                .raw_stream_min_chars
                .unwrap_or(defaults.raw_stream_min_chars),
        };

        let mut builder = ParsingConfigBuilder::new();
        if let Some(quality) = &config.quality {
            if let Some(n) = quality.min_chars {
                builder = builder.min_chars(n);
            }
            if let Some(n) = quality.max_artifacts {
                builder = builder.max_artifacts(n);
            }
            if let Some(ratio) = quality.min_readable_ratio {
                builder = builder.min_readable_ratio(ratio);
            }
            if let Some(n) = quality.min_vocabulary_hits {
                builder = builder.min_vocabulary_hits(n);
            }
        }

        Ok(Self::with_parts(
            default_chain(thresholds),
            builder.build()?,
            extraction.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS),
        ))
    }

    pub fn extractor(&self) -> &PortfolioExtractor {
        &self.extractor
    }

    /// Extract and gate the text of `doc`.
    pub fn load_text(&self, doc: &RawDocument) -> Result<ExtractedText, IngestError> {
        load_text(doc, &self.chain, self.extractor.config())
    }

    /// Full run: load, gate, then build the portfolio record.
    ///
    /// Rejected documents are an error here; the placeholder record is only
    /// produced by [`PortfolioExtractor::extract_or_placeholder`].
    pub fn run(
        &self,
        doc: &RawDocument,
        fallback_email: Option<&str>,
    ) -> Result<PipelineOutput, IngestError> {
        let text = self.load_text(doc)?;
        let record = self.extractor.extract(&text.text, fallback_email);
        Ok(PipelineOutput { record, text })
    }

    /// The text echoed back to the caller, truncated with a note when long.
    pub fn preview(&self, text: &str) -> String {
        preview(text, self.preview_chars)
    }
}

/// First `max` characters of `text`, with a trailing note giving the full
/// length when anything was cut.
pub fn preview(text: &str, max: usize) -> String {
    let total = text.chars().count();
    if total <= max {
        return text.to_string();
    }
    format!(
        "{}\n\n... [truncated, {total} total characters extracted]",
        truncate_chars(text, max)
    )
}

#[cfg(test)]
mod tests {
    use folio_core::config_file::{ExtractionConfig, QualityConfig};

    use super::*;

    #[test]
    fn test_preview_truncates_with_note() {
        assert_eq!(preview("short", 5000), "short");
        let long = "é".repeat(5001);
        let out = preview(&long, 5000);
        assert!(out.starts_with(&"é".repeat(5000)));
        assert!(out.ends_with("\n\n... [truncated, 5001 total characters extracted]"));
    }

    #[test]
    fn test_from_config_applies_quality_and_preview() {
        let config = ConfigFile {
            extraction: Some(ExtractionConfig {
                preview_chars: Some(10),
                ..Default::default()
            }),
            quality: Some(QualityConfig {
                min_chars: Some(10),
                min_vocabulary_hits: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };
        let pipeline = Pipeline::from_config(&config).unwrap();
        let doc = RawDocument::new("Jane Doe\nsoftware", "a.txt", "text/plain");
        let out = pipeline.run(&doc, Some("jane@example.com")).unwrap();
        assert_eq!(out.record.personal.email, "jane@example.com");
        assert_eq!(
            pipeline.preview(&out.text.text),
            "Jane Doe\ns\n\n... [truncated, 17 total characters extracted]"
        );

        // The default pipeline rejects the same document.
        assert!(Pipeline::new().run(&doc, None).is_err());
    }
}
