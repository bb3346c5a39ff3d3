//! Plausibility gate for extracted text.
//!
//! Checks run in a fixed order and the first failure decides the verdict:
//! length, decode artifacts, readable-character ratio, vocabulary.

use folio_core::TextMetrics;
use folio_core::text_utils::count_decode_artifacts;
use thiserror::Error;

use crate::config::ParsingConfig;

/// Punctuation that counts as readable alongside letters, digits and whitespace.
const READABLE_PUNCTUATION: &str = ".,;:!?@#$%&*()-_+=\"'/";

/// Why a text was judged unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GarbageReason {
    #[error("text too short ({length} < {min} characters)")]
    TooShort { length: usize, min: usize },
    #[error("too many decode artifacts ({count} > {max})")]
    DecodeArtifacts { count: usize, max: usize },
    #[error("readable character ratio {ratio:.2} below {min:.2}")]
    LowReadableRatio { ratio: f64, min: f64 },
    #[error("only {hits} resume terms found (need {min})")]
    MissingVocabulary { hits: usize, min: usize },
}

fn is_readable(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || READABLE_PUNCTUATION.contains(c)
}

/// Share of readable characters. Empty text scores 0.
pub fn readable_ratio(text: &str) -> f64 {
    let (readable, total) = text.chars().fold((0usize, 0usize), |(r, t), c| {
        (r + usize::from(is_readable(c)), t + 1)
    });
    if total == 0 {
        0.0
    } else {
        readable as f64 / total as f64
    }
}

/// Number of vocabulary terms occurring anywhere in the text, case-insensitively.
pub fn vocabulary_hits(text: &str, vocabulary: &[String]) -> usize {
    let lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| lower.contains(term.as_str()))
        .count()
}

/// Compute all metrics with the default vocabulary.
pub fn measure(text: &str) -> TextMetrics {
    measure_with_config(text, &ParsingConfig::default())
}

pub fn measure_with_config(text: &str, config: &ParsingConfig) -> TextMetrics {
    TextMetrics {
        length: text.chars().count(),
        readable_ratio: readable_ratio(text),
        vocabulary_hits: vocabulary_hits(text, &config.vocabulary()),
        artifact_count: count_decode_artifacts(text),
    }
}

/// Run the gate with default thresholds.
pub fn check(text: &str) -> Result<(), GarbageReason> {
    check_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`check`].
///
/// Later checks are not evaluated once one fails.
pub fn check_with_config(text: &str, config: &ParsingConfig) -> Result<(), GarbageReason> {
    let length = text.chars().count();
    if length == 0 || length < config.min_chars {
        return Err(GarbageReason::TooShort {
            length,
            min: config.min_chars,
        });
    }

    let count = count_decode_artifacts(text);
    if count > config.max_artifacts {
        return Err(GarbageReason::DecodeArtifacts {
            count,
            max: config.max_artifacts,
        });
    }

    let ratio = readable_ratio(text);
    if ratio < config.min_readable_ratio {
        return Err(GarbageReason::LowReadableRatio {
            ratio,
            min: config.min_readable_ratio,
        });
    }

    let hits = vocabulary_hits(text, &config.vocabulary());
    if hits < config.min_vocabulary_hits {
        return Err(GarbageReason::MissingVocabulary {
            hits,
            min: config.min_vocabulary_hits,
        });
    }

    Ok(())
}

/// `true` when the text should not be handed to field extraction.
pub fn is_garbage(text: &str) -> bool {
    match check(text) {
        Ok(()) => false,
        Err(reason) => {
            tracing::debug!(%reason, "text rejected by quality gate");
            true
        }
    }
}
