use std::path::Path;

use folio_core::{ExtractedText, ExtractionMethod, PdfBackend, sanitize};

use crate::raw_stream::RawStreamBackend;
use crate::structural::LopdfBackend;

/// Minimum sanitized character counts each strategy must exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainThresholds {
    pub layout_min_chars: usize,
    pub structural_min_chars: usize,
    pub raw_stream_min_chars: usize,
}

impl Default for ChainThresholds {
    fn default() -> Self {
        Self {
            layout_min_chars: 200,
            structural_min_chars: 200,
            raw_stream_min_chars: 100,
        }
    }
}

struct Strategy {
    backend: Box<dyn PdfBackend>,
    min_chars: usize,
    method: ExtractionMethod,
}

/// Ordered PDF text strategies; the first whose sanitized output clears its
/// bar wins and later strategies are never invoked.
#[derive(Default)]
pub struct StrategyChain {
    strategies: Vec<Strategy>,
}

impl StrategyChain {
    /// An empty chain. Add strategies with [`StrategyChain::with_strategy`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout backend first, then the structural and raw-stream fallbacks.
    pub fn standard(layout: Box<dyn PdfBackend>, thresholds: ChainThresholds) -> Self {
        Self::new()
            .with_strategy(layout, thresholds.layout_min_chars, ExtractionMethod::Layout)
            .with_fallbacks(thresholds)
    }

    /// Structural and raw-stream strategies only.
    pub fn fallbacks_only(thresholds: ChainThresholds) -> Self {
        Self::new().with_fallbacks(thresholds)
    }

    fn with_fallbacks(self, thresholds: ChainThresholds) -> Self {
        self.with_strategy(
            Box::new(LopdfBackend::new()),
            thresholds.structural_min_chars,
            ExtractionMethod::Structural,
        )
        .with_strategy(
            Box::new(RawStreamBackend::new()),
            thresholds.raw_stream_min_chars,
            ExtractionMethod::RawStream,
        )
    }

    /// Append a strategy that must produce more than `min_chars` characters.
    pub fn with_strategy(
        mut self,
        backend: Box<dyn PdfBackend>,
        min_chars: usize,
        method: ExtractionMethod,
    ) -> Self {
        self.strategies.push(Strategy {
            backend,
            min_chars,
            method,
        });
        self
    }

    /// Names of the strategies in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.backend.name()).collect()
    }

    /// Try each strategy in order. `None` means every one failed its bar.
    pub fn extract(&self, path: &Path) -> Option<ExtractedText> {
        for strategy in &self.strategies {
            let name = strategy.backend.name();
            let raw = match strategy.backend.extract_text(path) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!(strategy = name, error = %e, "strategy failed");
                    continue;
                }
            };

            let text = sanitize(&raw);
            let chars = text.chars().count();
            tracing::debug!(strategy = name, chars, min = strategy.min_chars, "strategy attempted");
            if chars > strategy.min_chars {
                return Some(ExtractedText::new(text, strategy.method));
            }
        }
        tracing::debug!(path = %path.display(), "no strategy produced enough text");
        None
    }
}
