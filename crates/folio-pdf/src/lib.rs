//! PDF text extraction strategies.
//!
//! The layout-aware backend lives in `folio-pdf-mupdf` so that the MuPDF
//! dependency stays optional; this crate holds the two fallbacks and the
//! chain that orders them.

pub mod chain;
pub mod raw_stream;
pub mod structural;

pub use chain::{ChainThresholds, StrategyChain};
pub use raw_stream::RawStreamBackend;
pub use structural::LopdfBackend;
// Re-export domain types from core (canonical definitions live there)
pub use folio_core::{BackendError, ExtractedText, ExtractionMethod, PdfBackend};
