use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub extraction: Option<ExtractionConfig>,
    pub quality: Option<QualityConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub layout_min_chars: Option<usize>,
    pub structural_min_chars: Option<usize>,
    pub raw_stream_min_chars: Option<usize>,
    pub preview_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityConfig {
    pub min_chars: Option<usize>,
    pub max_artifacts: Option<usize>,
    pub min_readable_ratio: Option<f64>,
    pub min_vocabulary_hits: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub history_path: Option<String>,
}

/// Platform config directory path: `<config_dir>/folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
}

/// Default location of the history database: `<data_dir>/folio/history.db`.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("folio").join("history.db"))
}

/// Load config by cascading CWD `.folio.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".folio.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (be, oe) = (
        base.extraction.unwrap_or_default(),
        overlay.extraction.unwrap_or_default(),
    );
    let (bq, oq) = (
        base.quality.unwrap_or_default(),
        overlay.quality.unwrap_or_default(),
    );
    let (bs, os) = (
        base.storage.unwrap_or_default(),
        overlay.storage.unwrap_or_default(),
    );

    ConfigFile {
        extraction: Some(ExtractionConfig {
            layout_min_chars: oe.layout_min_chars.or(be.layout_min_chars),
            structural_min_chars: oe.structural_min_chars.or(be.structural_min_chars),
            raw_stream_min_chars: oe.raw_stream_min_chars.or(be.raw_stream_min_chars),
            preview_chars: oe.preview_chars.or(be.preview_chars),
        }),
        quality: Some(QualityConfig {
            min_chars: oq.min_chars.or(bq.min_chars),
            max_artifacts: oq.max_artifacts.or(bq.max_artifacts),
            min_readable_ratio: oq.min_readable_ratio.or(bq.min_readable_ratio),
            min_vocabulary_hits: oq.min_vocabulary_hits.or(bq.min_vocabulary_hits),
        }),
        storage: Some(StorageConfig {
            history_path: os.history_path.or(bs.history_path),
        }),
    }
}
