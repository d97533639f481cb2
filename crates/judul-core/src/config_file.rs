use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub parsing: Option<ParsingSection>,
    pub display: Option<DisplayConfig>,
}

/// Overrides for the response parser thresholds and vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsingSection {
    pub heading_min_len: Option<usize>,
    pub vocab_free_min_len: Option<usize>,
    pub description_min_len: Option<usize>,
    pub lookahead_lines: Option<usize>,
    pub keyword_cap: Option<usize>,
    pub beginner_max_len: Option<usize>,
    pub advanced_min_len: Option<usize>,
    /// `"explicit"` or `"inferred"`.
    pub precedence: Option<String>,
    pub extra_research_terms: Option<Vec<String>>,
    pub extra_exclusions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
    pub json: Option<bool>,
}

/// Platform config directory path: `<config_dir>/judul/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("judul").join("config.toml"))
}

/// Load config by cascading CWD `.judul.toml` over platform config.
/// CWD values override platform values. Unreadable or invalid files are
/// logged and skipped.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_or_warn(&p));
    let cwd = load_or_warn(Path::new(".judul.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_or_warn(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match load_from_path(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config from a specific path.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Take `overlay`'s value when set, else `base`'s.
fn pick<S, T>(overlay: Option<&S>, base: Option<&S>, get: impl Fn(&S) -> Option<T>) -> Option<T> {
    overlay.and_then(&get).or_else(|| base.and_then(&get))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (bp, op) = (base.parsing.as_ref(), overlay.parsing.as_ref());
    let (bd, od) = (base.display.as_ref(), overlay.display.as_ref());

    ConfigFile {
        parsing: Some(ParsingSection {
            heading_min_len: pick(op, bp, |p| p.heading_min_len),
            vocab_free_min_len: pick(op, bp, |p| p.vocab_free_min_len),
            description_min_len: pick(op, bp, |p| p.description_min_len),
            lookahead_lines: pick(op, bp, |p| p.lookahead_lines),
            keyword_cap: pick(op, bp, |p| p.keyword_cap),
            beginner_max_len: pick(op, bp, |p| p.beginner_max_len),
            advanced_min_len: pick(op, bp, |p| p.advanced_min_len),
            precedence: pick(op, bp, |p| p.precedence.clone()),
            extra_research_terms: pick(op, bp, |p| p.extra_research_terms.clone()),
            extra_exclusions: pick(op, bp, |p| p.extra_exclusions.clone()),
        }),
        display: Some(DisplayConfig {
            color: pick(od, bd, |d| d.color),
            json: pick(od, bd, |d| d.json),
        }),
    }
}
