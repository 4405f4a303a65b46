use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::kind::FieldKind;
use crate::report::DEFAULT_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Defaults for the command line tools, loaded from a JSON file.
///
/// ```json
/// { "kinds": ["email", "phone"], "exclude": [], "summary_limit": 5,
///   "clean": { "lowercase": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Kinds to extract; empty means every kind.
    #[serde(default)]
    pub kinds: Vec<FieldKind>,
    #[serde(default)]
    pub exclude: Vec<FieldKind>,
    #[serde(default = "Config::default_summary_limit")]
    pub summary_limit: usize,
    #[serde(default)]
    pub clean: CleanOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kinds: Vec::new(),
            exclude: Vec::new(),
            summary_limit: Self::default_summary_limit(),
            clean: CleanOptions::default(),
        }
    }
}

impl Config {
    fn default_summary_limit() -> usize {
        DEFAULT_LIMIT
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Kinds to extract after applying `exclude`.
    pub fn resolve_kinds(&self) -> BTreeSet<FieldKind> {
        let selected: Vec<FieldKind> = if self.kinds.is_empty() {
            FieldKind::ALL.to_vec()
        } else {
            self.kinds.clone()
        };
        selected
            .into_iter()
            .filter(|kind| !self.exclude.contains(kind))
            .collect()
    }
}

/// Steps of the default cleaning pipeline, in the order they run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    pub html: bool,
    pub urls: bool,
    pub emails: bool,
    pub phones: bool,
    pub special_characters: bool,
    pub unicode: bool,
    pub whitespace: bool,
    pub lowercase: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            html: true,
            urls: true,
            emails: true,
            phones: true,
            special_characters: true,
            unicode: true,
            whitespace: true,
            lowercase: false,
        }
    }
}
