//! Precompiled asset map: logical path -> physical compiled path.
//!
//! The map is a JSON artifact produced by `smelter compile` and loaded once
//! at startup. Deployments running with `serve = false` resolve every asset
//! reference through it instead of the live graph.
//!
//! A missing or unparseable artifact degrades to an empty map: precompiled
//! mode without a map behaves like serve-off for the helpers, never a crash.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::debug;

/// Asset map loading/writing errors.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid asset map `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("failed to write asset map `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Immutable mapping from logical asset path to physical compiled path.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    entries: FxHashMap<String, String>,
}

impl AssetMap {
    /// Create an empty map.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map from logical/physical pairs (used by `smelter compile`).
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Load the map from a JSON artifact.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let content =
            fs::read_to_string(path).map_err(|e| MapError::Io(path.to_path_buf(), e))?;
        let entries: FxHashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| MapError::Json(path.to_path_buf(), e))?;
        Ok(Self { entries })
    }

    /// Load the map, degrading to empty on any failure.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::empty();
        };
        match Self::load(path) {
            Ok(map) => {
                debug!("map"; "{} entries loaded from {}", map.len(), path.display());
                map
            }
            Err(e) => {
                debug!("map"; "{e}, using empty map");
                Self::empty()
            }
        }
    }

    /// Write the map as a JSON artifact with sorted keys.
    pub fn write(&self, path: &Path) -> Result<(), MapError> {
        let mut sorted = serde_json::Map::new();
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        for key in keys {
            sorted.insert(key.clone(), self.entries[key].clone().into());
        }

        let json = serde_json::Value::Object(sorted);
        let content = serde_json::to_string_pretty(&json)
            .map_err(|e| MapError::Json(path.to_path_buf(), e))?;
        fs::write(path, content).map_err(|e| MapError::Write(path.to_path_buf(), e))
    }

    /// Look up the physical path for a logical path.
    pub fn get(&self, logical: &str) -> Option<&str> {
        self.entries.get(logical).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
