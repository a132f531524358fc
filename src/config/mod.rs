//! Configuration management for `smelter.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── dispatch   # [dispatch]
//! │   ├── graph      # [graph]
//! │   └── server     # [server]
//! ├── error          # ConfigError
//! └── mod.rs         # Config (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[dispatch]` | Request matching (prefix, serve mode, asset map) |
//! | `[graph]`    | Filesystem asset graph (source, output)          |
//! | `[server]`   | Development server (interface, port)             |

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{DispatchConfig, GraphConfig, ServerConfig};

use crate::log;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing smelter.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Request dispatch settings
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Filesystem asset graph settings
    #[serde(default)]
    pub graph: GraphConfig,

    /// Development server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a file path with unknown field detection.
    ///
    /// The project root is determined by the config file's parent directory;
    /// relative paths in the config are resolved against it.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = path.to_path_buf();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.finalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string (paths stay as written).
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Resolve paths against the project root, expanding `~`.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.graph.source = self.resolve_path(&self.graph.source);
        self.graph.output = self.resolve_path(&self.graph.output);
        if let Some(map) = &self.dispatch.asset_map {
            self.dispatch.asset_map = Some(self.resolve_path(map));
        }
    }

    /// Expand `~` and make a path absolute relative to the project root.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let expanded = PathBuf::from(expanded);
        if expanded.is_absolute() {
            expanded
        } else {
            self.root.join(expanded)
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.dispatch.prefix;
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "dispatch.prefix must start with '/', got `{prefix}`"
            )));
        }
        // A bare "/" leaves nothing between the prefix and the required
        // separator, so no request path could ever match it
        if prefix == "/" {
            return Err(ConfigError::Validation(
                "dispatch.prefix must name a path segment, `/` cannot match".to_string(),
            ));
        }
        if prefix.len() > 1 && prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "dispatch.prefix must not end with '/', got `{prefix}`"
            )));
        }
        Ok(())
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }
}

/// Parse a config from a TOML string for tests (no path resolution).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    Config::from_str(content).expect("test config should parse")
}
