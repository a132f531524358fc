//! `[graph]` section configuration.
//!
//! Settings for the filesystem-backed asset graph.
//!
//! # Example
//!
//! ```toml
//! [graph]
//! source = "assets"           # Source directory scanned for assets
//! output = "public/assets"    # Directory compiled artifacts are written to
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Filesystem asset graph settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Source directory scanned for assets (relative to project root).
    pub source: PathBuf,

    /// Directory compiled artifacts are written to (relative to project root).
    pub output: PathBuf,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets"),
            output: PathBuf::from("public/assets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_graph_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.graph.source, PathBuf::from("assets"));
        assert_eq!(config.graph.output, PathBuf::from("public/assets"));
    }

    #[test]
    fn test_graph_config_override() {
        let config = test_parse_config("[graph]\nsource = \"static\"\noutput = \"dist\"");

        assert_eq!(config.graph.source, PathBuf::from("static"));
        assert_eq!(config.graph.output, PathBuf::from("dist"));
    }
}
