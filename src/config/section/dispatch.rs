//! `[dispatch]` section configuration.
//!
//! Controls how incoming requests are matched to managed assets.
//!
//! # Example
//!
//! ```toml
//! [dispatch]
//! prefix = "/assets"          # URL prefix claimed by the dispatcher
//! serve = true                # Compile and resolve assets live
//! debug = false               # Log discovery timing
//! asset_map = "asset-map.json"  # Precompiled logical -> physical mapping
//! ```
//!
//! Set `serve = false` for precompiled deployments: the dispatcher then never
//! claims a request and asset references resolve through `asset_map` only.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Request dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// URL prefix claimed by the dispatcher (must start with `/`).
    pub prefix: String,

    /// Serve mode: compile and resolve assets live against the graph.
    pub serve: bool,

    /// Log asset discovery timing.
    pub debug: bool,

    /// Location of the precompiled asset map artifact, if any.
    pub asset_map: Option<PathBuf>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            prefix: "/assets".to_string(),
            serve: true,
            debug: false,
            asset_map: None,
        }
    }
}
