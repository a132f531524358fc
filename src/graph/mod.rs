//! Asset graph interface.
//!
//! The graph owns asset discovery, compilation and compiled-state
//! consistency. The dispatcher only talks to it through [`AssetGraph`] and
//! never takes locks of its own, so concurrent compile calls for the same
//! logical path must be tolerated by the implementation.

mod fs;

pub use fs::FsGraph;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Asset graph errors.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("asset scan failed under `{0}`")]
    Scan(PathBuf, #[source] std::io::Error),

    #[error("failed to compile `{0}`")]
    Compile(PathBuf, #[source] std::io::Error),

    #[error("asset not tracked by the graph: `{0}`")]
    Untracked(PathBuf),
}

/// Snapshot of an asset known to the graph.
///
/// Compiled state lives in the graph; a snapshot taken before compilation
/// stays stale, so callers re-fetch after `compile_single_asset` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Stable source-level identifier, e.g. `"app.js"`.
    pub logical_path: String,
    /// Source file location.
    pub source_path: PathBuf,
    /// Whether a compiled artifact exists for this asset.
    pub compiled: bool,
    /// Compiled artifact location, valid only once `compiled` is true.
    pub compiled_path: Option<PathBuf>,
}

/// Interface to the asset-pipeline engine.
pub trait AssetGraph: Send + Sync {
    /// Populate the logical-path index. Called once at startup in serve mode.
    ///
    /// Returns the number of assets discovered.
    fn find_assets(&self) -> Result<usize, GraphError>;

    /// Look up an asset by logical path.
    fn asset_by_logical_path(&self, logical: &str) -> Option<Asset>;

    /// Compile one asset, blocking until the outcome is known.
    ///
    /// On success the asset's compiled state becomes true and its compiled
    /// path resolvable. Idempotent per source path.
    fn compile_single_asset(&self, source: &Path) -> Result<(), GraphError>;

    /// Manifest expansion: the ordered logical paths an asset requires.
    ///
    /// Plain assets expand to themselves; manifests expand to their entries
    /// in declaration order.
    fn required_logical_paths(&self, asset: &Asset) -> Vec<String>;
}
