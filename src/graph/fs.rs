//! Filesystem-backed asset graph.
//!
//! Scans a source directory into a logical-path index and "compiles" assets
//! by copying them into the output directory under a content-fingerprinted
//! name (`app.js` -> `app-3f9a12cd.js`).
//!
//! # Manifests
//!
//! A `.mf` file lists one logical path per line (`#` starts a comment) and
//! expands to those entries in declaration order:
//!
//! ```text
//! # bundle.mf
//! vendor/jquery.js
//! app.js
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::map::AssetMap;
use crate::utils::hash;
use crate::{debug, log};

use super::{Asset, AssetGraph, GraphError};

/// Extension marking a manifest file.
const MANIFEST_EXT: &str = "mf";

#[derive(Debug, Clone)]
struct Entry {
    source: PathBuf,
    compiled: Option<PathBuf>,
}

/// Asset graph backed by a source directory on disk.
pub struct FsGraph {
    source_root: PathBuf,
    output_root: PathBuf,
    index: DashMap<String, Entry>,
}

impl FsGraph {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            index: DashMap::new(),
        }
    }

    /// Compile every indexed asset and return the logical -> physical map.
    ///
    /// Manifests are skipped: their constituent files are compiled
    /// individually and referenced through expansion.
    pub fn compile_all(&self) -> Result<AssetMap, GraphError> {
        let logicals: Vec<String> = self
            .index
            .iter()
            .filter(|entry| !is_manifest(&entry.value().source))
            .map(|entry| entry.key().clone())
            .collect();

        logicals
            .par_iter()
            .try_for_each(|logical| match self.index.get(logical) {
                Some(entry) => {
                    let source = entry.value().source.clone();
                    drop(entry);
                    self.compile_single_asset(&source)
                }
                None => Ok(()),
            })?;

        let entries = logicals.into_iter().filter_map(|logical| {
            let compiled = self.index.get(&logical)?.compiled.clone()?;
            let physical = relative_forward(&compiled, &self.output_root)?;
            Some((logical, physical))
        });
        Ok(AssetMap::from_entries(entries))
    }

    /// Probe the source directory for a logical path not yet indexed.
    ///
    /// Keeps assets resolvable per-request even when the startup scan failed
    /// or has not finished. Rejects traversal segments.
    fn probe(&self, logical: &str) -> Option<Entry> {
        if logical.is_empty() || logical.split('/').any(|seg| seg == "..") {
            return None;
        }
        let source = self.source_root.join(logical);
        if !source.is_file() {
            return None;
        }
        let entry = Entry {
            source,
            compiled: None,
        };
        self.index.insert(logical.to_string(), entry.clone());
        Some(entry)
    }

    fn snapshot(&self, logical: &str, entry: &Entry) -> Asset {
        Asset {
            logical_path: logical.to_string(),
            source_path: entry.source.clone(),
            compiled: entry.compiled.is_some(),
            compiled_path: entry.compiled.clone(),
        }
    }
}

impl AssetGraph for FsGraph {
    fn find_assets(&self) -> Result<usize, GraphError> {
        if !self.source_root.is_dir() {
            return Err(GraphError::Scan(
                self.source_root.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut count = 0;
        for entry in WalkDir::new(&self.source_root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let source = entry.path();
            let Some(logical) = relative_forward(&source, &self.source_root) else {
                continue;
            };
            // A rescan must not clobber compiled state from earlier requests
            self.index.entry(logical).or_insert(Entry {
                source,
                compiled: None,
            });
            count += 1;
        }
        Ok(count)
    }

    fn asset_by_logical_path(&self, logical: &str) -> Option<Asset> {
        if let Some(entry) = self.index.get(logical) {
            return Some(self.snapshot(logical, entry.value()));
        }
        self.probe(logical)
            .map(|entry| self.snapshot(logical, &entry))
    }

    fn compile_single_asset(&self, source: &Path) -> Result<(), GraphError> {
        let Some(logical) = relative_forward(source, &self.source_root) else {
            return Err(GraphError::Untracked(source.to_path_buf()));
        };

        let compile_err = |e: std::io::Error| GraphError::Compile(source.to_path_buf(), e);

        let fingerprint = hash::fingerprint_file(source).map_err(compile_err)?;
        let compiled_rel = fingerprinted_name(&logical, &fingerprint);
        let output = self.output_root.join(&compiled_rel);

        // Content-addressed name: an existing artifact is already correct,
        // which also makes concurrent compiles of one path harmless
        if !output.is_file() {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(compile_err)?;
            }
            // Stage then rename, so a concurrent request never reads a
            // half-written artifact
            let staging = staging_path(&output);
            fs::copy(source, &staging).map_err(compile_err)?;
            fs::rename(&staging, &output).map_err(compile_err)?;
            debug!("compile"; "{} -> {}", logical, compiled_rel);
        }

        match self.index.get_mut(&logical) {
            Some(mut entry) => entry.compiled = Some(output),
            None => {
                self.index.insert(
                    logical,
                    Entry {
                        source: source.to_path_buf(),
                        compiled: Some(output),
                    },
                );
            }
        }
        Ok(())
    }

    fn required_logical_paths(&self, asset: &Asset) -> Vec<String> {
        if !is_manifest(&asset.source_path) {
            return vec![asset.logical_path.clone()];
        }
        match fs::read_to_string(&asset.source_path) {
            Ok(content) => {
                let entries: Vec<String> = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string)
                    .collect();
                if entries.is_empty() {
                    vec![asset.logical_path.clone()]
                } else {
                    entries
                }
            }
            Err(e) => {
                log!("graph"; "unreadable manifest {}: {}", asset.logical_path, e);
                vec![asset.logical_path.clone()]
            }
        }
    }
}

/// Process-unique staging name next to `output` (same directory, so the
/// rename stays on one filesystem; unique, so concurrent compiles of one
/// path never share a staging file).
fn staging_path(output: &Path) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    output.with_file_name(format!(".{name}.{seq}.tmp"))
}

fn is_manifest(source: &Path) -> bool {
    source.extension().and_then(|e| e.to_str()) == Some(MANIFEST_EXT)
}

/// Relative path with forward slashes, or None if `path` is outside `root`.
fn relative_forward(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

/// Insert a fingerprint before the extension: `js/app.js` -> `js/app-3f9a12cd.js`.
fn fingerprinted_name(logical: &str, fingerprint: &str) -> String {
    match logical.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !stem.ends_with('/') && !ext.contains('/') => {
            format!("{stem}-{fingerprint}.{ext}")
        }
        _ => format!("{logical}-{fingerprint}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn graph_fixture() -> (TempDir, FsGraph) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("assets");
        let output = dir.path().join("public");
        fs::create_dir_all(source.join("js")).unwrap();
        fs::write(source.join("app.js"), "console.log('app')").unwrap();
        fs::write(source.join("js/vendor.js"), "window.vendor = 1").unwrap();
        fs::write(source.join("style.css"), "body {}").unwrap();
        fs::write(source.join("bundle.mf"), "# bundle\njs/vendor.js\napp.js\n").unwrap();
        let graph = FsGraph::new(source, output);
        (dir, graph)
    }

    #[test]
    fn test_find_assets_indexes_files() {
        let (_dir, graph) = graph_fixture();
        let count = graph.find_assets().unwrap();
        assert_eq!(count, 4);

        let asset = graph.asset_by_logical_path("js/vendor.js").unwrap();
        assert!(!asset.compiled);
        assert!(asset.compiled_path.is_none());
        assert!(graph.asset_by_logical_path("missing.js").is_none());
    }

    #[test]
    fn test_find_assets_missing_root() {
        let graph = FsGraph::new("/nonexistent/assets", "/nonexistent/public");
        assert!(matches!(graph.find_assets(), Err(GraphError::Scan(..))));
    }

    #[test]
    fn test_lookup_probes_without_scan() {
        let (_dir, graph) = graph_fixture();
        // No find_assets call: the lazy probe still resolves the file
        let asset = graph.asset_by_logical_path("app.js").unwrap();
        assert_eq!(asset.logical_path, "app.js");

        // Traversal is rejected even when the file exists
        assert!(graph.asset_by_logical_path("../assets/app.js").is_none());
    }

    #[test]
    fn test_compile_single_asset() {
        let (_dir, graph) = graph_fixture();
        graph.find_assets().unwrap();

        let asset = graph.asset_by_logical_path("app.js").unwrap();
        graph.compile_single_asset(&asset.source_path).unwrap();

        let asset = graph.asset_by_logical_path("app.js").unwrap();
        assert!(asset.compiled);
        let compiled = asset.compiled_path.unwrap();
        assert!(compiled.is_file());

        let name = compiled.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("app-"));
        assert!(name.ends_with(".js"));

        // Idempotent: compiling again resolves to the same artifact
        graph.compile_single_asset(&asset.source_path).unwrap();
        let again = graph.asset_by_logical_path("app.js").unwrap();
        assert_eq!(again.compiled_path.unwrap(), compiled);
    }

    #[test]
    fn test_compile_copies_bytes_and_leaves_no_staging_files() {
        let (_dir, graph) = graph_fixture();
        graph.find_assets().unwrap();
        graph.compile_all().unwrap();

        let asset = graph.asset_by_logical_path("app.js").unwrap();
        let compiled = asset.compiled_path.unwrap();
        assert_eq!(
            fs::read(&compiled).unwrap(),
            fs::read(&asset.source_path).unwrap()
        );

        // Every published name is final; nothing staged remains on disk
        let leftovers: Vec<_> = WalkDir::new(&graph.output_root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "staging files left: {leftovers:?}");
    }

    #[test]
    fn test_staging_path_is_unique_per_call() {
        let output = Path::new("/out/app-3f9a12cd.js");
        let a = staging_path(output);
        let b = staging_path(output);
        assert_ne!(a, b);
        assert_eq!(a.parent(), output.parent());
        assert!(a.to_string_lossy().ends_with(".tmp"));
    }

    #[test]
    fn test_compile_untracked_source() {
        let (_dir, graph) = graph_fixture();
        let err = graph
            .compile_single_asset(Path::new("/elsewhere/app.js"))
            .unwrap_err();
        assert!(matches!(err, GraphError::Untracked(_)));
    }

    #[test]
    fn test_manifest_expansion_order() {
        let (_dir, graph) = graph_fixture();
        graph.find_assets().unwrap();

        let manifest = graph.asset_by_logical_path("bundle.mf").unwrap();
        let required = graph.required_logical_paths(&manifest);
        assert_eq!(required, vec!["js/vendor.js", "app.js"]);

        // Plain assets expand to themselves
        let plain = graph.asset_by_logical_path("style.css").unwrap();
        assert_eq!(graph.required_logical_paths(&plain), vec!["style.css"]);
    }

    #[test]
    fn test_compile_all_writes_map() {
        let (_dir, graph) = graph_fixture();
        graph.find_assets().unwrap();

        let map = graph.compile_all().unwrap();
        // Manifest itself is not in the map
        assert_eq!(map.len(), 3);

        let physical = map.get("js/vendor.js").unwrap();
        assert!(physical.starts_with("js/vendor-"));
        assert!(physical.ends_with(".js"));
    }

    #[test]
    fn test_fingerprinted_name() {
        assert_eq!(fingerprinted_name("app.js", "3f9a12cd"), "app-3f9a12cd.js");
        assert_eq!(
            fingerprinted_name("js/app.min.js", "00ff00ff"),
            "js/app.min-00ff00ff.js"
        );
        assert_eq!(fingerprinted_name("LICENSE", "abcd1234"), "LICENSE-abcd1234");
        assert_eq!(
            fingerprinted_name("v1.2/README", "abcd1234"),
            "v1.2/README-abcd1234"
        );
    }
}
