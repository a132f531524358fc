//! Template rendering helpers.
//!
//! An immutable value object constructed per request, closing over the
//! shared dispatcher. Pure string construction, safe to call any number of
//! times within and across requests.

use std::sync::Arc;

use super::Dispatcher;

/// The three asset reference renderers handed to the rendering step.
#[derive(Clone)]
pub struct AssetHelpers {
    dispatcher: Arc<Dispatcher>,
}

impl AssetHelpers {
    pub(super) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Script tags for a JavaScript asset, one per expanded path.
    ///
    /// A manifest expands to one tag per constituent file in serve mode.
    pub fn js(&self, logical: &str) -> String {
        let prefix = self.dispatcher.prefix();
        self.dispatcher
            .expand(logical)
            .iter()
            .map(|path| format!("<script src=\"{prefix}/{path}\"></script>"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Link tags for a CSS asset, one per expanded path.
    pub fn css(&self, logical: &str) -> String {
        let prefix = self.dispatcher.prefix();
        self.dispatcher
            .expand(logical)
            .iter()
            .map(|path| format!("<link rel=\"stylesheet\" href=\"{prefix}/{path}\">"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The raw URL for an asset.
    ///
    /// Always a single URL: the asset-map resolution if present, else the
    /// logical path unchanged. No manifest expansion, since a raw reference
    /// names exactly one file.
    pub fn raw(&self, logical: &str) -> String {
        let resolved = self.dispatcher.map().get(logical).unwrap_or(logical);
        format!("{}/{}", self.dispatcher.prefix(), resolved)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DispatchConfig;
    use crate::dispatch::Dispatcher;
    use crate::graph::{AssetGraph, FsGraph};
    use crate::transmit::HttpTransmitter;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn precompiled_helpers(dir: &TempDir, map_json: &str) -> super::AssetHelpers {
        let map = dir.path().join("asset-map.json");
        fs::write(&map, map_json).unwrap();
        let config = DispatchConfig {
            serve: false,
            asset_map: Some(map),
            ..DispatchConfig::default()
        };
        Arc::new(Dispatcher::new(&config, None, Arc::new(HttpTransmitter))).helpers()
    }

    #[test]
    fn test_js_precompiled() {
        let dir = TempDir::new().unwrap();
        let helpers = precompiled_helpers(&dir, r#"{"app.js": "app-3f9a.js"}"#);

        assert_eq!(
            helpers.js("app.js"),
            "<script src=\"/assets/app-3f9a.js\"></script>"
        );
    }

    #[test]
    fn test_css_precompiled() {
        let dir = TempDir::new().unwrap();
        let helpers = precompiled_helpers(&dir, r#"{"main.css": "main-00ff.css"}"#);

        assert_eq!(
            helpers.css("main.css"),
            "<link rel=\"stylesheet\" href=\"/assets/main-00ff.css\">"
        );
    }

    #[test]
    fn test_js_manifest_expansion_in_serve_mode() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("assets");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.js"), "1").unwrap();
        fs::write(source.join("b.js"), "2").unwrap();
        fs::write(source.join("bundle.mf"), "a.js\nb.js\n").unwrap();

        let graph = Arc::new(FsGraph::new(source, dir.path().join("public")));
        let config = DispatchConfig {
            serve: true,
            ..DispatchConfig::default()
        };
        let helpers = Arc::new(Dispatcher::new(
            &config,
            Some(graph as Arc<dyn AssetGraph>),
            Arc::new(HttpTransmitter),
        ))
        .helpers();

        assert_eq!(
            helpers.js("bundle.mf"),
            "<script src=\"/assets/a.js\"></script>\n<script src=\"/assets/b.js\"></script>"
        );
    }

    #[test]
    fn test_raw_never_expands() {
        let dir = TempDir::new().unwrap();
        let helpers = precompiled_helpers(&dir, r#"{"app.js": "app-3f9a.js"}"#);

        assert_eq!(helpers.raw("app.js"), "/assets/app-3f9a.js");
        // Absent from the map: logical path passes through unchanged
        assert_eq!(helpers.raw("favicon.ico"), "/assets/favicon.ico");
    }

    #[test]
    fn test_helpers_are_repeatable() {
        let dir = TempDir::new().unwrap();
        let helpers = precompiled_helpers(&dir, r#"{"app.js": "app-3f9a.js"}"#);

        let first = helpers.js("app.js");
        let second = helpers.js("app.js");
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_prefix() {
        let dir = TempDir::new().unwrap();
        let map = dir.path().join("asset-map.json");
        fs::write(&map, r#"{"app.js": "app-3f9a.js"}"#).unwrap();
        let config = DispatchConfig {
            serve: false,
            prefix: "/static".to_string(),
            asset_map: Some(map),
            debug: false,
        };
        let helpers = Arc::new(Dispatcher::new(&config, None, Arc::new(HttpTransmitter))).helpers();

        assert_eq!(helpers.raw("app.js"), "/static/app-3f9a.js");
    }
}
