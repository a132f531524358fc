//! URL normalization and logical-path resolution.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use super::Dispatcher;

/// Normalize a request URL: percent-decode, strip query and fragment.
pub(super) fn normalize_url(url: &str) -> String {
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_else(|_| url.to_string());

    decoded
        .split(['?', '#'])
        .next()
        .unwrap_or(&decoded)
        .to_string()
}

/// Extract the logical path from a normalized URL.
///
/// The prefix must match literally at the start of the path and be followed
/// by a `/` separator; `/assetsfoo` does not match prefix `/assets`.
pub(super) fn logical_path<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?.strip_prefix('/')?;
    if rest.is_empty() { None } else { Some(rest) }
}

impl Dispatcher {
    /// Expand a logical path into the ordered servable paths it implies.
    ///
    /// Resolution order is deterministic:
    /// 1. Asset map hit: exactly the mapped physical path. Authoritative,
    ///    never falls through to the graph.
    /// 2. Serve mode: the graph's manifest expansion, in graph order.
    /// 3. The logical path unchanged, so unmanaged files stay referencable.
    pub fn expand(&self, logical: &str) -> Vec<String> {
        if let Some(physical) = self.map.get(logical) {
            return vec![physical.to_string()];
        }

        if self.serve
            && let Some(graph) = &self.graph
            && let Some(asset) = graph.asset_by_logical_path(logical)
        {
            return graph.required_logical_paths(&asset);
        }

        vec![logical.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/assets/app.js"), "/assets/app.js");
        assert_eq!(normalize_url("/assets/app.js?v=123"), "/assets/app.js");
        assert_eq!(normalize_url("/assets/app.js#top"), "/assets/app.js");
        assert_eq!(normalize_url("/assets/my%20lib.js"), "/assets/my lib.js");
    }

    #[test]
    fn test_logical_path_requires_separator() {
        assert_eq!(logical_path("/assets/app.js", "/assets"), Some("app.js"));
        assert_eq!(
            logical_path("/assets/js/app.js", "/assets"),
            Some("js/app.js")
        );
        assert_eq!(logical_path("/assetsfoo/app.js", "/assets"), None);
        assert_eq!(logical_path("/other/app.js", "/assets"), None);
        assert_eq!(logical_path("/assets", "/assets"), None);
        assert_eq!(logical_path("/assets/", "/assets"), None);
    }
}
