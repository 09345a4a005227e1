use once_cell::sync::Lazy;
use poem::http::HeaderMap;
use regex::Regex;

/// Header set by reverse proxies that serve the application under a path
/// prefix.
pub(crate) const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";

pub(crate) const INDEX_HTML: &str = "index.html";
pub(crate) const DOC_JSON: &str = "doc.json";

/// Where the endpoint is mounted, as seen by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mount {
    pub(crate) prefix: String,
    pub(crate) doc_url: String,
}

impl Mount {
    /// Resolves the mount from the original request path and the path the
    /// router handed to the endpoint.
    ///
    /// `url` is the configured document URL; when empty the document is
    /// expected at `<prefix>/doc.json`.
    pub(crate) fn resolve(original: &str, routed: &str, headers: &HeaderMap, url: &str) -> Self {
        let mut prefix = route_prefix(original, remainder(routed));
        if let Some(forwarded) = forwarded_prefix(headers) {
            prefix = merge_slashes(&format!("{forwarded}{prefix}"));
        }

        let doc_url = if url.is_empty() {
            join(&prefix, DOC_JSON)
        } else {
            url.to_string()
        };

        Self { prefix, doc_url }
    }

    pub(crate) fn index_url(&self) -> String {
        join(&self.prefix, INDEX_HTML)
    }
}

/// Returns the part of a routed path below the mount point.
pub(crate) fn remainder(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Strips the routed remainder from the original request path.
fn route_prefix(original: &str, remainder: &str) -> String {
    let prefix = original.strip_suffix(remainder).unwrap_or(original);
    merge_slashes(prefix.trim_end_matches('/'))
}

/// Reads `X-Forwarded-Prefix` without its trailing slashes.
///
/// A prefix made only of slashes collapses to `/`.
fn forwarded_prefix(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(X_FORWARDED_PREFIX)?.to_str().ok()?;
    if value.is_empty() {
        return None;
    }

    match value.trim_end_matches('/') {
        "" => Some(&value[..1]),
        trimmed => Some(trimmed),
    }
}

fn merge_slashes(path: &str) -> String {
    static RE_MERGE_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new("//+").unwrap());

    RE_MERGE_SLASH.replace_all(path, "/").to_string()
}

/// Joins a prefix and a file name into an absolute path.
fn join(prefix: &str, file: &str) -> String {
    let mut path = merge_slashes(&format!("{prefix}/{file}"));
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    path
}
