//! Converts page paths into public URLs. `about.html` becomes `/about`,
//! `categories/index.html` becomes `/categories/`, and the root `index.html`
//! becomes `/`. The conversion is purely lexical.

use crate::scan::HTML_EXTENSION;
use url::Url;

const INDEX_FILE: &str = "index.html";

/// Returns the canonical URL path (always starting with `/`) for a path
/// relative to the scan root.
pub fn url_path(relative: &str) -> String {
    let normalized = relative.replace('\\', "/");
    let mut path = normalized.strip_prefix("./").unwrap_or(&normalized);

    if let Some(dir) = path.strip_suffix(INDEX_FILE) {
        path = dir;
    } else if let Some(stem) = path.strip_suffix(HTML_EXTENSION) {
        path = stem;
    }

    if path.is_empty() {
        String::from("/")
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{}", path)
    }
}

/// Prefixes URL paths with a site's base URL.
pub struct Converter<'a> {
    prefix: &'a str,
}

impl<'a> Converter<'a> {
    /// Constructs a new `Converter`. A trailing slash on `base_url` is
    /// dropped so that joining never doubles it.
    pub fn new(base_url: &'a Url) -> Converter<'a> {
        Converter {
            prefix: base_url.as_str().trim_end_matches('/'),
        }
    }

    /// Converts a URL path from [`url_path`] into an absolute URL.
    pub fn convert(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }
}
