//! Decides which candidates are public pages. A relative path is dropped when
//! any exclusion regex matches it or when it contains a reserved directory
//! name (templates, partials, internal scripts).

use regex::Regex;

pub struct ExclusionFilter<'a> {
    patterns: &'a [Regex],
    reserved: &'a [String],
}

impl<'a> ExclusionFilter<'a> {
    pub fn new(patterns: &'a [Regex], reserved: &'a [String]) -> ExclusionFilter<'a> {
        ExclusionFilter { patterns, reserved }
    }

    /// Returns `true` if `relative` (a `/`-separated path relative to the
    /// scan root) should become a sitemap entry. The whole path is tested,
    /// not just the file name.
    pub fn keeps(&self, relative: &str) -> bool {
        let excluded = self.patterns.iter().any(|p| p.is_match(relative))
            || self.reserved.iter().any(|s| relative.contains(s.as_str()));
        if excluded {
            tracing::debug!(path = relative, "excluded");
        }
        !excluded
    }
}
