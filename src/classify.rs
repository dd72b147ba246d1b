//! Infers a page's priority and change frequency from its URL path using
//! ordered pattern tables. See [`Classifier`].

use serde::Deserialize;
use std::fmt;

/// The default priority for a URL that matches no priority [`Rule`].
pub const DEFAULT_PRIORITY: f64 = 0.5;

/// The default change frequency for a URL that matches no frequency [`Rule`].
pub const DEFAULT_CHANGEFREQ: ChangeFreq = ChangeFreq::Monthly;

/// How often a page is expected to change, as advertised in the sitemap's
/// `<changefreq>` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    /// Implements [`fmt::Display`] for [`ChangeFreq`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row of a classification table: if `pattern` is a substring of the
/// URL path, the row's `value` applies.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Rule<T> {
    pub pattern: String,
    pub value: T,
}

impl<T> Rule<T> {
    pub fn new(pattern: &str, value: T) -> Rule<T> {
        Rule {
            pattern: pattern.to_owned(),
            value,
        }
    }
}

/// Returns the value of the first rule (in declared order) whose pattern
/// occurs in `url`.
fn first_match<'a, T>(rules: &'a [Rule<T>], url: &str) -> Option<&'a T> {
    rules
        .iter()
        .find(|rule| url.contains(rule.pattern.as_str()))
        .map(|rule| &rule.value)
}

/// Classifies URL paths against a priority table and a change-frequency
/// table. The two tables are consulted independently, and within each table
/// the first declared match wins.
pub struct Classifier<'a> {
    priority: &'a [Rule<f64>],
    changefreq: &'a [Rule<ChangeFreq>],
}

impl<'a> Classifier<'a> {
    pub fn new(
        priority: &'a [Rule<f64>],
        changefreq: &'a [Rule<ChangeFreq>],
    ) -> Classifier<'a> {
        Classifier {
            priority,
            changefreq,
        }
    }

    pub fn priority(&self, url: &str) -> f64 {
        first_match(self.priority, url)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn changefreq(&self, url: &str) -> ChangeFreq {
        first_match(self.changefreq, url)
            .copied()
            .unwrap_or(DEFAULT_CHANGEFREQ)
    }
}
