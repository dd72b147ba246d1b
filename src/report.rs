//! Tallies built entries into a fixed set of page categories for the
//! end-of-run summary. This taxonomy is independent of the classification
//! tables.

use crate::render::Entry;
use std::fmt;

/// `(category, substring of the source path)`. `Other` collects entries that
/// match none of these.
const CATEGORIES: &[(&str, &str)] = &[
    ("Homepage", "index.html"),
    ("Categories", "categories/"),
    ("Posts", "posts/"),
    ("Products", "products/"),
    ("Policy", "policy/"),
];

const OTHER: &str = "Other";

/// Per-category entry counts, in a fixed display order. A single entry may be
/// counted in more than one named category.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub total: usize,
    pub counts: Vec<(&'static str, usize)>,
}

impl Report {
    pub fn tally(entries: &[Entry]) -> Report {
        let mut counts: Vec<(&'static str, usize)> =
            CATEGORIES.iter().map(|&(name, _)| (name, 0)).collect();
        let mut other = 0;
        for entry in entries {
            let mut matched = false;
            for (i, &(_, pattern)) in CATEGORIES.iter().enumerate() {
                if entry.source.contains(pattern) {
                    counts[i].1 += 1;
                    matched = true;
                }
            }
            if !matched {
                other += 1;
            }
        }
        counts.push((OTHER, other));
        Report {
            total: entries.len(),
            counts,
        }
    }
}

impl fmt::Display for Report {
    /// Lists the non-empty categories, one per line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Page statistics:")?;
        for (name, count) in self.counts.iter().filter(|(_, n)| *n > 0) {
            writeln!(f, "   {}: {}", name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classify::ChangeFreq;
    use chrono::Utc;

    fn entry(source: &str) -> Entry {
        Entry {
            loc: String::new(),
            lastmod: Utc::now(),
            changefreq: ChangeFreq::Monthly,
            priority: 0.5,
            source: source.to_owned(),
        }
    }

    fn count(report: &Report, category: &str) -> usize {
        report
            .counts
            .iter()
            .find(|(name, _)| *name == category)
            .map_or(0, |&(_, n)| n)
    }

    #[test]
    fn test_tally() {
        let report = Report::tally(&[
            entry("index.html"),
            entry("about.html"),
            entry("categories/index.html"),
            entry("categories/tech.html"),
            entry("posts/first.html"),
        ]);
        assert_eq!(5, report.total);
        assert_eq!(2, count(&report, "Homepage"));
        assert_eq!(2, count(&report, "Categories"));
        assert_eq!(1, count(&report, "Posts"));
        assert_eq!(0, count(&report, "Products"));
        assert_eq!(1, count(&report, "Other"));
    }

    #[test]
    fn test_display_skips_empty_categories() {
        let text = Report::tally(&[entry("about.html"), entry("policy/privacy.html")]).to_string();
        assert!(text.contains("Policy: 1"));
        assert!(text.contains("Other: 1"));
        assert!(!text.contains("Posts"));
    }
}
