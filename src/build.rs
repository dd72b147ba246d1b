//! Exports the [`build_sitemap`] function which stitches together the
//! high-level steps of building a sitemap: discovering pages
//! ([`crate::scan`]), dropping non-public ones ([`crate::exclude`]),
//! resolving URLs ([`crate::url`]) and classifying them
//! ([`crate::classify`]), rendering the document ([`crate::render`]), and
//! writing it to disk.
//!
//! The document is rendered completely in memory before the output file is
//! touched, so a failure before the write leaves any previous sitemap intact.

use crate::classify::Classifier;
use crate::config::Config;
use crate::exclude::ExclusionFilter;
use crate::render::{render, Entry, Error as RenderError};
use crate::report::Report;
use crate::scan::{scan, Candidate, Error as ScanError};
use crate::url::{url_path, Converter};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a successful build produced.
#[derive(Debug)]
pub struct Summary {
    /// Where the sitemap was written.
    pub output: PathBuf,

    /// Entry counts by page category.
    pub report: Report,
}

/// Builds the sitemap for the pages beneath `root` and writes it to
/// `config.output_file` (resolved against `root` when relative), overwriting
/// any previous file.
pub fn build_sitemap(config: &Config, root: &Path) -> Result<Summary> {
    let candidates = scan(root, config.sort_paths)?;
    let entries = entries(config, &candidates);
    let document = render(&entries)?;

    let output = root.join(&config.output_file);
    std::fs::write(&output, document).map_err(|err| Error::Write {
        path: output.clone(),
        err,
    })?;
    tracing::info!(output = %output.display(), entries = entries.len(), "wrote sitemap");

    Ok(Summary {
        output,
        report: Report::tally(&entries),
    })
}

/// Filters and classifies `candidates`, returning one [`Entry`] per kept page
/// in the same order.
pub fn entries(config: &Config, candidates: &[Candidate]) -> Vec<Entry> {
    let filter = ExclusionFilter::new(&config.exclude, &config.reserved);
    let classifier = Classifier::new(&config.priority, &config.changefreq);
    let converter = Converter::new(&config.base_url);

    let entries: Vec<Entry> = candidates
        .iter()
        .filter(|candidate| filter.keeps(&candidate.relative))
        .map(|candidate| {
            let path = url_path(&candidate.relative);
            tracing::debug!(source = %candidate.relative, url = %path, "kept");
            Entry {
                loc: converter.convert(&path),
                lastmod: candidate.modified,
                changefreq: classifier.changefreq(&path),
                priority: classifier.priority(&path),
                source: candidate.relative.clone(),
            }
        })
        .collect();

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.loc.as_str()) {
            tracing::warn!(loc = %entry.loc, source = %entry.source, "duplicate sitemap URL");
        }
    }
    entries
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a sitemap. Errors can be during scanning,
/// rendering, or writing the output file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the scan root can't be walked.
    Filesystem(ScanError),

    /// Returned when the document can't be rendered.
    Render(RenderError),

    /// Returned when the output file can't be written.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Filesystem(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::Write { path, err } => {
                write!(f, "Writing sitemap '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Filesystem(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<ScanError> for Error {
    /// Converts [`ScanError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ScanError) -> Error {
        Error::Filesystem(err)
    }
}

impl From<RenderError> for Error {
    /// Converts [`RenderError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: RenderError) -> Error {
        Error::Render(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classify::ChangeFreq;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn tree(files: &[&str]) -> std::io::Result<TempDir> {
        let dir = TempDir::new()?;
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "<html></html>")?;
        }
        Ok(dir)
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.set_base_url("https://example.test").unwrap();
        config
    }

    fn locs(xml: &str) -> Vec<&str> {
        xml.split("<loc>")
            .skip(1)
            .filter_map(|rest| rest.split("</loc>").next())
            .collect()
    }

    #[test]
    fn test_build_small_site() -> Result<()> {
        let dir = tree(&[
            "index.html",
            "about.html",
            "categories/tech.html",
            "templates/header.html",
        ])
        .unwrap();
        let summary = build_sitemap(&test_config(), dir.path())?;
        assert_eq!(dir.path().join("sitemap.xml"), summary.output);
        assert_eq!(3, summary.report.total);

        let xml = fs::read_to_string(&summary.output).unwrap();
        assert_eq!(
            vec![
                "https://example.test/about",
                "https://example.test/categories/tech",
                "https://example.test/",
            ],
            locs(&xml)
        );
        assert!(!xml.contains("templates"));
        assert!(xml.contains("<changefreq>weekly</changefreq>\n    <priority>0.7</priority>"));
        Ok(())
    }

    #[test]
    fn test_entries_classify_url_paths() -> Result<()> {
        let dir = tree(&["index.html", "about.html", "categories/tech.html", "policy/terms.html"])
            .unwrap();
        let config = test_config();
        let candidates = scan(dir.path(), true)?;
        let entries = entries(&config, &candidates);
        let classes: Vec<(&str, f64, ChangeFreq)> = entries
            .iter()
            .map(|e| (e.loc.as_str(), e.priority, e.changefreq))
            .collect();
        assert_eq!(
            vec![
                ("https://example.test/about", 0.5, ChangeFreq::Monthly),
                ("https://example.test/categories/tech", 0.7, ChangeFreq::Weekly),
                ("https://example.test/", 0.5, ChangeFreq::Monthly),
                ("https://example.test/policy/terms", 0.5, ChangeFreq::Yearly),
            ],
            classes
        );
        Ok(())
    }

    #[test]
    fn test_entry_count_is_discovered_minus_excluded() -> Result<()> {
        let dir = tree(&[
            "index.html",
            "404.html",
            "posts/a.html",
            "posts/b.html",
            "partials/nav.html",
            "scripts/tool.html",
            "node_modules/x/index.html",
        ])
        .unwrap();
        let config = test_config();
        let candidates = scan(dir.path(), true)?;
        assert_eq!(7, candidates.len());
        assert_eq!(3, entries(&config, &candidates).len());
        Ok(())
    }

    #[test]
    fn test_rebuild_is_byte_identical() -> Result<()> {
        let dir = tree(&["index.html", "posts/a.html", "products/index.html"]).unwrap();
        let config = test_config();
        let first = fs::read(build_sitemap(&config, dir.path())?.output).unwrap();
        let second = fs::read(build_sitemap(&config, dir.path())?.output).unwrap();
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_output_is_overwritten() -> Result<()> {
        let dir = tree(&["index.html"]).unwrap();
        fs::write(dir.path().join("sitemap.xml"), "x".repeat(4096)).unwrap();
        let summary = build_sitemap(&test_config(), dir.path())?;
        let xml = fs::read_to_string(summary.output).unwrap();
        assert!(xml.ends_with("</urlset>"));
        assert!(!xml.contains("xxx"));
        Ok(())
    }

    #[test]
    fn test_missing_root_is_a_filesystem_error() {
        let dir = TempDir::new().unwrap();
        match build_sitemap(&test_config(), &dir.path().join("missing")) {
            Err(Error::Filesystem(_)) => {}
            other => panic!("wanted a filesystem error; found {:?}", other),
        }
    }

    #[test]
    fn test_unwritable_output_is_a_write_error() {
        let dir = tree(&["index.html"]).unwrap();
        let mut config = test_config();
        config.output_file = PathBuf::from("missing-dir/sitemap.xml");
        match build_sitemap(&config, dir.path()) {
            Err(Error::Write { path, .. }) => {
                assert_eq!(dir.path().join("missing-dir/sitemap.xml"), path)
            }
            other => panic!("wanted a write error; found {:?}", other),
        }
    }

    #[test]
    fn test_configs_are_independent() -> Result<()> {
        let dir = tree(&["posts/a.html"]).unwrap();
        let candidates = scan(dir.path(), true)?;
        let mut other = test_config();
        other.set_base_url("https://other.test/site/").unwrap();
        assert_eq!(
            "https://example.test/posts/a",
            entries(&test_config(), &candidates)[0].loc
        );
        assert_eq!(
            "https://other.test/site/posts/a",
            entries(&other, &candidates)[0].loc
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_urls_are_kept() {
        let modified = Utc::now();
        let candidates = vec![
            Candidate::new(PathBuf::from("about.html"), modified),
            Candidate::new(PathBuf::from("./about.html"), modified),
        ];
        let entries = entries(&test_config(), &candidates);
        assert_eq!(2, entries.len());
        assert_eq!("https://example.test/about", entries[0].loc);
        assert_eq!(entries[0].loc, entries[1].loc);
        assert_ne!(entries[0].source, entries[1].source);
    }
}
