//! Discovers candidate pages: every `.html` file beneath the scan root,
//! depth-first, together with its modification time.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const HTML_EXTENSION: &str = ".html";

/// A page document found beneath the scan root.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// The path relative to the scan root, as found on disk.
    pub path: PathBuf,

    /// `path` rendered with `/` separators. Exclusion rules, URL derivation
    /// and reporting all work on this form.
    pub relative: String,

    /// The file's last modification time.
    pub modified: DateTime<Utc>,
}

impl Candidate {
    pub fn new(path: PathBuf, modified: DateTime<Utc>) -> Candidate {
        let relative = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Candidate {
            path,
            relative,
            modified,
        }
    }
}

/// Walks `root` depth-first and returns every `.html` file beneath it. With
/// `sort`, each directory's entries are visited in file name order; otherwise
/// they follow the order in which the platform lists them.
pub fn scan(root: &Path, sort: bool) -> Result<Vec<Candidate>> {
    let metadata = std::fs::metadata(root).map_err(|err| Error::Root {
        path: root.to_owned(),
        err,
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.to_owned()));
    }

    let mut walker = WalkDir::new(root).follow_links(true);
    if sort {
        walker = walker.sort_by_file_name();
    }

    let mut candidates = Vec::new();
    for result in walker {
        let entry = result?;
        if !entry.file_type().is_file()
            || !entry.file_name().to_string_lossy().ends_with(HTML_EXTENSION)
        {
            continue;
        }

        // A file may vanish between the listing and this stat.
        let modified = entry
            .metadata()?
            .modified()
            .map_err(|err| Error::Metadata {
                path: entry.path().to_owned(),
                err,
            })?;

        // strip_prefix shouldn't fail since walkdir only yields descendants
        // of `root`
        let path = entry.path().strip_prefix(root).unwrap().to_owned();
        candidates.push(Candidate::new(path, modified.into()));
    }
    tracing::info!(root = %root.display(), count = candidates.len(), "scanned for pages");
    Ok(candidates)
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a filesystem problem while discovering pages. None of these are
/// retried.
#[derive(Debug)]
pub enum Error {
    /// Returned when the scan root is missing or unreadable.
    Root { path: PathBuf, err: std::io::Error },

    /// Returned when the scan root exists but isn't a directory.
    NotADirectory(PathBuf),

    /// Returned for WalkDir I/O errors, including files that disappear
    /// mid-walk.
    WalkDir(walkdir::Error),

    /// Returned when a file's modification time can't be read.
    Metadata { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Root { path, err } => {
                write!(f, "Reading scan root '{}': {}", path.display(), err)
            }
            Error::NotADirectory(path) => {
                write!(f, "Scan root '{}' is not a directory", path.display())
            }
            Error::WalkDir(err) => err.fmt(f),
            Error::Metadata { path, err } => write!(
                f,
                "Reading modification time of '{}': {}",
                path.display(),
                err
            ),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Root { path: _, err } => Some(err),
            Error::NotADirectory(_) => None,
            Error::WalkDir(err) => Some(err),
            Error::Metadata { path: _, err } => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while walking the scan root.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
