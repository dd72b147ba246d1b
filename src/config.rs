//! Defines the immutable [`Config`] that drives a sitemap build. The
//! compiled-in defaults live in [`Config::default`]; a `sitemap.yaml` project
//! file can replace any of them.

use crate::classify::{ChangeFreq, Rule};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the optional project file looked up in the scan root.
pub const PROJECT_FILE: &str = "sitemap.yaml";

const BASE_URL: &str = "https://homutemu.example";
const OUTPUT_FILE: &str = "sitemap.xml";

const EXCLUDE_PATTERNS: &[&str] = &[
    r"templates/",
    r"partials/",
    r"scripts/",
    r"\.git/",
    r"node_modules/",
    r"404\.html$",
    r"\.(css|js|png|jpg|jpeg|gif|svg|ico)$",
    r"partials\.html$",
    r"templates\.html$",
];

const RESERVED_SUBSTRINGS: &[&str] = &["partials", "templates", "scripts"];

const PRIORITY_TABLE: &[(&str, f64)] = &[
    ("index.html", 1.0),
    ("about.html", 0.8),
    ("contact.html", 0.8),
    ("categories/", 0.7),
    ("posts/", 0.6),
    ("products/", 0.6),
    ("policy/", 0.5),
];

const CHANGEFREQ_TABLE: &[(&str, ChangeFreq)] = &[
    ("index.html", ChangeFreq::Daily),
    ("categories/", ChangeFreq::Weekly),
    ("posts/", ChangeFreq::Monthly),
    ("products/", ChangeFreq::Monthly),
    ("policy/", ChangeFreq::Yearly),
    ("about.html", ChangeFreq::Yearly),
    ("contact.html", ChangeFreq::Yearly),
];

/// Everything a build needs to know besides the scan root. A [`Config`] is
/// assembled once and then only borrowed, so several differently-configured
/// builds can run side by side.
#[derive(Clone, Debug)]
pub struct Config {
    /// Prepended to every URL path. Any trailing slash is ignored (see
    /// [`crate::url::Converter`]).
    pub base_url: Url,

    /// Where the document is written, relative to the scan root unless
    /// absolute.
    pub output_file: PathBuf,

    /// A relative path matching any of these is dropped.
    pub exclude: Vec<Regex>,

    /// A relative path containing any of these directory names is dropped.
    pub reserved: Vec<String>,

    /// Ordered priority table; first match wins.
    pub priority: Vec<Rule<f64>>,

    /// Ordered change-frequency table; first match wins.
    pub changefreq: Vec<Rule<ChangeFreq>>,

    /// Visit each directory's entries in file name order instead of the
    /// platform's directory listing order.
    pub sort_paths: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            // the built-in URL and patterns are constants known to parse
            base_url: Url::parse(BASE_URL).unwrap(),
            output_file: PathBuf::from(OUTPUT_FILE),
            exclude: EXCLUDE_PATTERNS
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect(),
            reserved: RESERVED_SUBSTRINGS.iter().map(|s| s.to_string()).collect(),
            priority: PRIORITY_TABLE
                .iter()
                .map(|&(pattern, value)| Rule::new(pattern, value))
                .collect(),
            changefreq: CHANGEFREQ_TABLE
                .iter()
                .map(|&(pattern, value)| Rule::new(pattern, value))
                .collect(),
            sort_paths: true,
        }
    }
}

/// The on-disk shape of `sitemap.yaml`. Every key is optional; a present key
/// replaces the default wholesale.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Project {
    base_url: Option<String>,
    output_file: Option<PathBuf>,
    exclude: Option<Vec<String>>,
    reserved: Option<Vec<String>>,
    priority: Option<Vec<Rule<f64>>>,
    changefreq: Option<Vec<Rule<ChangeFreq>>>,
    sort_paths: Option<bool>,
}

impl Config {
    /// Loads `sitemap.yaml` from `dir` if there is one, otherwise returns the
    /// defaults.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.is_file() {
            Config::from_project_file(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Loads a project file, layering its keys over [`Config::default`].
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        Config::default().apply(project)
    }

    fn apply(mut self, project: Project) -> Result<Config> {
        if let Some(base_url) = project.base_url {
            self.set_base_url(&base_url)?;
        }
        if let Some(output_file) = project.output_file {
            self.output_file = output_file;
        }
        if let Some(exclude) = project.exclude {
            self.exclude = exclude
                .iter()
                .map(|p| Regex::new(p))
                .collect::<std::result::Result<_, _>>()?;
        }
        if let Some(reserved) = project.reserved {
            self.reserved = reserved;
        }
        if let Some(priority) = project.priority {
            for rule in &priority {
                if !(0.0..=1.0).contains(&rule.value) {
                    return Err(Error::Priority {
                        pattern: rule.pattern.clone(),
                        value: rule.value,
                    });
                }
            }
            self.priority = priority;
        }
        if let Some(changefreq) = project.changefreq {
            self.changefreq = changefreq;
        }
        if let Some(sort_paths) = project.sort_paths {
            self.sort_paths = sort_paths;
        }
        Ok(self)
    }

    /// Assembles the configuration for a run: `project_file` if given,
    /// otherwise `root`'s `sitemap.yaml` (or the defaults), with `output_file`
    /// and `base_url` applied on top.
    pub fn load(
        root: &Path,
        project_file: Option<&Path>,
        output_file: Option<PathBuf>,
        base_url: Option<&str>,
    ) -> Result<Config> {
        let mut config = match project_file {
            Some(path) => Config::from_project_file(path)?,
            None => Config::from_directory(root)?,
        };
        if let Some(output_file) = output_file {
            config.output_file = output_file;
        }
        if let Some(base_url) = base_url {
            config.set_base_url(base_url)?;
        }
        Ok(config)
    }

    /// Replaces the base URL. The URL must be absolute and able to carry a
    /// path (so `mailto:` and friends are rejected).
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::BaseUrl(base_url.to_owned()));
        }
        self.base_url = url;
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem assembling a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the project file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid YAML or has unknown keys.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when an exclusion pattern isn't a valid regular expression.
    Regex(regex::Error),

    /// Returned when the base URL doesn't parse.
    UrlParse(url::ParseError),

    /// Returned when the base URL parses but can't have paths appended.
    BaseUrl(String),

    /// Returned when a priority lies outside `0.0..=1.0`.
    Priority { pattern: String, value: f64 },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening project file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => {
                write!(f, "Parsing project file: {}", err)
            }
            Error::Regex(err) => write!(f, "Invalid exclusion pattern: {}", err),
            Error::UrlParse(err) => write!(f, "Invalid base URL: {}", err),
            Error::BaseUrl(url) => {
                write!(f, "Base URL `{}` cannot have paths appended", url)
            }
            Error::Priority { pattern, value } => write!(
                f,
                "Priority {} for pattern `{}` is outside 0.0..=1.0",
                value, pattern
            ),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::Regex(err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::BaseUrl(_) => None,
            Error::Priority { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Error {
        Error::Regex(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL parsing.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
