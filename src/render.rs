//! Serializes [`Entry`]s into a sitemap protocol document
//! (<https://www.sitemaps.org/protocol.html>).

use crate::classify::ChangeFreq;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` element of the sitemap.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The absolute public URL.
    pub loc: String,

    /// The source file's modification time.
    pub lastmod: DateTime<Utc>,

    pub changefreq: ChangeFreq,

    pub priority: f64,

    /// The `/`-separated path of the page relative to the scan root. Not
    /// rendered; used for reporting.
    pub source: String,
}

/// Renders `entries` in order, one `<url>` block each with `<loc>`,
/// `<lastmod>`, `<changefreq>` and `<priority>` children.
pub fn render(entries: &[Entry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    emit(&mut writer, Event::Start(urlset))?;

    for entry in entries {
        emit(&mut writer, Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &entry.loc)?;
        text_element(
            &mut writer,
            "lastmod",
            &entry.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;
        text_element(&mut writer, "changefreq", entry.changefreq.as_str())?;
        text_element(&mut writer, "priority", &entry.priority.to_string())?;
        emit(&mut writer, Event::End(BytesEnd::new("url")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("urlset")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|err| Error::Xml(err.to_string()))
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure serializing the document.
#[derive(Debug)]
pub enum Error {
    /// Returned when the XML writer fails.
    Xml(String),

    /// Returned when the rendered bytes aren't UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Xml(err) => write!(f, "Rendering sitemap XML: {}", err),
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Xml(_) => None,
            Error::Utf8(err) => Some(err),
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}
