//! The library code for the `sitemapper` sitemap generator. A build is a
//! single synchronous pass over an already-rendered static site:
//!
//! 1. Discovering `.html` pages beneath the site root ([`crate::scan`])
//! 2. Dropping templates, partials and other non-public files
//!    ([`crate::exclude`])
//! 3. Turning each file path into a public URL ([`crate::url`])
//! 4. Inferring a priority and change frequency from the URL
//!    ([`crate::classify`])
//! 5. Rendering the sitemap document ([`crate::render`]) and writing it
//!    ([`crate::build`])
//!
//! Every stage reads an immutable [`config::Config`], so nothing is shared
//! between builds except the output file.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod classify;
pub mod config;
pub mod exclude;
pub mod logging;
pub mod render;
pub mod report;
pub mod scan;
pub mod url;
