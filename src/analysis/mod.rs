//! Document analysis module
//!
//! This module turns raw HTML into a [`DocumentAnalysis`]: heading counts,
//! HTML version, page title, login-form presence, and the raw ordered list of
//! anchor hrefs. Parsing is lenient (html5ever via scraper) and the traversal
//! is a single explicit-stack walk, so adversarially nested documents cannot
//! exhaust the native call stack.

mod analyzer;

pub use analyzer::{analyze_document, AnalyzeError, MAX_DOCUMENT_DEPTH};

use std::fmt;

/// HTML version detected for a document
///
/// A DOCTYPE classification is authoritative. Absent a usable DOCTYPE, a
/// `version` attribute on the `html` element is recorded verbatim, and a bare
/// `html` element defaults to HTML5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlVersion {
    Html5,
    Html401,
    Xhtml,
    /// Verbatim value of an `html version="..."` attribute
    Declared(String),
    Unknown,
}

impl HtmlVersion {
    /// Classifies a lower-cased DOCTYPE string
    ///
    /// Returns None when the doctype does not mention HTML at all, in which
    /// case it contributes nothing to version detection.
    pub fn from_doctype(doctype: &str) -> Option<Self> {
        let doctype = doctype.to_lowercase();
        if !doctype.contains("html") {
            return None;
        }
        if doctype.contains("4.01") {
            Some(Self::Html401)
        } else if doctype.contains("xhtml") {
            Some(Self::Xhtml)
        } else {
            Some(Self::Html5)
        }
    }

    /// String form used for display and database storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html5 => "HTML5",
            Self::Html401 => "HTML 4.01",
            Self::Xhtml => "XHTML",
            Self::Declared(v) => v,
            Self::Unknown => "unknown",
        }
    }

    /// Parses a version from its database string representation
    ///
    /// Unrecognized non-empty strings round-trip through `Declared`.
    pub fn from_db_string(s: &str) -> Self {
        match s {
            "HTML5" => Self::Html5,
            "HTML 4.01" => Self::Html401,
            "XHTML" => Self::Xhtml,
            "unknown" | "" => Self::Unknown,
            other => Self::Declared(other.to_string()),
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for HtmlVersion {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Everything extracted from one pass over the document tree
///
/// Link counts are not part of this struct: classification happens against
/// the page's base URL after analysis, over the raw `hrefs` list.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalysis {
    /// Page title from the first text child of a `title` element
    pub title: String,

    /// Detected HTML version
    pub html_version: HtmlVersion,

    /// Heading counts for h1 through h6, in order
    pub heading_counts: [u32; 6],

    /// True if any form subtree looks like a login form
    pub has_login_form: bool,

    /// Raw anchor href values in document order, including empty and
    /// fragment-only values
    pub hrefs: Vec<String>,
}
