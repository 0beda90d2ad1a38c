//! Configuration for PDF assembly.
//!
//! Paper size and orientation are passed to the document constructor; the
//! remaining knobs (header version and the document information dictionary)
//! live here.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Writer configuration.
///
/// Every field has a fixed default so two documents built with the same
/// calls serialize to identical bytes. The creation date is never read from
/// the clock; it is only written when the caller supplies one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// PDF version written in the header (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Producer written to the info dictionary
    pub producer: String,
    /// Caller-supplied creation date
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: None,
            producer: "pdf_assembly".to_string(),
            creation_date: None,
        }
    }
}

impl WriterConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the header version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set document keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the creation date written as `/CreationDate`.
    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.creation_date = Some(date);
        self
    }
}

/// Format a date as a PDF date string: `D:YYYYMMDDHHmmSS+HH'mm'`.
pub fn pdf_date(date: &DateTime<FixedOffset>) -> String {
    let offset = date.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let abs = offset.abs();
    format!(
        "D:{}{}{:02}'{:02}'",
        date.format("%Y%m%d%H%M%S"),
        sign,
        abs / 3600,
        (abs % 3600) / 60
    )
}
