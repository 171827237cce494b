//! Observation rows and the names derived from them.
//!
//! An `ObservationRecord` comes from one CSV row. The numeric observation id is
//! taken from the last path segment of its URL, and the species folder from its
//! scientific name.

mod sanitize;

pub use sanitize::sanitize_species_name;

use std::fmt;

/// One accepted CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    pub url: String,
    pub scientific_name: String,
}

impl ObservationRecord {
    pub fn new(url: impl Into<String>, scientific_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scientific_name: scientific_name.into(),
        }
    }

    /// Numeric observation id from the URL, if the URL has one.
    pub fn observation_id(&self) -> Option<ObservationId> {
        ObservationId::from_url(&self.url)
    }

    /// Folder name for this record's species; `observation_<id>` when the
    /// scientific name sanitizes to nothing.
    pub fn species_folder(&self, id: &ObservationId) -> String {
        let sanitized = sanitize_species_name(&self.scientific_name);
        if sanitized.is_empty() {
            format!("observation_{id}")
        } else {
            sanitized
        }
    }
}

/// Decimal observation identifier, kept as text so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationId(String);

impl ObservationId {
    /// Extracts the id from the text after the last `/` of `url`, once
    /// surrounding slashes are stripped.
    ///
    /// The URL is not parsed: a query string or fragment after the id makes the
    /// segment non-numeric and the URL is rejected.
    pub fn from_url(url: &str) -> Option<Self> {
        let segment = url.trim_matches('/').rsplit('/').next()?;
        Self::parse(segment)
    }

    /// Accepts a non-empty string of ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for the `index`-th photo (1-based): `<id>_<index>.jpg`.
    pub fn photo_filename(&self, index: usize) -> String {
        format!("{}_{}.jpg", self.0, index)
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
