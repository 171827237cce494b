//! iNaturalist observation API: endpoint construction and response model.
//!
//! `GET <base>/<id>` returns `{ "results": [ { "photos": [ { "url": ... } ] } ] }`.
//! Only the fields the downloader needs are modeled; everything else is ignored.

use serde::{Deserialize, Deserializer};

use crate::observation::ObservationId;

/// Token that marks the thumbnail rendition in photo URLs.
pub const THUMBNAIL_TOKEN: &str = "square";

/// Top-level API response.
#[derive(Debug, Default, Deserialize)]
pub struct ObservationsPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ObservationDetails>,
}

#[derive(Debug, Deserialize)]
pub struct ObservationDetails {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub url: Option<String>,
    /// License/credit line, logged with the saved file.
    #[serde(default)]
    pub attribution: Option<String>,
}

/// An explicit `null` list reads the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ObservationsPage {
    /// Parses a response body. A JSON `null` body is an empty page.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let page: Option<Self> = serde_json::from_slice(body)?;
        Ok(page.unwrap_or_default())
    }

    /// First result, which is the requested observation.
    pub fn into_first(self) -> Option<ObservationDetails> {
        self.results.into_iter().next()
    }
}

/// `<base>/<id>`, tolerating a trailing slash on `base`.
pub fn observation_endpoint(base: &str, id: &ObservationId) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

/// Rewrites a photo URL to request `size` instead of the thumbnail rendition.
/// URLs without the thumbnail token are returned unchanged.
pub fn photo_url_for_size(url: &str, size: &str) -> String {
    url.replace(THUMBNAIL_TOKEN, size)
}
