//! One observation: API lookup, then the photo loop.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::error::RecordError;
use super::{DownloadOptions, Progress};
use crate::api::{observation_endpoint, photo_url_for_size, ObservationsPage, Photo};
use crate::fetch;
use crate::observation::{ObservationId, ObservationRecord};

/// Record that passed the lookup and has photos to fetch.
pub(super) struct PreparedRecord {
    pub id: ObservationId,
    pub folder: PathBuf,
    pub photos: Vec<Photo>,
}

/// Why a record was passed over without reaching the photo loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Skip {
    InvalidUrlFormat,
    NoResults,
    NoPhotos,
}

/// Outcome of the steps before the photo loop.
pub(super) enum Prepared {
    Ready(PreparedRecord),
    Skipped(Skip),
}

/// Photo counts for one record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct PhotoTally {
    pub saved: usize,
    pub failed: usize,
}

/// Steps before the photo loop: id, species folder, API lookup, result checks.
pub(super) fn prepare<W: Write>(
    opts: &DownloadOptions,
    record: &ObservationRecord,
    progress: &mut Progress<W>,
) -> Result<Prepared, RecordError> {
    let Some(id) = record.observation_id() else {
        progress.warn(format_args!("\nSkipping invalid URL format: {}", record.url));
        return Ok(Prepared::Skipped(Skip::InvalidUrlFormat));
    };

    let folder = opts.base_output_dir.join(record.species_folder(&id));
    fs::create_dir_all(&folder).map_err(|e| RecordError::io(&folder, e))?;

    progress.info(format_args!(
        "\nProcessing Obs ID: {} for '{}'...",
        id, record.scientific_name
    ));

    let endpoint = observation_endpoint(&opts.api_base_url, &id);
    let response = fetch::get(&endpoint, &[("User-Agent", opts.user_agent.as_str())], &opts.http)?;
    tracing::debug!(url = %endpoint, bytes = response.body.len(), "api lookup ok");

    let page = ObservationsPage::from_slice(&response.body)?;
    let Some(details) = page.into_first() else {
        progress.info(format_args!(
            "  --> No data returned from API for observation {id}."
        ));
        return Ok(Prepared::Skipped(Skip::NoResults));
    };
    if details.photos.is_empty() {
        progress.info(format_args!("  --> No photos found for observation {id}."));
        return Ok(Prepared::Skipped(Skip::NoPhotos));
    }

    Ok(Prepared::Ready(PreparedRecord {
        id,
        folder,
        photos: details.photos,
    }))
}

/// Downloads every photo of `prepared` in API order.
///
/// A failed photo request is reported and the loop moves on. A photo entry
/// without a URL or a failed write ends the loop for this record; photos
/// already written stay on disk.
pub(super) fn download_photos<W: Write>(
    opts: &DownloadOptions,
    prepared: &PreparedRecord,
    progress: &mut Progress<W>,
    tally: &mut PhotoTally,
) -> Result<(), RecordError> {
    progress.info(format_args!(
        "  Found {} photo(s). Saving to '{}'",
        prepared.photos.len(),
        prepared.folder.display()
    ));

    for (i, photo) in prepared.photos.iter().enumerate() {
        let index = i + 1;
        let url = photo
            .url
            .as_deref()
            .ok_or_else(|| RecordError::Parse(format!("photo {index} has no 'url' field")))?;
        let img_url = photo_url_for_size(url, &opts.photo_size);
        let filename = prepared.id.photo_filename(index);
        let path = prepared.folder.join(&filename);

        progress.info(format_args!("  Downloading {filename}..."));
        let response = match fetch::get(&img_url, &[], &opts.http) {
            Ok(r) => r,
            Err(e) if e.is_network() => {
                progress.warn(format_args!(
                    "  --> Network error downloading {filename} from {img_url}: {e}"
                ));
                tally.failed += 1;
                continue;
            }
            Err(e) => {
                progress.warn(format_args!(
                    "  --> Failed to download {filename} from {img_url}: {e}"
                ));
                tally.failed += 1;
                continue;
            }
        };

        fs::write(&path, &response.body).map_err(|e| RecordError::io(&path, e))?;
        tracing::debug!(
            path = %path.display(),
            bytes = response.body.len(),
            content_type = response.content_type.as_deref().unwrap_or("-"),
            attribution = photo.attribution.as_deref().unwrap_or("-"),
            "photo saved"
        );
        tally.saved += 1;
    }
    Ok(())
}
