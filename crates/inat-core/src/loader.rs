//! CSV loader: finds the `url` and `scientific_name` columns by header and
//! returns the rows worth downloading.

use std::fs;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::observation::ObservationRecord;

pub const URL_COLUMN: &str = "url";
pub const NAME_COLUMN: &str = "scientific_name";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fatal problems with the input file. Any of these stops the run before downloading.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("the file was not found at the path: {0}")]
    NotFound(String),
    #[error("an error occurred while reading the CSV file: {0}")]
    Read(String),
    #[error("the CSV file is empty")]
    Empty,
    #[error("missing required column in CSV: '{0}'. Please ensure columns 'url' and 'scientific_name' exist")]
    MissingColumn(&'static str),
}

/// Reads `path` and returns the qualifying observation rows in file order.
///
/// A row qualifies when its url starts with `http` and its scientific name is
/// non-empty after trimming. Short or non-qualifying rows are dropped silently.
pub fn load_observations(path: &Path) -> Result<Vec<ObservationRecord>, CsvError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CsvError::NotFound(path.display().to_string()),
        _ => CsvError::Read(e.to_string()),
    })?;
    let records = parse_observations(&bytes)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded observation rows");
    Ok(records)
}

/// Parses CSV content (optionally BOM-prefixed UTF-8). See [`load_observations`].
pub fn parse_observations(content: &[u8]) -> Result<Vec<ObservationRecord>, CsvError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let content = std::str::from_utf8(content).map_err(|e| CsvError::Read(e.to_string()))?;

    // The csv reader skips blank lines; a blank first line is still the header
    // row, just one with no columns.
    if content.lines().next().is_some_and(str::is_empty) {
        return Err(CsvError::MissingColumn(URL_COLUMN));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(row) => row.map_err(|e| CsvError::Read(e.to_string()))?,
        None => return Err(CsvError::Empty),
    };
    let (url_idx, name_idx) = locate_columns(&header)?;
    let min_len = url_idx.max(name_idx) + 1;

    let mut out = Vec::new();
    for row in rows {
        let row = row.map_err(|e| CsvError::Read(e.to_string()))?;
        if row.len() < min_len {
            continue;
        }
        let url = row.get(url_idx).unwrap_or_default().trim();
        let name = row.get(name_idx).unwrap_or_default().trim();
        if url.starts_with("http") && !name.is_empty() {
            out.push(ObservationRecord::new(url, name));
        }
    }
    Ok(out)
}

/// Positions of the url and scientific_name columns (trimmed, case-insensitive).
fn locate_columns(header: &StringRecord) -> Result<(usize, usize), CsvError> {
    let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    let find = |name: &'static str| {
        normalized
            .iter()
            .position(|h| h == name)
            .ok_or(CsvError::MissingColumn(name))
    };
    Ok((find(URL_COLUMN)?, find(NAME_COLUMN)?))
}
