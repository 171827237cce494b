//! Per-record failure kinds. None of these abort the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum RecordError {
    /// API answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Transport failure talking to the API.
    #[error("{0}")]
    Network(curl::Error),
    /// Body was not the expected JSON shape.
    #[error("{0}")]
    Parse(String),
    /// Local filesystem failure (folder creation, photo write).
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RecordError {
    /// Lead-in used for console and log messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordError::Http(_) => "HTTP Error",
            RecordError::Network(_) => "Network error",
            RecordError::Parse(_) => "Could not parse API response",
            RecordError::Io { .. } => "An unexpected error occurred",
        }
    }

    pub(super) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecordError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<FetchError> for RecordError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Http(code) => RecordError::Http(code),
            FetchError::Curl(ce) => RecordError::Network(ce),
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Parse(e.to_string())
    }
}
