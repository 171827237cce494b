//! Tracing setup for scraper runs.
//!
//! Console output is the progress report; the log file keeps the detail
//! (API lookups, saved paths, attribution, skip reasons) for later inspection.

use anyhow::Result;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::APP_NAME;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,inat_core=debug,inat_cli=debug";

/// Appends to the run log; degrades to stderr for a single event if the
/// shared handle cannot be duplicated.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct RunLog(File);

impl<'a> MakeWriter<'a> for RunLog {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

/// `~/.local/state/inat-photos/inat-photos.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs.get_state_home().join(format!("{APP_NAME}.log")))
}

/// Sends tracing events to the run log, appending across runs.
///
/// Errors if the state directory or the file cannot be opened; the CLI then
/// calls [`init_logging_stderr`] instead.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(RunLog(file)))
        .with_ansi(false)
        .init();

    tracing::info!("inat-photos run log at {}", path.display());
    Ok(())
}

/// Sends tracing events to stderr. Progress lines still go to stdout.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_named_after_app() {
        let path = log_file_path().unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("inat-photos.log")
        );
    }
}
