//! Sequential photo downloader.
//!
//! For each observation record: derive the id, make the species folder, look
//! the observation up in the API, then fetch every photo into
//! `<base>/<species>/<id>_<n>.jpg`. A failure only ever costs the record (or
//! the photo) it happened in. After each record that reached the photo loop
//! the downloader sleeps for the configured delay.

mod error;
mod record;

pub use error::RecordError;

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::fetch::HttpOptions;
use crate::observation::ObservationRecord;

use record::{PhotoTally, Prepared};

/// Everything the downloader needs; usually built from [`ScraperConfig`].
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub base_output_dir: PathBuf,
    pub api_base_url: String,
    pub user_agent: String,
    pub photo_size: String,
    pub request_delay: Duration,
    pub http: HttpOptions,
}

impl From<&ScraperConfig> for DownloadOptions {
    fn from(cfg: &ScraperConfig) -> Self {
        Self {
            base_output_dir: cfg.base_output_dir.clone(),
            api_base_url: cfg.api_base_url.clone(),
            user_agent: cfg.user_agent.clone(),
            photo_size: cfg.photo_size.clone(),
            request_delay: cfg.request_delay(),
            http: cfg.http.to_options(),
        }
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self::from(&ScraperConfig::default())
    }
}

/// Counters for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Records handed to the downloader.
    pub records: usize,
    /// Records that reached the photo loop.
    pub completed: usize,
    /// Records with an invalid URL, no results or no photos.
    pub skipped: usize,
    /// Records that hit a `RecordError`.
    pub failed: usize,
    pub photos_saved: usize,
    pub photos_failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} observation(s): {} downloaded, {} skipped, {} failed; {} photo(s) saved, {} failed",
            self.records,
            self.completed,
            self.skipped,
            self.failed,
            self.photos_saved,
            self.photos_failed
        )
    }
}

/// Console progress writer. Every line is mirrored to tracing; write errors on
/// the console stream are ignored.
pub(crate) struct Progress<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> Progress<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    pub(crate) fn info(&mut self, msg: fmt::Arguments<'_>) {
        tracing::info!("{}", msg.to_string().trim_start());
        self.emit(msg);
    }

    pub(crate) fn warn(&mut self, msg: fmt::Arguments<'_>) {
        tracing::warn!("{}", msg.to_string().trim_start());
        self.emit(msg);
    }

    fn emit(&mut self, msg: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{msg}");
        let _ = self.out.flush();
    }
}

pub struct Downloader {
    opts: DownloadOptions,
}

impl Downloader {
    pub fn new(opts: DownloadOptions) -> Self {
        Self { opts }
    }

    /// Processes `records` in order, writing progress to `out`.
    ///
    /// Only failure to create the base output directory is returned as an
    /// error; per-record problems are reported and counted in the summary.
    pub fn run<W: Write>(&self, records: &[ObservationRecord], out: &mut W) -> Result<RunSummary> {
        let mut progress = Progress::new(out);
        let mut summary = RunSummary::default();

        if records.is_empty() {
            progress.info(format_args!("No valid data was found in the CSV to process."));
            return Ok(summary);
        }

        let base = &self.opts.base_output_dir;
        if !base.is_dir() {
            fs::create_dir_all(base)
                .with_context(|| format!("failed to create output directory: {}", base.display()))?;
            progress.info(format_args!("Created base directory: '{}'", base.display()));
        }

        progress.info(format_args!(
            "\nFound {} observations to process.",
            records.len()
        ));

        for rec in records {
            summary.records += 1;
            if let Err(e) = self.process(rec, &mut progress, &mut summary) {
                summary.failed += 1;
                progress.warn(format_args!("  --> {} for {}: {}", e.label(), rec.url, e));
            }
        }

        progress.info(format_args!("\nDownload process complete!"));
        tracing::info!(%summary, "run finished");
        Ok(summary)
    }

    fn process<W: Write>(
        &self,
        rec: &ObservationRecord,
        progress: &mut Progress<W>,
        summary: &mut RunSummary,
    ) -> Result<(), RecordError> {
        let prepared = match record::prepare(&self.opts, rec, progress)? {
            Prepared::Ready(p) => p,
            Prepared::Skipped(reason) => {
                tracing::debug!(?reason, url = %rec.url, "record skipped");
                summary.skipped += 1;
                return Ok(());
            }
        };

        let mut tally = PhotoTally::default();
        let result = record::download_photos(&self.opts, &prepared, progress, &mut tally);
        summary.photos_saved += tally.saved;
        summary.photos_failed += tally.failed;
        if result.is_ok() {
            summary.completed += 1;
        }

        self.pause();
        result
    }

    fn pause(&self) {
        if !self.opts.request_delay.is_zero() {
            std::thread::sleep(self.opts.request_delay);
        }
    }
}
