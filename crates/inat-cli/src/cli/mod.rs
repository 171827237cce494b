//! CLI for the iNaturalist photo scraper.

mod prompt;

use anyhow::{bail, Result};
use clap::Parser;
use inat_core::config::{self, ScraperConfig};
use inat_core::downloader::{DownloadOptions, Downloader};
use inat_core::loader;
use std::io;
use std::path::PathBuf;

/// Download iNaturalist observation photos into one folder per species.
#[derive(Debug, Parser)]
#[command(name = "inat-photos")]
#[command(
    about = "Download iNaturalist observation photos into per-species folders",
    long_about = None
)]
pub struct Cli {
    /// CSV export with `url` and `scientific_name` columns. Asked for interactively when omitted.
    pub csv_path: Option<PathBuf>,

    /// Folder that receives the species folders (overrides config).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seconds to pause after each observation (overrides config).
    #[arg(long, value_name = "SECS")]
    pub delay_secs: Option<f64>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let mut cfg = load_config_or_default(config::load_or_init());
        self.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        let csv_path = match self.csv_path {
            Some(p) => p,
            None => prompt::ask_csv_path(&mut io::stdin().lock(), &mut io::stdout())?,
        };
        if !csv_path.exists() {
            bail!("No file exists at the path you provided.");
        }

        let records = loader::load_observations(&csv_path)?;
        tracing::info!(path = %csv_path.display(), rows = records.len(), "csv loaded");

        let downloader = Downloader::new(DownloadOptions::from(&cfg));
        let summary = downloader.run(&records, &mut io::stdout())?;
        if summary.records > 0 {
            println!("{summary}");
        }
        Ok(())
    }

    fn apply_overrides(&self, cfg: &mut ScraperConfig) {
        if let Some(dir) = &self.output_dir {
            cfg.base_output_dir = dir.clone();
        }
        if let Some(secs) = self.delay_secs {
            cfg.request_delay_secs = secs;
        }
    }
}

/// A broken or unwritable config file should not stop a run; defaults are used instead.
fn load_config_or_default(loaded: Result<ScraperConfig>) -> ScraperConfig {
    loaded.unwrap_or_else(|err| {
        tracing::warn!("config unavailable, using defaults: {:#}", err);
        eprintln!("WARNING: could not load config ({:#}); using defaults.", err);
        ScraperConfig::default()
    })
}

#[cfg(test)]
mod tests;
