//! CLI parse tests.

use super::{load_config_or_default, Cli};
use clap::Parser;
use inat_core::config::ScraperConfig;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args_prompts() {
    let cli = parse(&["inat-photos"]);
    assert!(cli.csv_path.is_none());
    assert!(cli.output_dir.is_none());
    assert!(cli.delay_secs.is_none());
}

#[test]
fn cli_parse_csv_path() {
    let cli = parse(&["inat-photos", "observations-123.csv"]);
    assert_eq!(cli.csv_path, Some(PathBuf::from("observations-123.csv")));
}

#[test]
fn cli_parse_overrides() {
    let cli = parse(&[
        "inat-photos",
        "export.csv",
        "--output-dir",
        "/tmp/photos",
        "--delay-secs",
        "2.5",
    ]);
    let mut cfg = ScraperConfig::default();
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.base_output_dir, PathBuf::from("/tmp/photos"));
    assert!((cfg.request_delay_secs - 2.5).abs() < 1e-9);
}

#[test]
fn cli_no_overrides_keeps_config() {
    let cli = parse(&["inat-photos", "export.csv"]);
    let mut cfg = ScraperConfig::default();
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.base_output_dir, PathBuf::from("inaturalist_photos"));
    assert!((cfg.request_delay_secs - 1.0).abs() < 1e-9);
}

#[test]
fn cli_rejects_bad_delay() {
    assert!(Cli::try_parse_from(["inat-photos", "--delay-secs", "soon"]).is_err());
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let broken = Err(anyhow::anyhow!("invalid config: expected `=`"));
    let cfg = load_config_or_default(broken);
    assert_eq!(cfg.base_output_dir, PathBuf::from("inaturalist_photos"));
    assert_eq!(cfg.user_agent, "Mozilla/5.0");
}

#[test]
fn loaded_config_is_kept() {
    let custom = ScraperConfig {
        photo_size: "original".to_string(),
        ..ScraperConfig::default()
    };
    let cfg = load_config_or_default(Ok(custom));
    assert_eq!(cfg.photo_size, "original");
}
