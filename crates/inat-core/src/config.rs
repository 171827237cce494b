use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::HttpOptions;

/// Name used for the XDG config/state directories and the log file.
pub const APP_NAME: &str = "inat-photos";

/// Folder (relative to the working directory) that receives the species folders.
pub const DEFAULT_OUTPUT_DIR: &str = "inaturalist_photos";

/// Observation lookup endpoint; the numeric id is appended as the last path segment.
pub const DEFAULT_API_BASE_URL: &str = "https://api.inaturalist.org/v1/observations";

/// Timeouts and stall detection for API and photo requests (`[http]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds to wait for the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Abort a transfer slower than this many bytes/sec ...
    pub low_speed_limit_bytes: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Hard cap on a whole request in seconds (None = no cap).
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            timeout_secs: None,
        }
    }
}

impl HttpConfig {
    pub fn to_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            low_speed_limit: self.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/inat-photos/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Directory under which one folder per species is created.
    pub base_output_dir: PathBuf,
    /// Observation API base URL (without trailing id).
    pub api_base_url: String,
    /// User-Agent sent with API lookups. Photo requests carry no custom headers.
    pub user_agent: String,
    /// Rendition that replaces `square` in photo URLs (e.g. "large", "original").
    pub photo_size: String,
    /// Pause after each observation whose photos were fetched, in seconds.
    pub request_delay_secs: f64,
    pub http: HttpConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            photo_size: "large".to_string(),
            request_delay_secs: 1.0,
            http: HttpConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Delay between observations. Negative or non-finite values are treated as zero.
    pub fn request_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.request_delay_secs).unwrap_or(Duration::ZERO)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ScraperConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ScraperConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: ScraperConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
