//! User configuration, stored as TOML under the XDG config directory.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ui::DisplayMode;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image-listing endpoint returning a JSON array of images
    pub endpoint: String,
    /// Prefix joined with each image's filename to form its display URL.
    /// Relative values are resolved against `site_url`.
    pub asset_base: String,
    /// Gallery page the shareable URL points at
    pub site_url: String,
    pub page_size: usize,
    pub display_mode: DisplayMode,
    pub timeout_secs: u64,
    /// Extra fetch attempts after a failure (0 = fetch once)
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/api/simple-portfolio".to_string(),
            asset_base: "/data/".to_string(),
            site_url: "http://localhost:5000/portfolio".to_string(),
            page_size: 12,
            display_mode: DisplayMode::Grid,
            timeout_secs: 15,
            retries: 0,
            retry_delay_ms: 500,
        }
    }
}

impl Config {
    /// Returns the default config path based on XDG directories.
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "folio").context("Failed to determine project directories")?;
        Ok(proj_dirs.config_dir().join(CONFIG_FILE))
    }

    /// Loads the config at the default location, falling back to defaults
    /// when no file exists.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load(&path)
    }

    /// Loads the config at `path`. A missing file yields the defaults; a
    /// present but invalid file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        config.validate()?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.page_size > 0, "page_size must be at least 1");
        ensure!(self.timeout_secs > 0, "timeout_secs must be at least 1");
        Ok(())
    }
}
