use crate::expand_tilde;
use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::{fs, path::PathBuf};

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User configuration, read once at startup from
/// `<config dir>/poddium/config.toml`. A missing file means defaults.
#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub cache_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            cache_dir: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory!"))?
            .join("poddium")
            .join("config.toml");

        if !path.exists() {
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&raw)?;

        Ok(config)
    }

    /// Directory for downloaded episode audio. Created on first use.
    pub fn audio_cache_dir(&self) -> Result<PathBuf> {
        let dir = match &self.cache_dir {
            Some(configured) => expand_tilde(configured)?,
            None => dirs::cache_dir()
                .ok_or_else(|| anyhow!("Could not determine cache directory!"))?
                .join("poddium"),
        };

        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
