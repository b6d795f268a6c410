use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    preset::PresetLocation,
    provider::openmeteo::{DEFAULT_FORECAST_HOST, DEFAULT_GEOCODING_HOST},
};

/// Top-level configuration stored on disk.
///
/// Every field is optional in the file; `Config::default()` talks to the public
/// Open-Meteo services in English with the HTTP client's default timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding_host: String,
    pub forecast_host: String,

    /// Language of geocoding results, e.g. "en".
    pub language: String,

    pub request_timeout_secs: Option<u64>,

    /// Preset shown by `meteo show` when no city is given, e.g. "randwick".
    pub default_preset: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_host: DEFAULT_GEOCODING_HOST.to_string(),
            forecast_host: DEFAULT_FORECAST_HOST.to_string(),
            language: "en".to_string(),
            request_timeout_secs: None,
            default_preset: None,
        }
    }
}

impl Config {
    /// Return the default preset as a strongly-typed PresetLocation, if one is set.
    pub fn default_preset(&self) -> Result<Option<PresetLocation>> {
        self.default_preset.as_deref().map(PresetLocation::try_from).transpose()
    }

    pub fn set_default_preset(&mut self, preset: Option<PresetLocation>) {
        self.default_preset = preset.map(|p| p.as_str().to_string());
    }

    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
