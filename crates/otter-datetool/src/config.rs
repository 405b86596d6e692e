//! Configuration file parsing for otter-date.toml.

use otter_datemath::platform::check_utc_offset;
use otter_datemath::{DateMathConfig, ZonedPlatform};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Date engine settings
    #[serde(default)]
    pub date: DateMathConfig,

    /// Time zone the tool computes in
    #[serde(default)]
    pub zone: ZoneConfig,
}

/// Time zone configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ZoneConfig {
    /// Fixed offset east of UTC in minutes, instead of the host zone
    pub offset_minutes: Option<i32>,

    /// Name printed after local times when an offset is fixed
    pub name: Option<String>,

    /// IANA zone id such as `Europe/Berlin`, instead of the host zone
    pub id: Option<String>,
}

impl ZoneConfig {
    /// Check the offset range and that `id` names a known zone.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(minutes) = self.offset_minutes {
            offset_seconds(minutes)?;
        }
        if let Some(id) = &self.id {
            ZonedPlatform::from_name(id)?;
        }
        Ok(())
    }
}

/// `minutes` east of UTC in seconds, within a day of UTC.
pub fn offset_seconds(minutes: i32) -> anyhow::Result<i32> {
    Ok(check_utc_offset(i64::from(minutes) * 60)?)
}

/// Load configuration from a file or search for default config files.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config_path = path.map(PathBuf::from).or_else(find_config_file);

    let config = match config_path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        Some(path) => {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        }
        None => Config::default(),
    };

    config
        .date
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [date] section: {}", e))?;
    config
        .zone
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [zone] section: {}", e))?;
    Ok(config)
}

/// Search for configuration file in the current directory and parent directories.
fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    const CONFIG_NAMES: &[&str] = &["otter-date.toml", ".otter-date.toml"];

    let mut dir = Some(cwd.as_path());
    while let Some(current) = dir {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.exists() {
                return Some(path);
            }
        }
        dir = current.parent();
    }

    None
}
