use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::WindowKind;

pub const DEFAULT_OUTPUT_PATH: &str = "dawn_to_dusk_ical.ics";
pub const DEFAULT_OFFSET_MINUTES: u32 = 15;

/// Configuration at ~/.config/suncal/config.toml
///
/// Every value is optional here; command-line flags override it, and
/// location and range must come from one or the other.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub range: RangeConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub name: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub date_in_file_name: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    pub window: Option<WindowKind>,
    pub offset_minutes: Option<u32>,
    pub dst_markers: Option<bool>,
}

impl Config {
    /// Get the default config file path (~/.config/suncal/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("suncal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file.
    ///
    /// An explicit path must exist; the default path is optional and an
    /// empty config is used when it is missing.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found at {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "no config file, using flags only");
                    return Ok(Config::default());
                }
                path
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;

        if config.events.offset_minutes == Some(0) {
            anyhow::bail!("[events] offset_minutes must be at least 1");
        }

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# suncal configuration

[location]
# name = \"San Francisco\"
# region = \"USA\"
# latitude = 37.7749
# longitude = -122.4194
# timezone = \"America/Los_Angeles\"

[range]
# start = \"2025-07-01\"
# end = \"2026-12-31\"

[output]
# path = \"{DEFAULT_OUTPUT_PATH}\"
# date_in_file_name = false

[events]
# \"twilight_span\" (dawn to sunrise, sunset to dusk) or \"fixed_offset\"
# window = \"twilight_span\"
# offset_minutes = {DEFAULT_OFFSET_MINUTES}
# dst_markers = false
"
        );

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Could not create config directory at {}", parent.display())
                })?;
            }
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file at {}", path.display()))?;

        Ok(())
    }
}
