use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlideError};
use super::carousel_service::DEFAULT_AUTOPLAY_INTERVAL;
use super::widget_service::WidgetOptions;

/// Shortest auto-advance period accepted from configuration or flags.
pub const MIN_AUTOPLAY_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub autoplay_interval_ms: Option<u64>,
    #[serde(default)]
    pub pause_on_hover: bool,
    #[serde(default)]
    pub exports_dir: Option<PathBuf>,
}

impl Config {
    pub fn autoplay_interval(&self) -> Duration {
        self.autoplay_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTOPLAY_INTERVAL)
    }

    /// Widget options from config, with command-line overrides applied on top.
    pub fn widget_options(&self, interval_ms: Option<u64>, pause_on_hover: bool) -> WidgetOptions {
        WidgetOptions {
            autoplay_interval_ms: interval_ms
                .unwrap_or_else(|| self.autoplay_interval().as_millis() as u64),
            pause_on_hover: pause_on_hover || self.pause_on_hover,
        }
    }
}

pub fn validate_interval(ms: u64) -> Result<u64> {
    if ms < MIN_AUTOPLAY_INTERVAL_MS {
        return Err(SlideError::Validation(format!(
            "autoplay interval must be at least {MIN_AUTOPLAY_INTERVAL_MS} ms, got {ms}"
        )));
    }
    Ok(ms)
}

fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Loads `config.json`, rejecting stored values the setters would refuse.
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let config = read_config(data_dir)?;
    match config.autoplay_interval_ms {
        Some(ms) if ms < MIN_AUTOPLAY_INTERVAL_MS => Err(SlideError::Validation(format!(
            "autoplay_interval_ms in {} must be at least {MIN_AUTOPLAY_INTERVAL_MS} ms, got {ms}; \
             fix it with `heroreel config set-interval`",
            get_config_path(data_dir).display()
        ))),
        _ => Ok(config),
    }
}

// Setters go through here so a bad stored value can still be overwritten.
fn read_config(data_dir: &Path) -> Result<Config> {
    let config_path = get_config_path(data_dir);

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| SlideError::io(&config_path, e))?;
    serde_json::from_str(&content).map_err(|source| SlideError::Corrupt {
        path: config_path,
        source,
    })
}

pub fn save_config(data_dir: &Path, config: &Config) -> Result<()> {
    let config_path = get_config_path(data_dir);
    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content).map_err(|e| SlideError::io(&config_path, e))?;
    Ok(())
}

pub fn set_autoplay_interval(data_dir: &Path, ms: u64) -> Result<Config> {
    let ms = validate_interval(ms)?;
    let mut config = read_config(data_dir)?;
    config.autoplay_interval_ms = Some(ms);
    save_config(data_dir, &config)?;
    Ok(config)
}

pub fn set_pause_on_hover(data_dir: &Path, enabled: bool) -> Result<Config> {
    let mut config = read_config(data_dir)?;
    config.pause_on_hover = enabled;
    save_config(data_dir, &config)?;
    Ok(config)
}

pub fn set_exports_dir(data_dir: &Path, dir: PathBuf) -> Result<Config> {
    let mut config = read_config(data_dir)?;
    config.exports_dir = Some(dir);
    save_config(data_dir, &config)?;
    Ok(config)
}

/// Directory exported artifacts go to, created on demand.
pub fn get_exports_dir(data_dir: &Path, config: &Config) -> Result<PathBuf> {
    let exports_dir = config
        .exports_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("exports"));
    if !exports_dir.exists() {
        fs::create_dir_all(&exports_dir).map_err(|e| SlideError::io(&exports_dir, e))?;
    }
    Ok(exports_dir)
}
