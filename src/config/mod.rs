// SPDX-License-Identifier: MPL-2.0
//! Persisted panel configuration, loaded from and saved to a `settings.toml`
//! file under the platform config directory.
//!
//! Every field is optional in the file; missing or unreadable values fall
//! back to the fixed constants in [`defaults`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

pub use defaults::{
    DEFAULT_ALTERNATIVE_COLOR, DEFAULT_AUDIO_SRC, DEFAULT_BACKGROUND_COLOR, DEFAULT_COLOR,
    DEFAULT_DURATION_MS, DEFAULT_IMAGE_SRC, MIN_DURATION_MS,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedCover";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub image_src: Option<String>,
    #[serde(default)]
    pub audio_src: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_src: Some(DEFAULT_IMAGE_SRC.to_string()),
            audio_src: Some(DEFAULT_AUDIO_SRC.to_string()),
            duration_ms: Some(DEFAULT_DURATION_MS),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
