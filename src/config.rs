// src/config.rs
use anyhow::Context;
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml;

use crate::store::DEFAULT_SLOT;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the storage slots. Unset means the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub storage_slot: String,
    pub voice_feedback: bool,
    pub animation_interval_ms: u64,
    pub verify_result_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: None,
            storage_slot: DEFAULT_SLOT.to_string(),
            voice_feedback: true,
            animation_interval_ms: 2500,
            verify_result_timeout_ms: 3000,
        }
    }
}

impl Config {
    /// Storage directory: explicit setting, else the platform data dir, else `.`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms.max(1))
    }

    pub fn verify_result_timeout(&self) -> Duration {
        Duration::from_millis(self.verify_result_timeout_ms)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "PasscheckRS", "PasscheckRS")
}

fn get_config_path() -> Option<PathBuf> {
    project_dirs().map(|proj_dirs| proj_dirs.config_dir().join("passcheck_config.toml"))
}

fn save_default_config(config_path: &Path, config: &Config) -> anyhow::Result<()> {
    info!("Attempting to save default config to {:?}", config_path);
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)
                .with_context(|| format!("Failed to create config directory {:?}", parent_dir))?;
            info!("Created config directory: {:?}", parent_dir);
        }
    }

    let toml_string = toml::to_string_pretty(config)
        .context("Failed to serialize default config to TOML")?;

    let mut file = fs::File::create(config_path)
        .with_context(|| format!("Failed to create default config file {:?}", config_path))?;
    file.write_all(toml_string.as_bytes())
        .with_context(|| format!("Failed to write default config to {:?}", config_path))?;

    info!("Saved default configuration to {:?}", config_path);
    Ok(())
}

/// Reads the config at `config_path`, writing defaults there if it does not exist.
/// Unreadable or invalid files fall back to defaults.
pub fn load_config_from(config_path: &Path) -> Config {
    if !config_path.exists() {
        info!(
            "Config file not found at {:?}. Creating and using default configuration.",
            config_path
        );
        let default_config = Config::default();
        if let Err(e) = save_default_config(config_path, &default_config) {
            warn!("Failed to save default configuration: {:#}", e);
        }
        return default_config;
    }

    info!("Loading configuration from {:?}", config_path);
    match fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(loaded_config) => {
                info!("Configuration loaded successfully.");
                loaded_config
            }
            Err(e) => {
                warn!(
                    "Failed to parse config file at {:?}: {}. Using default configuration.",
                    config_path, e
                );
                Config::default()
            }
        },
        Err(e) => {
            warn!(
                "Failed to read config file at {:?}: {}. Using default configuration.",
                config_path, e
            );
            Config::default()
        }
    }
}

pub fn load_config() -> Config {
    match get_config_path() {
        Some(config_path) => load_config_from(&config_path),
        None => {
            warn!("Could not determine config directory. Using default configuration.");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_slot, "passwords");
        assert!(config.voice_feedback);
        assert_eq!(config.animation_interval(), Duration::from_millis(2500));
        assert_eq!(config.verify_result_timeout(), Duration::from_millis(3000));
    }

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("passcheck_config.toml");

        let config = load_config_from(&config_path);
        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        let reloaded = load_config_from(&config_path);
        assert_eq!(reloaded, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("partial_config.toml");
        fs::write(
            &config_path,
            r#"
data_dir = "/tmp/passcheck"
voice_feedback = false
"#,
        )
        .unwrap();

        let config = load_config_from(&config_path);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/passcheck")));
        assert!(!config.voice_feedback);
        assert_eq!(config.storage_slot, "passwords");
        assert_eq!(config.animation_interval_ms, 2500);
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/tmp/passcheck"));
    }

    #[test]
    fn test_invalid_toml_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("invalid_config.toml");
        fs::write(&config_path, "this is not valid toml content = definitely_broken").unwrap();

        assert_eq!(load_config_from(&config_path), Config::default());
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("typed_config.toml");
        fs::write(&config_path, "animation_interval_ms = \"fast\"\n").unwrap();

        assert_eq!(load_config_from(&config_path), Config::default());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = Config { animation_interval_ms: 0, ..Config::default() };
        assert_eq!(config.animation_interval(), Duration::from_millis(1));
    }
}
