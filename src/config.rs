use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::hints::HintTiming;

#[derive(Debug, Deserialize, Serialize)]
#[allow(unused)]
pub struct Settings {
    pub api_base_url: String,
    pub default_page: Option<String>,
    pub hint_initial_delay_secs: u64,
    pub hint_rotation_secs: u64,
    pub hint_dwell_secs: u64,
    pub data_dir: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let blueprint_path = match std::env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest_dir) => {
                let mut path = PathBuf::from(manifest_dir);
                path.push("ecodash.toml");
                path
            }
            Err(_) => {
                // Fallback for release builds or when not using Cargo.
                // Assumes ecodash.toml is in the current working directory.
                PathBuf::from("ecodash.toml")
            }
        };

        let user_config_path = get_user_config_path();

        // If the user config doesn't exist, create it from the blueprint `ecodash.toml`
        if !user_config_path.exists() {
            if let Ok(blueprint_content) = fs::read_to_string(&blueprint_path) {
                if let Some(parent) = user_config_path.parent() {
                    fs::create_dir_all(parent).expect("Could not create config directory");
                }
                fs::write(&user_config_path, blueprint_content)
                    .expect("Could not write user config file from blueprint");
            }
            // If ecodash.toml doesn't exist at blueprint_path, builder will fail. This is intended.
        }

        let s = Config::builder()
            // 1. Load project defaults from ecodash.toml (blueprint). Required.
            .add_source(File::from(blueprint_path).required(true))
            // 2. Merge user's global config. Required as we just created it if it was missing.
            .add_source(File::from(user_config_path).required(true))
            // 3. Merge local ecodash.toml from CWD. Optional override.
            .add_source(File::with_name("ecodash.toml").required(false))
            .build()?;

        s.try_deserialize()
    }

    pub fn hint_timing(&self) -> HintTiming {
        HintTiming::from_secs(
            self.hint_initial_delay_secs,
            self.hint_rotation_secs,
            self.hint_dwell_secs,
        )
    }

    /// Data directory for the dismissal list, active events and the log.
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ecodash"),
        }
    }
}

pub fn get_user_config_path() -> PathBuf {
    let mut path = dirs::home_dir().expect("Failed to get home directory");
    path.push(".config");
    path.push("ecodash");
    path.push("ecodash.toml");
    path
}

/// Persists the current page as the startup default in the user config.
pub fn save_default_page(page: &str) -> Result<(), anyhow::Error> {
    let user_config_path = get_user_config_path();

    let config_str = fs::read_to_string(&user_config_path).unwrap_or_else(|_| "".to_string());
    let mut doc = config_str.parse::<toml::Table>()?;

    doc.insert(
        "default_page".to_string(),
        toml::Value::String(page.to_string()),
    );

    fs::write(&user_config_path, doc.to_string())?;

    Ok(())
}
