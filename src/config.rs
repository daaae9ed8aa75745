use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::bank::Direction;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_direction")]
    pub default_direction: String,
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_direction() -> String {
    Direction::FrontToBack.as_str().to_string()
}
fn default_autosave() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_direction: default_direction(),
            autosave: default_autosave(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kelime")
            .join("config.toml")
    }

    /// Validate `default_direction` against the known keys, resetting to
    /// default if invalid. Call after deserialization to handle stale keys
    /// from old or hand-edited configs.
    pub fn normalize_direction(&mut self) {
        if Direction::from_key(&self.default_direction).is_none() {
            self.default_direction = default_direction();
        }
    }

    /// Starting direction for a session without a restorable snapshot.
    pub fn direction(&self) -> Direction {
        Direction::from_key(&self.default_direction).unwrap_or_default()
    }
}
