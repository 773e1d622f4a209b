//! User configuration stored as `config.json` in the application directory.
//!
//! ## Keys
//!
//! - `default_board`: board used when no current board has been selected
//! - `default_priority`: priority given to tasks added from the CLI without `--priority`
//! - `confirm_hard_delete`: ask before permanently deleting a task
//!
//! ```rust,no_run
//! use cainban::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.set("default_priority", "medium")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::task::{Priority, PriorityInput};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const CONFIG_KEYS: [&str; 3] = ["default_board", "default_priority", "confirm_hard_delete"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board used when none is selected or given with `--board`.
    pub default_board: String,
    /// Priority name or level for new tasks.
    pub default_priority: String,
    /// Ask before a hard delete unless `--yes` is passed.
    pub confirm_hard_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_board: "default".to_string(),
            default_priority: Priority::None.name().to_string(),
            confirm_hard_delete: true,
        }
    }
}

impl Config {
    /// Reads the configuration, falling back to defaults when no file exists.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Like [`Config::read`], in an explicit application directory.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Updates one key from its textual value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "default_board" => {
                if value.is_empty() {
                    bail!("default_board cannot be empty");
                }
                self.default_board = value.to_string();
            }
            "default_priority" => {
                let priority = value.parse::<PriorityInput>()?.resolve()?;
                self.default_priority = priority.name().to_string();
            }
            "confirm_hard_delete" => {
                self.confirm_hard_delete = match value.to_lowercase().as_str() {
                    "true" | "yes" | "1" | "on" => true,
                    "false" | "no" | "0" | "off" => false,
                    other => bail!("invalid boolean value: '{}' (use true or false)", other),
                };
            }
            other => bail!("unknown config key: '{}' (expected one of: {})", other, CONFIG_KEYS.join(", ")),
        }
        Ok(())
    }

    /// Priority applied when a task is added without an explicit one.
    pub fn default_priority(&self) -> Result<Priority> {
        Ok(PriorityInput::Named(self.default_priority.clone()).resolve()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();

        config.set("default_priority", "HIGH").unwrap();
        assert_eq!(config.default_priority, "high");
        config.set("default_priority", "1").unwrap();
        assert_eq!(config.default_priority, "low");
        assert!(config.set("default_priority", "urgent").is_err());

        config.set("confirm_hard_delete", "no").unwrap();
        assert!(!config.confirm_hard_delete);
        assert!(config.set("confirm_hard_delete", "maybe").is_err());

        assert!(config.set("default_board", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_board":"work"}"#).unwrap();
        assert_eq!(config.default_board, "work");
        assert_eq!(config.default_priority().unwrap(), Priority::None);
        assert!(config.confirm_hard_delete);
    }
}
