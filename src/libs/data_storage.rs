use std::env::var;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "cainban";
/// Overrides the application directory when set.
pub const HOME_ENV: &str = "CAINBAN_HOME";

/// Application directory holding board stores, config and the current-board marker.
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    /// `CAINBAN_HOME` when set, otherwise `~/.cainban`.
    pub fn new() -> Self {
        let base_path = match var(HOME_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => {
                let home = var("HOME").or_else(|_| var("USERPROFILE")).unwrap_or_else(|_| ".".into());
                Path::new(&home).join(format!(".{}", APP_NAME))
            }
        };

        Self { base_path }
    }

    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the directory, creating the directory first.
    pub fn get_path(&self, file_name: &str) -> io::Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
