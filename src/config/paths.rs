//! Path management for banker
//!
//! ## Path Resolution Order
//!
//! 1. `BANKER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/banker` on Linux,
//!    `%APPDATA%\banker` on Windows, `~/Library/Application Support/banker` on macOS)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BankerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BANKER_DATA_DIR";

/// Manages all paths used by banker
#[derive(Debug, Clone)]
pub struct BankerPaths {
    base_dir: PathBuf,
}

impl BankerPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BankerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BankerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to accounts.json
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BankerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BankerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BankerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if banker has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BankerError> {
    ProjectDirs::from("", "", "banker")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BankerError::Config("Could not determine a home directory".into()))
}
