//! User settings for banker
//!
//! Manages user preferences: currency formatting, the date format used for
//! CSV import, and how balance plots are produced.

use serde::{Deserialize, Serialize};

use super::paths::BankerPaths;
use crate::error::BankerError;
use crate::plot::PlotBackend;
use crate::services::balance::Granularity;

/// Plot preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotSettings {
    /// Backends to try, in order, when none is requested explicitly
    #[serde(default = "default_backend_order")]
    pub backend_order: Vec<PlotBackend>,

    /// Backends the user never wants used, even if compiled in
    #[serde(default)]
    pub disabled_backends: Vec<PlotBackend>,

    /// Default bucket size for balance history
    #[serde(default)]
    pub granularity: Granularity,

    /// Default plot width (columns for terminal backends, pixels for SVG)
    #[serde(default = "default_width")]
    pub width: u16,

    /// Default plot height (rows for terminal backends, pixels for SVG)
    #[serde(default = "default_height")]
    pub height: u16,
}

fn default_backend_order() -> Vec<PlotBackend> {
    PlotBackend::ALL.to_vec()
}

fn default_width() -> u16 {
    80
}

fn default_height() -> u16 {
    20
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            backend_order: default_backend_order(),
            disabled_backends: Vec::new(),
            granularity: Granularity::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// User settings for banker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub plot: PlotSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            plot: PlotSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BankerPaths) -> Result<Self, BankerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BankerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BankerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BankerPaths) -> Result<(), BankerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BankerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| BankerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
