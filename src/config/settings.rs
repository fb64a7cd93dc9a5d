//! User settings for Bookkeeper
//!
//! Manages user preferences: the date format expenses are entered in, the
//! currency symbol used for display, category tree indentation and logging.

use serde::{Deserialize, Serialize};

use super::paths::BookkeeperPaths;
use crate::error::BookkeeperError;

/// User settings for Bookkeeper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Exact format (strftime) expense dates are entered and displayed in
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Currency symbol prefixed to displayed amounts
    #[serde(default)]
    pub currency_symbol: String,

    /// Number of spaces that make one level in the category tree text
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// tracing filter directive, e.g. "bookkeeper=debug"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d-%m-%Y %H:%M".to_string()
}

fn default_indent_width() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            currency_symbol: String::new(),
            indent_width: default_indent_width(),
            log_filter: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BookkeeperPaths) -> Result<Self, BookkeeperError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BookkeeperError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            BookkeeperError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        if settings.indent_width == 0 {
            return Err(BookkeeperError::Config(
                "indent_width must be at least 1".into(),
            ));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BookkeeperPaths) -> Result<(), BookkeeperError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BookkeeperError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BookkeeperError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
