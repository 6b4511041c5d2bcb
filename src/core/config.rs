//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::path::PathBuf;

use super::settings::{LandingSettings, SettingsError};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Launch instant overriding the one in the settings file
    /// Example: 2025-10-01T00:00:00Z
    pub launch_at: Option<String>,

    /// Path of a JSON file with landing page settings
    pub settings_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            launch_at: std::env::var("CELESTIA_LAUNCH_AT").ok(),
            settings_file: std::env::var_os("CELESTIA_SETTINGS").map(PathBuf::from),
        }
    }

    /// Build the settings shipped to the page
    ///
    /// Starts from the settings file (or defaults) and applies the launch
    /// override on top. The result is validated.
    pub fn landing_settings(&self) -> Result<LandingSettings, SettingsError> {
        let mut settings = match &self.settings_file {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                LandingSettings::from_json(&json)?
            }
            None => LandingSettings::default(),
        };

        if let Some(launch_at) = &self.launch_at {
            settings.launch_at = launch_at.clone();
        }
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
