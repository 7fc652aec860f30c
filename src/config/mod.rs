//=========================================================================
// Configuration
//
// `config.ron` with defaults, validation and CLI overrides.
//
// Every section and field falls back to its default when missing, and
// unknown fields are ignored, so older and newer config files both load.
//
// Load order (see `main.rs`):
// ```text
//   load_or_create(dir) ─> apply_cli_overrides(args) ─> validate()
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod cli;
mod error;

//=== External Crates =====================================================

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

//=== Internal Imports ====================================================

use crate::core::StarfieldSettings;

//=== Public Exports ======================================================

pub use cli::CliArgs;
pub use error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

//=== Config ==============================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Starfield look and motion.
    pub starfield: StarfieldSettings,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width in logical pixels.
    pub width: u32,
    /// Initial height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g. "debug", "info,starfield::animator=trace").
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Starfield".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

//=== Load / Save =========================================================

impl Config {
    /// Platform config directory, e.g. `~/.config/starfield` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("starfield"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!(target: "config", "Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!(target: "config", "Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    //--- Validation -------------------------------------------------------

    /// Rejects values the starfield cannot run with.
    ///
    /// The `starfield` section is checked by [`StarfieldSettings::validate`];
    /// on top of that the window must have an area and the field at least
    /// one star.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: "width and height must be non-zero".to_string(),
            });
        }
        if self.starfield.star_count == 0 {
            return Err(ConfigError::Invalid {
                field: "starfield.star_count",
                reason: "must be at least 1".to_string(),
            });
        }
        self.starfield.validate()?;
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
