//=========================================================================
// Configuration Errors
//=========================================================================

//=== Internal Imports ====================================================

use crate::core::InvalidSetting;

//=== ConfigError =========================================================

/// Errors that can occur when loading, saving, parsing or validating
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A value parsed fine but cannot drive the starfield.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    /// The `starfield` section holds a value the animator rejects.
    #[error("invalid config value `starfield.{}`: {}", .0.field, .0.reason)]
    Starfield(#[from] InvalidSetting),
}
