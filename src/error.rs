//=========================================================================
// Starfield Error
//
// Top-level error returned by the binary-facing entry points. Subsystem
// errors convert into it with `?`.
//
//=========================================================================

use crate::config::ConfigError;
use crate::platform::PlatformError;

/// Any failure that stops the starfield from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum StarfieldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("failed to install logger: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_transparently() {
        let inner = ConfigError::Invalid {
            field: "starfield.speed",
            reason: "must be a positive number".to_string(),
        };
        let message = inner.to_string();

        let error: StarfieldError = inner.into();
        assert!(matches!(error, StarfieldError::Config(_)));
        assert_eq!(error.to_string(), message);
    }

    #[test]
    fn starfield_error_is_error_trait() {
        fn assert_error<T: std::error::Error + 'static>() {}
        assert_error::<StarfieldError>();
    }
}
