//=========================================================================
// Logging
//
// Logger installation for the starfield binary.
//
// Library code logs through the `log` facade. This module installs a
// `tracing-subscriber` formatter that also captures those `log` records,
// filtered by `RUST_LOG` or, when unset, the configured level.
//
//=========================================================================

//=== External Crates =====================================================

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

//=== Installation ========================================================

/// Noisy windowing targets kept at `warn` unless overridden.
const QUIET_TARGETS: &str = "winit=warn,calloop=warn,sctk=warn";

/// Install the global logger.
///
/// `level` is an `EnvFilter` directive such as `"info"` or
/// `"info,starfield::animator=trace"`; `RUST_LOG` takes precedence.
///
/// # Errors
///
/// Fails if a global logger is already installed.
///
/// # Examples
///
/// ```no_run
/// starfield::logging::init_logging("debug").unwrap();
/// log::info!("ready");
/// ```
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
}

/// Builds the default filter string for a configured level.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        format!("info,{QUIET_TARGETS}")
    } else {
        format!("{level},{QUIET_TARGETS}")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
