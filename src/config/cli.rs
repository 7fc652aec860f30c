//=========================================================================
// Command Line
//
// `CliArgs` mirrors a subset of `config.ron`. Only flags that were given
// override the loaded file.
//
//=========================================================================

//=== External Crates =====================================================

use std::path::PathBuf;

use clap::Parser;

//=== Internal Imports ====================================================

use super::Config;

//=== CliArgs =============================================================

/// Starfield command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starfield", about = "Animated parallax starfield")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of stars.
    #[arg(long)]
    pub stars: Option<usize>,

    /// Base speed (depth step is speed * speed_scale).
    #[arg(long)]
    pub speed: Option<f32>,

    /// Fixed seed for a reproducible field.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

//=== Overrides ===========================================================

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(n) = args.stars {
            self.starfield.star_count = n;
        }
        if let Some(speed) = args.speed {
            self.starfield.speed = speed;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
