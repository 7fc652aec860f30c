//=========================================================================
// Starfield Binary
//
// Loads `config.ron` (creating it on first run), applies CLI overrides,
// installs the logger and runs the starfield until the window closes.
//
//=========================================================================

use clap::Parser;
use log::info;

use starfield::config::{CliArgs, Config};
use starfield::{logging, StarfieldBuilder, StarfieldError};

fn main() -> Result<(), StarfieldError> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(Config::default_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);
    config.validate()?;

    logging::init_logging(&config.debug.log_level)?;

    match &config_dir {
        Some(dir) => info!("Using config directory {}", dir.display()),
        None => info!("No config directory available, using defaults"),
    }

    StarfieldBuilder::from_config(&config).build().run()
}
