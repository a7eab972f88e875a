//! Opens the Dawn to Dusk window and animates the sun until Escape or close.
//!
//! Settings come from an optional RON file (`--config`) and CLI flags.
//! Run with `cargo run -p dusk-app -- --width 1024 --height 1024`.

use clap::Parser;
use dusk_config::{CliArgs, Config};
use tracing::{error, warn};

fn main() {
    let args = CliArgs::parse();

    // A bad config file is not fatal; fall back to defaults and say so once
    // logging is up.
    let (mut config, config_error) = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    dusk_log::init_logging(Some(&config));
    if let Some(e) = config_error {
        warn!("Failed to load config: {e}, using defaults");
    }

    if let Err(e) = dusk_app::run(config) {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}
