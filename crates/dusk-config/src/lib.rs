//! Startup configuration for Dawn to Dusk.
//!
//! Defaults reproduce the stock scene. An optional RON file and command-line
//! flags can override them; the file is only ever read, never written.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, SceneConfig, WindowConfig};
pub use error::ConfigError;
