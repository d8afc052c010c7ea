//! Configuration system for skyview.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the command
//! line via clap, and support hot-reload detection. Every section uses
//! `#[serde(default)]` so older or partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, ConfigOrigin, DebugConfig, SkyConfig, WindowConfig};
pub use error::ConfigError;
