//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// skyview command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyview", about = "Real-time Preetham sky dome")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Atmospheric turbidity.
    #[arg(long)]
    pub turbidity: Option<f32>,

    /// Rayleigh scattering coefficient.
    #[arg(long)]
    pub rayleigh: Option<f32>,

    /// Tonemapping luminance.
    #[arg(long)]
    pub luminance: Option<f32>,

    /// Normalized sun inclination.
    #[arg(long, allow_hyphen_values = true)]
    pub inclination: Option<f64>,

    /// Normalized sun azimuth.
    #[arg(long, allow_hyphen_values = true)]
    pub azimuth: Option<f64>,

    /// Inclination advance per elapsed millisecond.
    #[arg(long)]
    pub sun_speed: Option<f64>,

    /// Start with the sun animation paused.
    #[arg(long)]
    pub paused: bool,

    /// Show the sun marker sphere.
    #[arg(long)]
    pub show_sun: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(t) = args.turbidity {
            self.sky.turbidity = t;
        }
        if let Some(r) = args.rayleigh {
            self.sky.rayleigh = r;
        }
        if let Some(l) = args.luminance {
            self.sky.luminance = l;
        }
        if let Some(i) = args.inclination {
            self.sky.inclination = i;
        }
        if let Some(a) = args.azimuth {
            self.sky.azimuth = a;
        }
        if let Some(s) = args.sun_speed {
            self.sky.sun_speed = s;
        }
        if args.paused {
            self.sky.animate = false;
        }
        if args.show_sun {
            self.sky.show_sun = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            turbidity: Some(4.0),
            inclination: Some(0.3),
            paused: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.sky.turbidity, 4.0);
        assert_eq!(config.sky.inclination, 0.3);
        assert!(!config.sky.animate);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.sky.azimuth, 0.25);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "skyview",
            "--sun-speed",
            "0.0001",
            "--show-sun",
            "--inclination",
            "-0.2",
        ])
        .unwrap();
        assert_eq!(args.sun_speed, Some(0.0001));
        assert!(args.show_sun);
        assert_eq!(args.inclination, Some(-0.2));
        assert!(!args.paused);
    }
}
