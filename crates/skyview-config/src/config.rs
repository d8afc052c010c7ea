//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_NAME: &str = "skyview";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera and orbit-controller settings.
    pub camera: CameraConfig,
    /// Sky-dome scattering and sun settings.
    pub sky: SkyConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title prefix. The parameter panel appends its state.
    pub title: String,
}

/// Perspective camera and orbit controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance in world units.
    pub near: f32,
    /// Far clip distance in world units. Must cover the sky dome.
    pub far: f32,
    /// Initial camera position. The orbit target is the world origin.
    pub position: [f32; 3],
    /// Orbit rotation speed multiplier.
    pub rotate_speed: f32,
    /// Allow scroll-wheel dolly.
    pub enable_zoom: bool,
    /// Allow right-drag panning of the orbit target.
    pub enable_pan: bool,
}

/// Scattering parameters, sun placement, and animation settings.
///
/// These are the startup values of the live parameter panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Atmospheric haziness.
    pub turbidity: f32,
    /// Rayleigh scattering coefficient.
    pub rayleigh: f32,
    /// Mie scattering coefficient.
    pub mie_coefficient: f32,
    /// Mie anisotropy (Henyey-Greenstein g).
    pub mie_directional_g: f32,
    /// Tonemapping luminance.
    pub luminance: f32,
    /// Normalized sun inclination.
    pub inclination: f64,
    /// Normalized sun azimuth.
    pub azimuth: f64,
    /// Show the sun marker sphere.
    pub show_sun: bool,
    /// Distance of the sun marker from the origin in world units.
    pub sun_distance: f64,
    /// Inclination advance per elapsed millisecond.
    pub sun_speed: f64,
    /// Start with the sun animation running.
    pub animate: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Draw the ground grid helper.
    pub show_grid: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "skyview".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 100.0,
            far: 2_000_000.0,
            position: [0.0, 100.0, 2000.0],
            rotate_speed: 1.0,
            enable_zoom: false,
            enable_pan: false,
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 2.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            luminance: 1.0,
            inclination: 0.49,
            azimuth: 0.25,
            show_sun: false,
            sun_distance: 400_000.0,
            sun_speed: 0.00003,
            animate: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_grid: true,
        }
    }
}

// --- Load / Save / Reload ---

/// Where the configuration returned by a load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing `config.ron`.
    Loaded,
    /// No file existed; defaults were written.
    Created,
}

impl ConfigOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Created => "created",
        }
    }
}

impl Config {
    /// Platform config directory for skyview (e.g. `~/.config/skyview`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or write and return the defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_or_create_with_origin(config_dir).map(|(config, _)| config)
    }

    /// Like [`Config::load_or_create`], also reporting whether the file existed.
    ///
    /// Callers that start logging after loading use the origin to report it.
    pub fn load_or_create_with_origin(
        config_dir: &Path,
    ) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok((config, ConfigOrigin::Loaded))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok((config, ConfigOrigin::Created))
        }
    }

    /// Full path of `config.ron` inside `config_dir`.
    pub fn file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
