//! The sky view: owns the effect settings and keeps the host's meshes and
//! uniforms in step with them.

use glam::DVec3;
use log::{debug, info};
use skyview_config::SkyConfig;
use skyview_ui::{ControlValue, PanelError, ParameterPanel, Tweakable};

use crate::animation::AnimationDriver;
use crate::host::{MeshKind, SkyHost};
use crate::marker::SunMarkerRenderer;
use crate::params::ScatteringParameters;
use crate::sun::SunDirection;
use crate::uniforms::{ScatteringUniforms, UniformName};

const INCLINATION: &str = "inclination";
const AZIMUTH: &str = "azimuth";
const SUN: &str = "sun";

/// Everything the panel can edit, plus the animation setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkySettings {
    pub scattering: ScatteringParameters,
    pub sun: SunDirection,
    pub show_sun: bool,
    pub sun_speed: f64,
    pub animate: bool,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            scattering: ScatteringParameters::default(),
            sun: SunDirection::default(),
            show_sun: false,
            sun_speed: AnimationDriver::DEFAULT_SUN_SPEED,
            animate: true,
        }
    }
}

impl From<&SkyConfig> for SkySettings {
    fn from(config: &SkyConfig) -> Self {
        Self {
            scattering: ScatteringParameters::from(config),
            sun: SunDirection {
                inclination: config.inclination,
                azimuth: config.azimuth,
                distance: config.sun_distance,
            },
            show_sun: config.show_sun,
            sun_speed: config.sun_speed,
            animate: config.animate,
        }
    }
}

pub struct SkyView {
    settings: SkySettings,
    defaults: SkySettings,
    uniforms: ScatteringUniforms,
    driver: AnimationDriver,
    sun_offset: DVec3,
}

impl SkyView {
    pub fn new(settings: SkySettings) -> Self {
        let mut driver = AnimationDriver::new(settings.sun_speed);
        if settings.animate {
            driver.start();
        }
        Self {
            settings,
            defaults: settings,
            uniforms: ScatteringUniforms::default(),
            driver,
            sun_offset: settings.sun.offset(),
        }
    }

    pub fn settings(&self) -> &SkySettings {
        &self.settings
    }

    /// Uniform values as last pushed to the host.
    pub fn uniforms(&self) -> &ScatteringUniforms {
        &self.uniforms
    }

    pub fn sun_offset(&self) -> DVec3 {
        self.sun_offset
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Add the dome and the sun marker to `host` and push the current state.
    pub fn attach(&mut self, host: &mut impl SkyHost) {
        host.add_mesh(MeshKind::SkyDome);
        host.add_mesh(MeshKind::SunMarker);
        host.place_sun_marker(SunMarkerRenderer::INITIAL_POSITION, false);
        self.refresh(host);
        info!("Sky view attached");
    }

    pub fn detach(&mut self, host: &mut impl SkyHost) {
        host.remove_mesh(MeshKind::SunMarker);
        host.remove_mesh(MeshKind::SkyDome);
        host.request_redraw();
        info!("Sky view detached");
    }

    /// Recompute the sun offset and push every uniform and the marker
    /// placement. Calling it again without edits pushes the same state.
    pub fn refresh(&mut self, host: &mut impl SkyHost) {
        self.sun_offset = self.settings.sun.offset();
        let position = self.sun_offset.as_vec3();

        self.uniforms.apply_parameters(&self.settings.scattering);
        self.uniforms.set_sun_position(position);
        for (name, value) in self.uniforms.entries() {
            host.set_uniform(name, value);
        }
        host.place_sun_marker(position, self.settings.show_sun);
        host.request_redraw();
    }

    /// Advance the animation by `dt_ms`. Returns whether anything moved.
    pub fn advance(&mut self, dt_ms: f64, host: &mut impl SkyHost) -> bool {
        if !self.driver.tick(dt_ms, &mut self.settings.sun.inclination) {
            return false;
        }
        self.refresh(host);
        true
    }

    pub fn pause(&mut self) {
        self.driver.pause();
    }

    pub fn resume(&mut self) {
        self.driver.start();
    }

    /// Returns whether the animation is running afterwards.
    pub fn toggle_pause(&mut self) -> bool {
        self.driver.toggle();
        debug!("Sun animation running: {}", self.driver.is_running());
        self.driver.is_running()
    }

    /// Restore the settings the view was created (or last reloaded) with.
    pub fn reset(&mut self, host: &mut impl SkyHost) {
        self.settings = self.defaults;
        self.refresh(host);
        info!("Sky settings reset");
    }

    /// Replace settings and defaults, e.g. after a config reload. The
    /// animation keeps its running state; only the speed changes.
    pub fn apply_settings(&mut self, settings: SkySettings, host: &mut impl SkyHost) {
        let running = self.driver.is_running();
        self.driver = AnimationDriver::new(settings.sun_speed);
        if running {
            self.driver.start();
        }
        self.settings = settings;
        self.defaults = settings;
        self.refresh(host);
    }

    /// Register the panel controls for every editable field.
    pub fn register_controls(panel: &mut ParameterPanel) -> Result<(), PanelError> {
        panel
            .add_number(UniformName::Turbidity.as_str(), 1.0, 20.0, 0.1)?
            .add_number(UniformName::Rayleigh.as_str(), 0.0, 4.0, 0.001)?
            .add_number(UniformName::MieCoefficient.as_str(), 0.0, 0.1, 0.001)?
            .add_number(UniformName::MieDirectionalG.as_str(), 0.0, 1.0, 0.001)?
            .add_number(UniformName::Luminance.as_str(), 0.0, 2.0, 0.01)?
            .add_number(INCLINATION, 0.0, 1.0, 0.0001)?
            .add_number(AZIMUTH, 0.0, 1.0, 0.0001)?
            .add_toggle(SUN)?;
        Ok(())
    }

    fn scattering_field(&mut self, name: &str) -> Option<&mut f32> {
        let s = &mut self.settings.scattering;
        match name.parse::<UniformName>().ok()? {
            UniformName::Turbidity => Some(&mut s.turbidity),
            UniformName::Rayleigh => Some(&mut s.rayleigh),
            UniformName::MieCoefficient => Some(&mut s.mie_coefficient),
            UniformName::MieDirectionalG => Some(&mut s.mie_directional_g),
            UniformName::Luminance => Some(&mut s.luminance),
            UniformName::SunPosition => None,
        }
    }
}

impl Tweakable for SkyView {
    fn get(&self, name: &str) -> Option<ControlValue> {
        let s = &self.settings;
        let number = match name {
            INCLINATION => s.sun.inclination,
            AZIMUTH => s.sun.azimuth,
            SUN => return Some(ControlValue::Toggle(s.show_sun)),
            _ => match name.parse::<UniformName>().ok()? {
                UniformName::Turbidity => s.scattering.turbidity.into(),
                UniformName::Rayleigh => s.scattering.rayleigh.into(),
                UniformName::MieCoefficient => s.scattering.mie_coefficient.into(),
                UniformName::MieDirectionalG => s.scattering.mie_directional_g.into(),
                UniformName::Luminance => s.scattering.luminance.into(),
                UniformName::SunPosition => return None,
            },
        };
        Some(ControlValue::Number(number))
    }

    fn set(&mut self, name: &str, value: ControlValue) -> Result<(), PanelError> {
        let unknown = || PanelError::UnknownControl {
            name: name.to_string(),
        };
        let mismatch = |expected| PanelError::KindMismatch {
            name: name.to_string(),
            expected,
        };

        if name == SUN {
            self.settings.show_sun = value.as_toggle().ok_or_else(|| mismatch("boolean"))?;
            return Ok(());
        }
        let number = value.as_number().ok_or_else(|| mismatch("number"))?;
        match name {
            INCLINATION => self.settings.sun.inclination = number,
            AZIMUTH => self.settings.sun.azimuth = number,
            _ => *self.scattering_field(name).ok_or_else(unknown)? = number as f32,
        }
        Ok(())
    }
}
