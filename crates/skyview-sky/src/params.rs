//! Scattering parameters for the Preetham model.

use skyview_config::SkyConfig;

/// Atmosphere inputs to the sky shader.
///
/// Documented ranges: turbidity > 0, rayleigh >= 0, mie coefficient >= 0,
/// mie directional g in [0, 1), luminance >= 0. Nothing here enforces them;
/// out-of-range values reach the shader unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringParameters {
    /// Haze; higher values wash the sky out.
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    /// Mie anisotropy. Close to 1 concentrates glow around the sun.
    pub mie_directional_g: f32,
    pub luminance: f32,
}

impl ScatteringParameters {
    /// Values the shader starts with before anything is pushed to it.
    pub const SHADER_DEFAULTS: Self = Self {
        turbidity: 2.0,
        rayleigh: 1.0,
        mie_coefficient: 0.005,
        mie_directional_g: 0.8,
        luminance: 1.0,
    };
}

impl Default for ScatteringParameters {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 2.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            luminance: 1.0,
        }
    }
}

impl From<&SkyConfig> for ScatteringParameters {
    fn from(config: &SkyConfig) -> Self {
        Self {
            turbidity: config.turbidity,
            rayleigh: config.rayleigh,
            mie_coefficient: config.mie_coefficient,
            mie_directional_g: config.mie_directional_g,
            luminance: config.luminance,
        }
    }
}
