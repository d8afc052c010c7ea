//! The six named uniforms consumed by the sky shader.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::SkyError;
use crate::params::ScatteringParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UniformName {
    Turbidity,
    Rayleigh,
    MieCoefficient,
    MieDirectionalG,
    Luminance,
    SunPosition,
}

impl UniformName {
    pub const ALL: [UniformName; 6] = [
        UniformName::Turbidity,
        UniformName::Rayleigh,
        UniformName::MieCoefficient,
        UniformName::MieDirectionalG,
        UniformName::Luminance,
        UniformName::SunPosition,
    ];

    /// Name as the shader program knows it.
    pub fn as_str(self) -> &'static str {
        match self {
            UniformName::Turbidity => "turbidity",
            UniformName::Rayleigh => "rayleigh",
            UniformName::MieCoefficient => "mieCoefficient",
            UniformName::MieDirectionalG => "mieDirectionalG",
            UniformName::Luminance => "luminance",
            UniformName::SunPosition => "sunPosition",
        }
    }

    fn is_vector(self) -> bool {
        self == UniformName::SunPosition
    }
}

impl fmt::Display for UniformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UniformName {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UniformName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SkyError::UnknownParameter(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
}

/// GPU layout of the sky uniform block (group 1, binding 0).
///
/// `sun_position` is a WGSL `vec3<f32>` whose 4-byte tail slot holds
/// `turbidity`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SkyUniformBlock {
    pub sun_position: [f32; 3],
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub luminance: f32,
}

impl SkyUniformBlock {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Host-side copy of the sky uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringUniforms {
    scattering: ScatteringParameters,
    sun_position: Vec3,
}

impl ScatteringUniforms {
    /// Initial sun position before the first push.
    pub const DEFAULT_SUN_POSITION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    pub fn new(scattering: ScatteringParameters, sun_position: Vec3) -> Self {
        Self {
            scattering,
            sun_position,
        }
    }

    pub fn get(&self, name: UniformName) -> UniformValue {
        let s = &self.scattering;
        match name {
            UniformName::Turbidity => UniformValue::Float(s.turbidity),
            UniformName::Rayleigh => UniformValue::Float(s.rayleigh),
            UniformName::MieCoefficient => UniformValue::Float(s.mie_coefficient),
            UniformName::MieDirectionalG => UniformValue::Float(s.mie_directional_g),
            UniformName::Luminance => UniformValue::Float(s.luminance),
            UniformName::SunPosition => UniformValue::Vec3(self.sun_position),
        }
    }

    /// Store `value` under `name`. Values are not range-checked, only the
    /// scalar/vector kind must match.
    pub fn set(&mut self, name: UniformName, value: UniformValue) -> Result<(), SkyError> {
        let s = &mut self.scattering;
        match (name, value) {
            (UniformName::Turbidity, UniformValue::Float(v)) => s.turbidity = v,
            (UniformName::Rayleigh, UniformValue::Float(v)) => s.rayleigh = v,
            (UniformName::MieCoefficient, UniformValue::Float(v)) => s.mie_coefficient = v,
            (UniformName::MieDirectionalG, UniformValue::Float(v)) => s.mie_directional_g = v,
            (UniformName::Luminance, UniformValue::Float(v)) => s.luminance = v,
            (UniformName::SunPosition, UniformValue::Vec3(v)) => self.sun_position = v,
            (name, _) => {
                return Err(SkyError::KindMismatch {
                    name: name.as_str(),
                    expected: if name.is_vector() { "vec3" } else { "float" },
                });
            }
        }
        Ok(())
    }

    pub fn apply_parameters(&mut self, scattering: &ScatteringParameters) {
        self.scattering = *scattering;
    }

    pub fn set_sun_position(&mut self, position: Vec3) {
        self.sun_position = position;
    }

    pub fn scattering(&self) -> &ScatteringParameters {
        &self.scattering
    }

    pub fn sun_position(&self) -> Vec3 {
        self.sun_position
    }

    /// All six uniforms in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (UniformName, UniformValue)> + '_ {
        UniformName::ALL.into_iter().map(|name| (name, self.get(name)))
    }

    pub fn to_gpu(&self) -> SkyUniformBlock {
        let s = &self.scattering;
        SkyUniformBlock {
            sun_position: self.sun_position.to_array(),
            turbidity: s.turbidity,
            rayleigh: s.rayleigh,
            mie_coefficient: s.mie_coefficient,
            mie_directional_g: s.mie_directional_g,
            luminance: s.luminance,
        }
    }
}

impl Default for ScatteringUniforms {
    /// The shader-side initial values.
    fn default() -> Self {
        Self::new(
            ScatteringParameters::SHADER_DEFAULTS,
            Self::DEFAULT_SUN_POSITION,
        )
    }
}
