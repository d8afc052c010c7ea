//! The seam between the sky view and whatever draws it.

use glam::Vec3;

use crate::uniforms::{UniformName, UniformValue};

/// Sphere tessellation, in the usual width × height segment convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSpec {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

/// Meshes the sky view owns in the host's scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Inverted sphere shaded by the scattering shader, seen from inside.
    SkyDome,
    /// Small white sphere at the sun offset.
    SunMarker,
}

impl MeshKind {
    pub fn sphere(self) -> SphereSpec {
        match self {
            MeshKind::SkyDome => SphereSpec {
                radius: 450_000.0,
                width_segments: 32,
                height_segments: 15,
            },
            MeshKind::SunMarker => SphereSpec {
                radius: 20_000.0,
                width_segments: 16,
                height_segments: 8,
            },
        }
    }
}

/// Scene operations the sky view needs.
///
/// The wgpu scene implements this; tests record the calls instead.
pub trait SkyHost {
    fn add_mesh(&mut self, kind: MeshKind);
    fn remove_mesh(&mut self, kind: MeshKind);
    fn set_uniform(&mut self, name: UniformName, value: UniformValue);
    fn place_sun_marker(&mut self, position: Vec3, visible: bool);
    fn request_redraw(&mut self);
}
