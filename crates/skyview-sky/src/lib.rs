//! Atmospheric sky: sun placement, scattering uniforms, the sky dome and sun
//! marker renderers, and the [`SkyView`] that keeps them in step with the
//! panel and the animation clock.
//!
//! [`SkyView`] never touches the GPU directly. It talks to a [`SkyHost`];
//! [`GpuSkyHost`] is the wgpu implementation.

pub mod animation;
pub mod dome;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod marker;
pub mod params;
pub mod scene;
pub mod sun;
pub mod uniforms;
pub mod view;

pub use animation::{AnimationDriver, DriverState};
pub use dome::{SKY_FRAGMENT_SHADER, SKY_VERTEX_SHADER, SkyDomeRenderer};
pub use error::SkyError;
pub use geometry::{SphereGeometry, sphere};
pub use grid::GridRenderer;
pub use host::{MeshKind, SkyHost, SphereSpec};
pub use marker::SunMarkerRenderer;
pub use params::ScatteringParameters;
pub use scene::{GpuSkyHost, SkyScene};
pub use sun::{DEFAULT_SUN_DISTANCE, SunDirection, compute_sun_offset};
pub use uniforms::{ScatteringUniforms, SkyUniformBlock, UniformName, UniformValue};
pub use view::{SkySettings, SkyView};
