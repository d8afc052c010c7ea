//! GPU-side scene holding the sky meshes, and the [`SkyHost`] that feeds it.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use log::{debug, error, warn};
use skyview_render::{CameraUniform, ShaderLibrary, UNLIT_SHADER_SOURCE};

use crate::dome::SkyDomeRenderer;
use crate::error::SkyError;
use crate::grid::GridRenderer;
use crate::host::{MeshKind, SkyHost};
use crate::marker::SunMarkerRenderer;
use crate::uniforms::{ScatteringUniforms, UniformName, UniformValue};

const UNLIT_SHADER_NAME: &str = "unlit";

pub struct SkyScene {
    surface_format: wgpu::TextureFormat,
    shaders: ShaderLibrary,
    unlit_shader: Arc<wgpu::ShaderModule>,
    dome: Option<SkyDomeRenderer>,
    marker: Option<SunMarkerRenderer>,
    grid: GridRenderer,
    show_grid: bool,
    uniforms: ScatteringUniforms,
    uniforms_dirty: bool,
    marker_placement: (Vec3, bool),
    redraw_requested: bool,
}

impl SkyScene {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        show_grid: bool,
    ) -> Result<Self, SkyError> {
        let mut shaders = ShaderLibrary::new();
        let unlit_shader =
            shaders.load_stage(device, UNLIT_SHADER_NAME, UNLIT_SHADER_SOURCE, "vs_main")?;
        let grid = GridRenderer::new(device, &unlit_shader, surface_format);

        Ok(Self {
            surface_format,
            shaders,
            unlit_shader,
            dome: None,
            marker: None,
            grid,
            show_grid,
            uniforms: ScatteringUniforms::default(),
            uniforms_dirty: false,
            marker_placement: (SunMarkerRenderer::INITIAL_POSITION, false),
            redraw_requested: false,
        })
    }

    pub fn uniforms(&self) -> &ScatteringUniforms {
        &self.uniforms
    }

    pub fn has_mesh(&self, kind: MeshKind) -> bool {
        match kind {
            MeshKind::SkyDome => self.dome.is_some(),
            MeshKind::SunMarker => self.marker.is_some(),
        }
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show_grid: bool) {
        self.show_grid = show_grid;
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Upload camera matrices and any uniform changes for this frame.
    pub fn prepare(&mut self, queue: &wgpu::Queue, view_proj: Mat4) {
        let camera = CameraUniform::from_matrix(view_proj);
        if let Some(dome) = &self.dome {
            dome.update_camera(queue, &camera);
            if self.uniforms_dirty {
                dome.write_uniforms(queue, &self.uniforms);
                self.uniforms_dirty = false;
            }
        }
        if let Some(marker) = &self.marker {
            marker.update_camera(queue, view_proj);
        }
        if self.show_grid {
            self.grid.update_camera(queue, &camera);
        }
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if let Some(dome) = &self.dome {
            dome.render(render_pass);
        }
        if self.show_grid {
            self.grid.render(render_pass);
        }
        if let Some(marker) = &self.marker {
            marker.render(render_pass);
        }
    }

    fn add_mesh(&mut self, device: &wgpu::Device, kind: MeshKind) {
        if self.has_mesh(kind) {
            return;
        }
        match kind {
            MeshKind::SkyDome => {
                match SkyDomeRenderer::new(
                    device,
                    self.surface_format,
                    &mut self.shaders,
                    &self.uniforms,
                ) {
                    Ok(dome) => self.dome = Some(dome),
                    Err(e) => error!("Failed to create sky dome: {}", e),
                }
            }
            MeshKind::SunMarker => {
                let mut marker =
                    SunMarkerRenderer::new(device, &self.unlit_shader, self.surface_format);
                let (position, visible) = self.marker_placement;
                marker.set_placement(position, visible);
                self.marker = Some(marker);
            }
        }
        debug!("Added mesh {:?}", kind);
    }

    fn remove_mesh(&mut self, kind: MeshKind) {
        let removed = match kind {
            MeshKind::SkyDome => self.dome.take().is_some(),
            MeshKind::SunMarker => self.marker.take().is_some(),
        };
        if removed {
            debug!("Removed mesh {:?}", kind);
        }
    }
}

/// [`SkyHost`] over a [`SkyScene`] for the duration of one borrow.
pub struct GpuSkyHost<'a> {
    device: &'a wgpu::Device,
    scene: &'a mut SkyScene,
}

impl<'a> GpuSkyHost<'a> {
    pub fn new(device: &'a wgpu::Device, scene: &'a mut SkyScene) -> Self {
        Self { device, scene }
    }
}

impl SkyHost for GpuSkyHost<'_> {
    fn add_mesh(&mut self, kind: MeshKind) {
        self.scene.add_mesh(self.device, kind);
    }

    fn remove_mesh(&mut self, kind: MeshKind) {
        self.scene.remove_mesh(kind);
    }

    fn set_uniform(&mut self, name: UniformName, value: UniformValue) {
        match self.scene.uniforms.set(name, value) {
            Ok(()) => self.scene.uniforms_dirty = true,
            Err(e) => warn!("Ignoring uniform update: {}", e),
        }
    }

    fn place_sun_marker(&mut self, position: Vec3, visible: bool) {
        self.scene.marker_placement = (position, visible);
        if let Some(marker) = &mut self.scene.marker {
            marker.set_placement(position, visible);
        }
    }

    fn request_redraw(&mut self) {
        self.scene.redraw_requested = true;
    }
}
