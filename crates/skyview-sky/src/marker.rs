//! Small white sphere drawn where the sun is.

use glam::{Mat4, Vec3};
use skyview_render::{
    BufferAllocator, CameraUniform, DepthBuffer, IndexData, MeshBuffer, UnlitPipeline,
    VertexPositionColor, draw_unlit,
};

use crate::geometry::sphere;
use crate::host::MeshKind;

const MARKER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub struct SunMarkerRenderer {
    pipeline: UnlitPipeline,
    mesh: MeshBuffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    position: Vec3,
    visible: bool,
}

impl SunMarkerRenderer {
    /// Parked below the ground until the first placement.
    pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, -700_000.0, 0.0);

    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let pipeline = UnlitPipeline::new(
            device,
            shader,
            surface_format,
            Some(DepthBuffer::FORMAT),
            wgpu::PrimitiveTopology::TriangleList,
        );

        let geometry = sphere(MeshKind::SunMarker.sphere());
        let vertices: Vec<VertexPositionColor> = geometry
            .vertices
            .iter()
            .map(|vertex| vertex.with_color(MARKER_COLOR))
            .collect();
        let allocator = BufferAllocator::new(device);
        let mesh = allocator.create_mesh("sun-marker", &vertices, IndexData::U32(&geometry.indices));
        let camera_buffer = allocator.create_uniform("sun-marker-camera", &CameraUniform::default());
        let camera_bind_group = pipeline.camera_bind_group(device, &camera_buffer);

        Self {
            pipeline,
            mesh,
            camera_buffer,
            camera_bind_group,
            position: Self::INITIAL_POSITION,
            visible: false,
        }
    }

    pub fn set_placement(&mut self, position: Vec3, visible: bool) {
        self.position = position;
        self.visible = visible;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Upload `view_proj` combined with the marker translation.
    pub fn update_camera(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        let uniform = CameraUniform::from_matrix(model_view_projection(view_proj, self.position));
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.visible {
            draw_unlit(render_pass, &self.pipeline, &self.camera_bind_group, &self.mesh);
        }
    }
}

fn model_view_projection(view_proj: Mat4, position: Vec3) -> Mat4 {
    view_proj * Mat4::from_translation(position)
}
