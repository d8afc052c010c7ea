//! Ground reference grid on the y = 0 plane.

use skyview_render::{
    BufferAllocator, CameraUniform, DepthBuffer, IndexData, MeshBuffer, UnlitPipeline,
    VertexPositionColor, draw_unlit,
};

pub const GRID_SIZE: f32 = 10_000.0;
pub const GRID_DIVISIONS: u32 = 2;

const GRID_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Line-list vertices for a square grid of `size` split into `divisions`
/// cells per side. Two vertices per line, `divisions + 1` lines each way.
pub fn grid_vertices(size: f32, divisions: u32) -> Vec<VertexPositionColor> {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size / 2.0;

    let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        for position in [
            [-half, 0.0, k],
            [half, 0.0, k],
            [k, 0.0, -half],
            [k, 0.0, half],
        ] {
            vertices.push(VertexPositionColor {
                position,
                color: GRID_COLOR,
            });
        }
    }
    vertices
}

pub struct GridRenderer {
    pipeline: UnlitPipeline,
    mesh: MeshBuffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl GridRenderer {
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
            wgpu::PrimitiveTopology::LineList,
        );

        let vertices = grid_vertices(GRID_SIZE, GRID_DIVISIONS);
        let indices: Vec<u32> = (0..vertices.len() as u32).collect();
        let allocator = BufferAllocator::new(device);
        let mesh = allocator.create_mesh("grid", &vertices, IndexData::U32(&indices));
        let camera_buffer = allocator.create_uniform("grid-camera", &CameraUniform::default());
        let camera_bind_group = pipeline.camera_bind_group(device, &camera_buffer);

        Self {
            pipeline,
            mesh,
            camera_buffer,
            camera_bind_group,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        draw_unlit(render_pass, &self.pipeline, &self.camera_bind_group, &self.mesh);
    }
}
