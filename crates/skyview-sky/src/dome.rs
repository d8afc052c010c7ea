//! Sky dome: an inverted sphere shaded by the Preetham scattering shader.

use std::num::NonZeroU64;

use log::info;
use skyview_render::{
    BufferAllocator, CameraUniform, DepthBuffer, IndexData, MeshBuffer, ShaderLibrary,
    VertexPositionNormalUv,
};

use crate::error::SkyError;
use crate::geometry::sphere;
use crate::host::MeshKind;
use crate::uniforms::{ScatteringUniforms, SkyUniformBlock};

pub const SKY_VERTEX_SHADER: &str = include_str!("shaders/sky_vertex.wgsl");
pub const SKY_FRAGMENT_SHADER: &str = include_str!("shaders/sky_fragment.wgsl");

const VERTEX_SHADER_NAME: &str = "sky-vertex";
const FRAGMENT_SHADER_NAME: &str = "sky-fragment";

pub struct SkyDomeRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: MeshBuffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    sky_buffer: wgpu::Buffer,
    sky_bind_group: wgpu::BindGroup,
}

impl SkyDomeRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shaders: &mut ShaderLibrary,
        uniforms: &ScatteringUniforms,
    ) -> Result<Self, SkyError> {
        let vertex_shader =
            shaders.load_stage(device, VERTEX_SHADER_NAME, SKY_VERTEX_SHADER, "vs_main")?;
        let fragment_shader =
            shaders.load_stage(device, FRAGMENT_SHADER_NAME, SKY_FRAGMENT_SHADER, "fs_main")?;

        let camera_layout = CameraUniform::bind_group_layout(device, "sky-camera-bind-group-layout");
        let sky_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky-uniforms-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(SkyUniformBlock::SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky-pipeline-layout"),
            bind_group_layouts: &[&camera_layout, &sky_layout],
            immediate_size: 0,
        });

        // Viewed from inside: cull the outward-facing triangles.
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Front),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let geometry = sphere(MeshKind::SkyDome.sphere());
        let allocator = BufferAllocator::new(device);
        let mesh = allocator.create_mesh("sky-dome", &geometry.vertices, IndexData::U32(&geometry.indices));

        let camera_buffer = allocator.create_uniform("sky-camera", &CameraUniform::default());
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-camera-bind-group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sky_buffer = allocator.create_uniform("sky-uniforms", &uniforms.to_gpu());
        let sky_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky-uniforms-bind-group"),
            layout: &sky_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: sky_buffer.as_entire_binding(),
            }],
        });

        info!(
            "Sky dome ready: {} vertices, {} triangles",
            mesh.vertex_count,
            mesh.index_count / 3
        );

        Ok(Self {
            pipeline,
            mesh,
            camera_buffer,
            camera_bind_group,
            sky_buffer,
            sky_bind_group,
        })
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
    }

    /// Upload the full uniform block.
    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &ScatteringUniforms) {
        queue.write_buffer(&self.sky_buffer, 0, bytemuck::bytes_of(&uniforms.to_gpu()));
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.sky_bind_group, &[]);
        self.mesh.bind(render_pass);
        self.mesh.draw(render_pass);
    }
}
