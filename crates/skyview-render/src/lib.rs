//! wgpu rendering plumbing: GPU context, viewport tracking, camera, shader
//! loading, mesh buffers, depth, render passes, and the unlit pipeline used by
//! helper geometry.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod viewport;

pub use buffer::{
    BufferAllocator, IndexData, MeshBuffer, VertexPositionColor, VertexPositionNormalUv,
};
pub use camera::{Camera, Projection};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{CameraUniform, UNLIT_SHADER_SOURCE, UnlitPipeline, draw_unlit};
pub use shader::{ShaderError, ShaderLibrary};
pub use viewport::{PhysicalSize, Viewport, ViewportResize};
