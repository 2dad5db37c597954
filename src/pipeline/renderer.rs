use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{CullMode, Rasterizer};
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// Owns the render target and drives meshes through a shader.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// `sample_count` is the supersampling factor per axis (1 disables it).
    pub fn new(width: usize, height: usize, sample_count: usize, cull_mode: CullMode) -> Self {
        Self {
            rasterizer: Rasterizer::new(cull_mode),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Matches the output size to the window. Returns true when buffers were reallocated.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        self.framebuffer.resize(width, height)
    }

    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color, f32::INFINITY);
    }

    /// Runs every triangle of `mesh` through `shader` and rasterizes it.
    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, shader: &S) {
        for triangle in &mesh.triangles {
            let (clip_coords, varyings) = shader.primitive(triangle, mesh.corners(triangle));
            self.rasterizer
                .rasterize_triangle(&self.framebuffer, shader, &clip_coords, &varyings);
        }
    }
}
