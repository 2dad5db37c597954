use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use nalgebra::{Matrix4, Vector3, Vector4};

/// Paints every fragment with one color. Used for the light marker.
pub struct UnlitShader {
    pub mvp_matrix: Matrix4<f32>,
    pub color: Vector3<f32>,
}

impl UnlitShader {
    pub fn new(mvp_matrix: Matrix4<f32>, color: Vector3<f32>) -> Self {
        Self { mvp_matrix, color }
    }
}

impl Shader for UnlitShader {
    type Varying = Vector3<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        (self.mvp_matrix * vertex.position.to_homogeneous(), self.color)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        varying
    }
}
