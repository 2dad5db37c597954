use crate::core::geometry::{Vertex, safe_normalize};
use crate::core::math::transform::transform_point;
use crate::core::pipeline::Shader;
use crate::pipeline::lighting::clamp_color;
use crate::pipeline::shaders::LitUniforms;
use nalgebra::{Vector3, Vector4};

/// Per-vertex lighting. The unclamped lit color is the varying; fragments clamp it
/// after interpolation so highlights keep their full extent.
pub struct GouraudShader {
    pub uniforms: LitUniforms,
}

impl GouraudShader {
    pub fn new(uniforms: LitUniforms) -> Self {
        Self { uniforms }
    }
}

impl Shader for GouraudShader {
    type Varying = Vector3<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let u = &self.uniforms;
        let eye_pos = transform_point(&u.model_view, &vertex.position);
        let eye_normal = safe_normalize(u.normal_matrix * vertex.normal);

        let color = u.lighting.shade_unclamped(&eye_pos, &eye_normal);
        (u.projection * eye_pos.to_homogeneous(), color)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        clamp_color(varying)
    }
}
