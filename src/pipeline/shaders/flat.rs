use crate::core::geometry::{Triangle, Vertex, safe_normalize};
use crate::core::math::transform::transform_point;
use crate::core::pipeline::Shader;
use crate::pipeline::shaders::LitUniforms;
use nalgebra::{Vector3, Vector4};

/// One lit color per face, evaluated at the face centroid with the face normal.
pub struct FlatShader {
    pub uniforms: LitUniforms,
    /// Replace the material's ambient/diffuse color with `|face normal|`.
    pub normal_tint: bool,
}

impl FlatShader {
    pub fn new(uniforms: LitUniforms, normal_tint: bool) -> Self {
        Self {
            uniforms,
            normal_tint,
        }
    }

    fn face_color(&self, triangle: &Triangle, corners: [&Vertex; 3]) -> Vector3<f32> {
        let u = &self.uniforms;
        let center = Triangle::centroid(corners.map(|v| &v.position));
        let eye_center = transform_point(&u.model_view, &center);
        let eye_normal = safe_normalize(u.normal_matrix * triangle.normal);

        if self.normal_tint {
            let tint = triangle.normal.abs();
            u.lighting.shade_with(&eye_center, &eye_normal, &tint, &tint)
        } else {
            u.lighting.shade(&eye_center, &eye_normal)
        }
    }
}

impl Shader for FlatShader {
    type Varying = Vector3<f32>;

    /// Only used outside `primitive`; carries no face information.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let u = &self.uniforms;
        let eye_pos = transform_point(&u.model_view, &vertex.position);
        (
            u.projection * eye_pos.to_homogeneous(),
            u.lighting.material.diffuse,
        )
    }

    fn primitive(
        &self,
        triangle: &Triangle,
        corners: [&Vertex; 3],
    ) -> ([Vector4<f32>; 3], [Self::Varying; 3]) {
        let color = self.face_color(triangle, corners);
        let u = &self.uniforms;
        let clip = corners
            .map(|v| u.projection * transform_point(&u.model_view, &v.position).to_homogeneous());
        (clip, [color; 3])
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        varying
    }
}
