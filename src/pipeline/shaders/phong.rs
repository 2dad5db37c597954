use crate::core::geometry::{Vertex, safe_normalize};
use crate::core::math::transform::transform_point;
use crate::core::pipeline::{Interpolatable, Shader};
use crate::pipeline::shaders::LitUniforms;
use nalgebra::{Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Eye-space surface data carried from the vertex stage to each fragment.
#[derive(Clone, Copy, Debug)]
pub struct PhongVarying {
    pub eye_pos: Point3<f32>,
    pub eye_normal: Vector3<f32>,
}

// Point3 has no Point + Point, so blend through the coordinates.
impl Add for PhongVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            eye_pos: Point3::from(self.eye_pos.coords + other.eye_pos.coords),
            eye_normal: self.eye_normal + other.eye_normal,
        }
    }
}

impl Mul<f32> for PhongVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            eye_pos: Point3::from(self.eye_pos.coords * scalar),
            eye_normal: self.eye_normal * scalar,
        }
    }
}

impl Interpolatable for PhongVarying {}

/// Per-fragment lighting from interpolated eye-space position and normal.
pub struct PhongShader {
    pub uniforms: LitUniforms,
}

impl PhongShader {
    pub fn new(uniforms: LitUniforms) -> Self {
        Self { uniforms }
    }
}

impl Shader for PhongShader {
    type Varying = PhongVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let u = &self.uniforms;
        let eye_pos = transform_point(&u.model_view, &vertex.position);
        let varying = PhongVarying {
            eye_pos,
            eye_normal: safe_normalize(u.normal_matrix * vertex.normal),
        };
        (u.projection * eye_pos.to_homogeneous(), varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        // Interpolation shortens the normal; renormalize before lighting.
        let normal = safe_normalize(varying.eye_normal);
        self.uniforms.lighting.shade(&varying.eye_pos, &normal)
    }
}
