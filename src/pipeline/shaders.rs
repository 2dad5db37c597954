pub mod flat;
pub mod gouraud;
pub mod phong;
pub mod unlit;

use crate::pipeline::lighting::{Lighting, SpecularModel};
use crate::scene::light::EyeLight;
use crate::scene::material::Material;
use nalgebra::{Matrix3, Matrix4};

/// Per-draw uniforms shared by the lit shaders.
#[derive(Debug, Clone)]
pub struct LitUniforms {
    pub model_view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// Upper-left 3x3 of `model_view`; normals are renormalized after use.
    pub normal_matrix: Matrix3<f32>,
    pub lighting: Lighting,
}

impl LitUniforms {
    pub fn new(
        model_view: Matrix4<f32>,
        projection: Matrix4<f32>,
        lights: Vec<EyeLight>,
        material: Material,
        specular_model: SpecularModel,
    ) -> Self {
        Self {
            normal_matrix: crate::core::math::transform::normal_matrix(&model_view),
            model_view,
            projection,
            lighting: Lighting {
                lights,
                material,
                specular_model,
            },
        }
    }
}
