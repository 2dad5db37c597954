use crate::core::math::transform::TransformFactory;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Point3};

/// Centroid and radial extent of a mesh, used to frame it on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Mean of all vertex positions.
    pub centroid: Point3<f32>,
    /// Largest distance from `centroid` to any vertex.
    pub radius: f32,
    /// Factor that brings `radius` down to 1.
    pub scale: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            centroid: Point3::origin(),
            radius: 0.0,
            scale: 1.0,
        }
    }
}

impl Bounds {
    pub fn of(mesh: &Mesh) -> Self {
        if mesh.is_empty() {
            return Self::default();
        }

        let sum = mesh
            .vertices
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.position.coords);
        let centroid = Point3::from(sum / mesh.vertices.len() as f32);

        let radius = mesh
            .vertices
            .iter()
            .map(|v| (v.position - centroid).norm())
            .fold(0.0f32, f32::max);

        let scale = if radius < 1e-6 { 1.0 } else { 1.0 / radius };

        Self {
            centroid,
            radius,
            scale,
        }
    }

    /// Object -> display space: center on the origin, then shrink into the unit sphere.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        TransformFactory::uniform_scaling(self.scale)
            * TransformFactory::translation(&-self.centroid.coords)
    }
}
