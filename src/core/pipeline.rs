use crate::core::geometry::{Triangle, Vertex};
use nalgebra::{Vector3, Vector4};
use std::ops::{Add, Mul};

/// Values that can be blended across a triangle with barycentric weights.
///
/// `Send + Sync` is required because fragments are shaded from rayon workers.
pub trait Interpolatable:
    Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl Interpolatable for Vector3<f32> {}

/// The programmable part of the pipeline.
///
/// A shader turns vertices into clip-space positions plus a `Varying`, and
/// turns an interpolated `Varying` into a linear RGB color.
pub trait Shader: Send + Sync {
    type Varying: Interpolatable;

    /// Vertex stage: clip-space position and the per-vertex varying.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Primitive stage, run once per triangle before clipping.
    ///
    /// The default runs `vertex` on each corner. Shaders that need
    /// face-level data (e.g. the face normal for flat shading) override it.
    fn primitive(
        &self,
        triangle: &Triangle,
        corners: [&Vertex; 3],
    ) -> ([Vector4<f32>; 3], [Self::Varying; 3]) {
        let _ = triangle;
        let [(p0, v0), (p1, v1), (p2, v2)] = corners.map(|corner| self.vertex(corner));
        ([p0, p1, p2], [v0, v1, v2])
    }

    /// Fragment stage: final color for the interpolated varying.
    fn fragment(&self, varying: Self::Varying) -> Vector3<f32>;
}
