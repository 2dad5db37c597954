use nalgebra::{Point3, Vector3};

/// A mesh vertex: object-space position plus its averaged normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// Unit length, or zero when no face contributes a usable direction.
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// An indexed triangle with its unit face normal (zero if degenerate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub indices: [u32; 3],
    pub normal: Vector3<f32>,
}

impl Triangle {
    /// Builds the triangle and derives its normal from the counter-clockwise
    /// winding `a -> b -> c`.
    pub fn from_corners(indices: [u32; 3], corners: [&Point3<f32>; 3]) -> Self {
        let edge1 = corners[1] - corners[0];
        let edge2 = corners[2] - corners[0];
        Self {
            indices,
            normal: safe_normalize(edge1.cross(&edge2)),
        }
    }

    /// Arithmetic mean of the three corners.
    pub fn centroid(corners: [&Point3<f32>; 3]) -> Point3<f32> {
        Point3::from((corners[0].coords + corners[1].coords + corners[2].coords) / 3.0)
    }
}

/// Normalizes `v`, mapping vectors shorter than 1e-6 to zero instead of NaN.
#[inline]
pub fn safe_normalize(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(1e-6).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn face_normal_follows_ccw_winding() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(0.0, 3.0, 0.0);

        let tri = Triangle::from_corners([0, 1, 2], [&a, &b, &c]);
        assert_relative_eq!(tri.normal, Vector3::z());

        let flipped = Triangle::from_corners([0, 2, 1], [&a, &c, &b]);
        assert_relative_eq!(flipped.normal, -Vector3::z());
    }

    #[test]
    fn degenerate_face_gets_zero_normal() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        let c = Point3::new(2.0, 2.0, 2.0);

        let tri = Triangle::from_corners([0, 1, 2], [&a, &b, &c]);
        assert_eq!(tri.normal, Vector3::zeros());
    }

    #[test]
    fn safe_normalize_keeps_direction() {
        let n = safe_normalize(Vector3::new(0.0, 4.0, 3.0));
        assert_relative_eq!(n, Vector3::new(0.0, 0.8, 0.6));
        assert_eq!(safe_normalize(Vector3::new(1e-9, 0.0, 0.0)), Vector3::zeros());
    }
}
