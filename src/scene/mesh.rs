use crate::core::geometry::{Triangle, Vertex, safe_normalize};
use log::warn;
use nalgebra::{Point3, Vector3};

/// An indexed triangle mesh with per-face and averaged per-vertex normals.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Builds a mesh from positions and 0-based triangle indices.
    ///
    /// Face normals come from each triangle's winding; vertex normals are the
    /// renormalized sum of the adjacent face normals. Faces that reference a
    /// missing vertex are skipped with a warning; the SMF reader rejects those
    /// earlier, so this only guards callers building meshes directly.
    pub fn from_faces(positions: Vec<Point3<f32>>, faces: &[[u32; 3]]) -> Self {
        let count = positions.len();
        let mut skipped = 0usize;

        let triangles: Vec<Triangle> = faces
            .iter()
            .filter_map(|&face| {
                if face.iter().any(|&i| i as usize >= count) {
                    skipped += 1;
                    return None;
                }
                let corners = face.map(|i| &positions[i as usize]);
                Some(Triangle::from_corners(face, corners))
            })
            .collect();

        if skipped > 0 {
            warn!("Skipped {skipped} face(s) with out-of-range vertex indices");
        }

        let mut vertices: Vec<Vertex> = positions
            .into_iter()
            .map(|p| Vertex::new(p, Vector3::zeros()))
            .collect();
        compute_vertex_normals(&mut vertices, &triangles);

        Self {
            vertices,
            triangles,
        }
    }

    /// Flat index list, three entries per triangle.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|t| t.indices).collect()
    }

    /// Corner vertices of a triangle.
    #[inline]
    pub fn corners(&self, triangle: &Triangle) -> [&Vertex; 3] {
        triangle.indices.map(|i| &self.vertices[i as usize])
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned cube centered on the origin, faces wound outward.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let positions = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        #[rustfmt::skip]
        let faces = [
            [0, 3, 2], [0, 2, 1], // -Z
            [4, 5, 6], [4, 6, 7], // +Z
            [0, 1, 5], [0, 5, 4], // -Y
            [3, 7, 6], [3, 6, 2], // +Y
            [0, 4, 7], [0, 7, 3], // -X
            [1, 2, 6], [1, 6, 5], // +X
        ];
        Self::from_faces(positions, &faces)
    }
}

/// Sums the unit face normals around each vertex and renormalizes.
///
/// Vertices without a usable direction (isolated, or with cancelling faces)
/// end up with the zero vector.
pub fn compute_vertex_normals(vertices: &mut [Vertex], triangles: &[Triangle]) {
    let mut sums = vec![Vector3::zeros(); vertices.len()];

    for tri in triangles {
        for &i in &tri.indices {
            if let Some(sum) = sums.get_mut(i as usize) {
                *sum += tri.normal;
            }
        }
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = safe_normalize(sum);
    }
}
