use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Barycentric weights of `p` relative to the screen-space triangle `(a, b, c)`.
///
/// The returned vector holds the weights for `a`, `b` and `c` in `x`, `y`, `z`.
/// `None` means the triangle has (almost) no area.
pub fn barycentric_coordinates(
    p: Point2<f32>,
    a: Point2<f32>,
    b: Point2<f32>,
    c: Point2<f32>,
) -> Option<Vector3<f32>> {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let double_area = ab.x * ac.y - ab.y * ac.x;
    if double_area.abs() < EPSILON {
        return None;
    }

    let inv = 1.0 / double_area;
    let w_b = (ap.x * ac.y - ap.y * ac.x) * inv;
    let w_c = (ab.x * ap.y - ab.y * ap.x) * inv;

    Some(Vector3::new(1.0 - w_b - w_c, w_b, w_c))
}

/// True when all three weights are non-negative (with a small tolerance for shared edges).
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.x >= -EPSILON && bary.y >= -EPSILON && bary.z >= -EPSILON
}

/// Converts screen-space weights into perspective-correct weights using the
/// clip-space `w` of each corner.
///
/// `None` is returned when the weighted sum collapses to zero.
pub fn perspective_correct_barycentric(bary: Vector3<f32>, w: [f32; 3]) -> Option<Vector3<f32>> {
    let inv_w = w.map(|w| if w.abs() > EPSILON { 1.0 / w } else { 1.0 });
    let weighted = Vector3::new(bary.x * inv_w[0], bary.y * inv_w[1], bary.z * inv_w[2]);

    let sum = weighted.x + weighted.y + weighted.z;
    if sum.abs() < EPSILON {
        return None;
    }
    Some(weighted / sum)
}
