use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{
    barycentric_coordinates, is_inside_triangle, perspective_correct_barycentric,
};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::Shader;
use nalgebra::{Point2, Vector4};
use rayon::prelude::*;
use serde::Deserialize;

/// Which winding, if any, is discarded before shading.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    Back,
    Front,
    #[default]
    None,
}

/// Homogeneous clip planes as (axis, sign): `sign * p[axis] <= p.w`.
const CLIP_PLANES: [(usize, f32); 6] = [
    (0, 1.0),
    (0, -1.0),
    (1, 1.0),
    (1, -1.0),
    (2, 1.0),
    (2, -1.0),
];

type ClipVertex<V> = (Vector4<f32>, V);

/// Scan-converts clip-space triangles into a `FrameBuffer`.
#[derive(Debug, Default)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Rasterizer {
    pub fn new(cull_mode: CullMode) -> Self {
        Self { cull_mode }
    }

    /// Clips the triangle against the view frustum (Sutherland–Hodgman in
    /// homogeneous space), fans the resulting polygon and rasterizes each piece.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        // Fast path: nothing to clip.
        let fully_inside = clip_coords.iter().all(|p| {
            CLIP_PLANES
                .iter()
                .all(|&(axis, sign)| sign * p[axis] <= p.w)
        });
        if fully_inside {
            self.rasterize_clipped(framebuffer, shader, clip_coords, varyings);
            return;
        }

        // A triangle clipped by six planes has at most nine corners.
        let mut polygon: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(12);
        let mut scratch: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(12);
        polygon.extend(clip_coords.iter().copied().zip(varyings.iter().copied()));

        for &(axis, sign) in &CLIP_PLANES {
            if polygon.is_empty() {
                return;
            }
            clip_against_plane(&polygon, &mut scratch, axis, sign);
            std::mem::swap(&mut polygon, &mut scratch);
        }

        if polygon.len() < 3 {
            return;
        }

        let anchor = polygon[0];
        for pair in polygon[1..].windows(2) {
            self.rasterize_clipped(
                framebuffer,
                shader,
                &[anchor.0, pair[0].0, pair[1].0],
                &[anchor.1, pair[0].1, pair[1].1],
            );
        }
    }

    /// Rasterizes a triangle known to lie inside the frustum.
    fn rasterize_clipped<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        let mut screen = [Point2::origin(); 3];
        let mut w_values = [0.0; 3];
        for i in 0..3 {
            if clip_coords[i].w.abs() < 1e-6 {
                return;
            }
            let ndc = apply_perspective_division(&clip_coords[i]);
            w_values[i] = clip_coords[i].w;
            screen[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
        }

        // Screen Y points down, so counter-clockwise faces have negative area here.
        let e1 = screen[1] - screen[0];
        let e2 = screen[2] - screen[0];
        let signed_area = e1.x * e2.y - e1.y * e2.x;
        match self.cull_mode {
            CullMode::Back if signed_area >= 0.0 => return,
            CullMode::Front if signed_area <= 0.0 => return,
            _ => {}
        }

        let Some((start_x, end_x, start_y, end_y)) = clamped_bounds(&screen, framebuffer) else {
            return;
        };

        (start_y..=end_y).into_par_iter().for_each(|y| {
            for x in start_x..=end_x {
                let center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(bary) = barycentric_coordinates(center, screen[0], screen[1], screen[2])
                else {
                    // Zero-area triangle: nothing in this row or any other.
                    return;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }
                let Some(weights) = perspective_correct_barycentric(bary, w_values) else {
                    continue;
                };

                // NDC depth is affine in screen space, so it uses the uncorrected weights.
                let z_ndc = bary.x * clip_coords[0].z / w_values[0]
                    + bary.y * clip_coords[1].z / w_values[1]
                    + bary.z * clip_coords[2].z / w_values[2];
                let depth = z_ndc * 0.5 + 0.5;

                if framebuffer.depth_test_and_update(x, y, depth) {
                    let varying =
                        varyings[0] * weights.x + varyings[1] * weights.y + varyings[2] * weights.z;
                    framebuffer.set_pixel_safe(x, y, shader.fragment(varying));
                }
            }
        });
    }
}

/// Pixel bounding box of the triangle, clamped to the buffer. `None` if fully off-screen.
fn clamped_bounds(
    points: &[Point2<f32>; 3],
    framebuffer: &FrameBuffer,
) -> Option<(usize, usize, usize, usize)> {
    let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i64;
    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i64;
    let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
    let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

    let bw = framebuffer.buffer_width as i64;
    let bh = framebuffer.buffer_height as i64;
    if bw == 0 || bh == 0 || max_x < 0 || max_y < 0 || min_x >= bw || min_y >= bh {
        return None;
    }

    Some((
        min_x.max(0) as usize,
        max_x.min(bw - 1) as usize,
        min_y.max(0) as usize,
        max_y.min(bh - 1) as usize,
    ))
}

/// One Sutherland–Hodgman step. `output` is cleared first.
fn clip_against_plane<V: Copy + std::ops::Add<Output = V> + std::ops::Mul<f32, Output = V>>(
    input: &[ClipVertex<V>],
    output: &mut Vec<ClipVertex<V>>,
    axis: usize,
    sign: f32,
) {
    output.clear();
    let Some(&last) = input.last() else {
        return;
    };

    let inside = |p: &Vector4<f32>| sign * p[axis] <= p.w + 1e-6;

    let mut prev = last;
    let mut prev_inside = inside(&prev.0);
    for &curr in input {
        let curr_inside = inside(&curr.0);
        if curr_inside != prev_inside
            && let Some(hit) = intersect(prev, curr, axis, sign)
        {
            output.push(hit);
        }
        if curr_inside {
            output.push(curr);
        }
        prev = curr;
        prev_inside = curr_inside;
    }
}

/// Point where segment `a -> b` crosses `sign * p[axis] = p.w`; position and varying are lerped.
#[inline(always)]
fn intersect<V: Copy + std::ops::Add<Output = V> + std::ops::Mul<f32, Output = V>>(
    a: ClipVertex<V>,
    b: ClipVertex<V>,
    axis: usize,
    sign: f32,
) -> Option<ClipVertex<V>> {
    let da = a.0.w - sign * a.0[axis];
    let db = b.0.w - sign * b.0[axis];
    let denom = da - db;
    if denom.abs() < 1e-9 {
        return None;
    }
    let t = da / denom;
    if !t.is_finite() {
        return None;
    }
    Some((a.0 + (b.0 - a.0) * t, a.1 * (1.0 - t) + b.1 * t))
}
