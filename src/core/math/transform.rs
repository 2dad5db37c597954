use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Builds the handful of matrices the viewer needs.
/// All matrices are right-handed and map into OpenGL-style NDC ([-1, 1] on every axis).
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn uniform_scaling(factor: f32) -> Matrix4<f32> {
        Matrix4::new(
            factor, 0.0,    0.0,    0.0,
            0.0,    factor, 0.0,    0.0,
            0.0,    0.0,    factor, 0.0,
            0.0,    0.0,    0.0,    1.0,
        )
    }

    /// Look-at view matrix. The camera looks down its local -Z axis.
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        // An eye on the target or straight along `up` would leave the basis undefined.
        let back = (eye - target).try_normalize(1e-6).unwrap_or_else(Vector3::z);
        let right = up
            .cross(&back)
            .try_normalize(1e-6)
            .or_else(|| Vector3::y().cross(&back).try_normalize(1e-6))
            .unwrap_or_else(Vector3::x);
        let true_up = back.cross(&right);

        let rotation = Matrix4::new(
            right.x,   right.y,   right.z,   0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            back.x,    back.y,    back.z,    0.0,
            0.0,       0.0,       0.0,       1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Perspective projection, same convention as `gluPerspective`.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }

    /// Orthographic projection, same convention as `glOrtho`.
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Matrix4::new(
            2.0 * rl, 0.0,      0.0,      -(right + left) * rl,
            0.0,      2.0 * tb, 0.0,      -(top + bottom) * tb,
            0.0,      0.0,      2.0 * nf, (far + near) * nf,
            0.0,      0.0,      0.0,      1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Upper-left 3x3 block of a model-view matrix.
/// Only valid for normals when the matrix carries rotation, translation and uniform scale.
#[inline]
pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix3<f32> {
    model_view.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Transforms a point by an affine matrix (w is assumed to stay 1).
#[inline]
pub fn transform_point(matrix: &Matrix4<f32>, point: &Point3<f32>) -> Point3<f32> {
    let p = matrix * point.to_homogeneous();
    Point3::new(p.x, p.y, p.z)
}

/// Clip space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// NDC -> screen pixels. Screen Y grows downwards.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}
