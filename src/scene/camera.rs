use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionType {
    Perspective { fov_y_rad: f32 },
    /// `half_height` of the view volume; the half-width follows the aspect ratio.
    Orthographic { half_height: f32 },
}

/// Camera position on a cylinder around the world Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
}

impl OrbitParams {
    pub fn eye(&self) -> Point3<f32> {
        Point3::new(
            self.radius * self.angle.cos(),
            self.radius * self.angle.sin(),
            self.height,
        )
    }
}

/// View and projection for one frame.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
    pub projection_type: ProjectionType,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    /// Camera on the orbit, looking at the origin with +Z up.
    pub fn orbiting(
        orbit: &OrbitParams,
        projection_type: ProjectionType,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position: orbit.eye(),
            target: Point3::origin(),
            up: Vector3::z(),
            near,
            far,
            aspect_ratio,
            projection_type,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Recomputes the cached matrices after a field changed.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::look_at(&self.position, &self.target, &self.up);

        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective { fov_y_rad } => {
                TransformFactory::perspective(self.aspect_ratio, fov_y_rad, self.near, self.far)
            }
            ProjectionType::Orthographic { half_height } => {
                let half_width = half_height * self.aspect_ratio;
                TransformFactory::orthographic(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        };
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}

/// Width over height, with a zero height treated as square.
pub fn aspect_ratio(width: usize, height: usize) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}
