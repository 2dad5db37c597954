use crate::core::math::transform::transform_point;
use nalgebra::{Matrix4, Point3, Vector3};

/// The coordinate frame a light's position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSpace {
    /// Fixed relative to the camera.
    Eye(Point3<f32>),
    /// Fixed relative to the (normalized) model; moves with the view.
    Object(Point3<f32>),
}

/// A positional light with separate ambient, diffuse and specular colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub space: LightSpace,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

/// A light resolved into eye coordinates, ready for shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLight {
    pub position: Point3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Light {
    /// White light slightly in front of the camera.
    pub fn headlight() -> Self {
        Self {
            space: LightSpace::Eye(Point3::new(0.0, 0.0, 1.5)),
            ambient: Vector3::repeat(0.2),
            diffuse: Vector3::repeat(0.6),
            specular: Vector3::repeat(1.0),
        }
    }

    /// Warm light placed in object space, no ambient contribution.
    pub fn object_light(position: Point3<f32>) -> Self {
        Self {
            space: LightSpace::Object(position),
            ambient: Vector3::zeros(),
            diffuse: Vector3::new(0.8, 0.5, 0.2),
            specular: Vector3::repeat(0.8),
        }
    }

    /// Resolves the position with `view` (object lights only; eye lights pass through).
    pub fn to_eye(&self, view: &Matrix4<f32>) -> EyeLight {
        let position = match self.space {
            LightSpace::Eye(p) => p,
            LightSpace::Object(p) => transform_point(view, &p),
        };
        EyeLight {
            position,
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use approx::assert_relative_eq;

    #[test]
    fn eye_light_ignores_view() {
        let view = TransformFactory::translation(&Vector3::new(5.0, 5.0, 5.0));
        let light = Light::headlight().to_eye(&view);
        assert_eq!(light.position, Point3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn object_light_follows_view() {
        let view = TransformFactory::look_at(
            &Point3::new(3.0, 0.0, 0.0),
            &Point3::origin(),
            &Vector3::z(),
        );
        let light = Light::object_light(Point3::new(1.2, 0.0, 0.5)).to_eye(&view);
        assert_relative_eq!(light.position, Point3::new(0.0, 0.5, -1.8), epsilon = 1e-6);
    }
}
