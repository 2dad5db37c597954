use nalgebra::Vector3;

/// Reflectance parameters for the lighting model.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        ambient: Vector3<f32>,
        diffuse: Vector3<f32>,
        specular: Vector3<f32>,
        shininess: f32,
    ) -> Self {
        Self {
            name: name.into(),
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// The built-in palette, in cycling order.
    pub fn presets() -> Vec<Material> {
        vec![
            Material::new(
                "White Shiny",
                Vector3::repeat(0.25),
                Vector3::repeat(0.8),
                Vector3::repeat(1.0),
                120.0,
            ),
            Material::new(
                "Gold",
                Vector3::new(0.24725, 0.1995, 0.0745),
                Vector3::new(0.75164, 0.60648, 0.22648),
                Vector3::new(0.628281, 0.555802, 0.366065),
                51.2,
            ),
            Material::new(
                "Red Bright Spec",
                Vector3::new(0.6, 0.2, 0.2),
                Vector3::new(0.9, 0.1, 0.1),
                Vector3::repeat(0.8),
                80.0,
            ),
        ]
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::presets().swap_remove(0)
    }
}
