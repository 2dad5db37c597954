use crate::core::rasterizer::CullMode;
use crate::pipeline::lighting::SpecularModel;
use crate::scene::context::ShadeMode;
use crate::scene::material::Material;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Viewer configuration. Every section and field is optional in the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Replaces the built-in material palette when non-empty.
    #[serde(default)]
    pub materials: Vec<MaterialConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 700,
            title: "SMF Viewer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Supersampling factor per axis.
    pub samples: usize,
    pub background: [f32; 3],
    pub cull_mode: CullMode,
    pub shading: ShadeMode,
    pub specular: SpecularModel,
    pub flat_normal_tint: bool,
    pub marker_color: [f32; 3],
    /// Edge length of the light marker cube in display units.
    pub marker_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples: 1,
            background: [0.06, 0.06, 0.06],
            cull_mode: CullMode::None,
            shading: ShadeMode::Phong,
            specular: SpecularModel::BlinnPhong,
            flat_normal_tint: true,
            marker_color: [1.0, 0.6, 0.2],
            marker_size: 0.03,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    pub perspective: bool,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub ortho_half_height: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            angle: 0.0,
            radius: 3.0,
            height: 0.0,
            perspective: true,
            fov: 60.0,
            ortho_half_height: 1.8,
            near: 0.1,
            far: 50.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    pub auto_rotate: bool,
    /// Radians per second while auto-rotating.
    pub auto_rotate_speed: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            angle: 0.0,
            radius: 1.2,
            height: 0.5,
            auto_rotate: false,
            auto_rotate_speed: 0.6,
        }
    }
}

/// Per-keypress increments and lower limits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub orbit_step: f32,
    pub height_step: f32,
    pub zoom_step: f32,
    pub min_radius: f32,
    pub light_angle_step: f32,
    pub light_radius_step: f32,
    pub light_min_radius: f32,
    pub light_height_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            orbit_step: 0.05,
            height_step: 0.08,
            zoom_step: 0.08,
            min_radius: 0.1,
            light_angle_step: 0.08,
            light_radius_step: 0.05,
            light_min_radius: 0.05,
            light_height_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl From<&MaterialConfig> for Material {
    fn from(cfg: &MaterialConfig) -> Self {
        Material::new(
            cfg.name.clone(),
            Vector3::from(cfg.ambient),
            Vector3::from(cfg.diffuse),
            Vector3::from(cfg.specular),
            cfg.shininess,
        )
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window width and height must be positive");
        }
        if self.render.samples == 0 {
            return invalid("render.samples must be at least 1");
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return invalid("camera.near must be positive and smaller than camera.far");
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return invalid("camera.fov must be between 0 and 180 degrees");
        }
        if self.camera.ortho_half_height <= 0.0 {
            return invalid("camera.ortho_half_height must be positive");
        }
        let c = &self.controls;
        if !(c.min_radius > 0.0 && c.min_radius.is_finite()) {
            return invalid("controls.min_radius must be positive");
        }
        if !(c.light_min_radius >= 0.0 && c.light_min_radius.is_finite()) {
            return invalid("controls.light_min_radius must not be negative");
        }
        let steps = [
            c.orbit_step,
            c.height_step,
            c.zoom_step,
            c.light_angle_step,
            c.light_radius_step,
            c.light_height_step,
            self.light.auto_rotate_speed,
        ];
        if steps.iter().any(|v| !v.is_finite()) {
            return invalid("control steps and light.auto_rotate_speed must be finite");
        }
        let positions = [
            self.camera.angle,
            self.camera.radius,
            self.camera.height,
            self.light.angle,
            self.light.radius,
            self.light.height,
        ];
        if positions.iter().any(|v| !v.is_finite()) {
            return invalid("camera and light positions must be finite");
        }
        if let Some(m) = self.materials.iter().find(|m| m.shininess < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "material '{}' has negative shininess",
                m.name
            )));
        }
        Ok(())
    }

    /// Configured palette, or the built-in presets when none is given.
    pub fn materials(&self) -> Vec<Material> {
        if self.materials.is_empty() {
            Material::presets()
        } else {
            self.materials.iter().map(Material::from).collect()
        }
    }
}
