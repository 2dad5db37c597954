use crate::io::config::{Config, ControlsConfig};
use crate::pipeline::lighting::SpecularModel;
use crate::scene::camera::{Camera, OrbitParams, ProjectionType, aspect_ratio};
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use crate::scene::utils::Bounds;
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::f32::consts::TAU;

/// Which rendering path draws the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShadeMode {
    Flat,
    Gouraud,
    #[default]
    Phong,
}

impl ShadeMode {
    pub fn label(self) -> &'static str {
        match self {
            ShadeMode::Flat => "Flat",
            ShadeMode::Gouraud => "Gouraud",
            ShadeMode::Phong => "Phong",
        }
    }
}

/// A discrete user action, usually bound to one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    OrbitLeft,
    OrbitRight,
    CameraUp,
    CameraDown,
    ZoomOut,
    ZoomIn,
    ToggleProjection,
    SetShading(ShadeMode),
    NextMaterial,
    ToggleAutoRotate,
    Reset,
    LightAngleDown,
    LightAngleUp,
    LightRadiusDown,
    LightRadiusUp,
    LightHeightDown,
    LightHeightUp,
    ToggleSpecularModel,
}

/// What the frame loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Quit,
}

/// Everything the keyboard can change.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub camera: OrbitParams,
    pub perspective: bool,
    pub shading: ShadeMode,
    pub specular_model: SpecularModel,
    pub material_index: usize,
    pub material_count: usize,
    /// Light 1 on its cylinder around the model's Z axis (display space).
    pub light: OrbitParams,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub controls: ControlsConfig,

    home_camera: OrbitParams,
    home_light: OrbitParams,
}

impl ViewerState {
    pub fn from_config(config: &Config, material_count: usize) -> Self {
        let camera = OrbitParams {
            angle: config.camera.angle,
            radius: config.camera.radius.max(config.controls.min_radius),
            height: config.camera.height,
        };
        let light = OrbitParams {
            angle: config.light.angle,
            radius: config.light.radius.max(config.controls.light_min_radius),
            height: config.light.height,
        };
        Self {
            camera,
            perspective: config.camera.perspective,
            shading: config.render.shading,
            specular_model: config.render.specular,
            material_index: 0,
            material_count: material_count.max(1),
            light,
            auto_rotate: config.light.auto_rotate,
            auto_rotate_speed: config.light.auto_rotate_speed,
            controls: config.controls.clone(),
            home_camera: camera,
            home_light: light,
        }
    }

    /// Applies one command.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let c = &self.controls;
        match command {
            Command::Quit => return Outcome::Quit,
            Command::OrbitLeft => self.camera.angle -= c.orbit_step,
            Command::OrbitRight => self.camera.angle += c.orbit_step,
            Command::CameraUp => self.camera.height += c.height_step,
            Command::CameraDown => self.camera.height -= c.height_step,
            Command::ZoomOut => self.camera.radius += c.zoom_step,
            Command::ZoomIn => {
                self.camera.radius = (self.camera.radius - c.zoom_step).max(c.min_radius)
            }
            Command::ToggleProjection => self.perspective = !self.perspective,
            Command::SetShading(mode) => self.shading = mode,
            Command::NextMaterial => {
                self.material_index = (self.material_index + 1) % self.material_count
            }
            Command::ToggleAutoRotate => self.auto_rotate = !self.auto_rotate,
            Command::Reset => {
                self.camera = self.home_camera;
                self.light = self.home_light;
            }
            Command::LightAngleDown => self.light.angle -= c.light_angle_step,
            Command::LightAngleUp => self.light.angle += c.light_angle_step,
            Command::LightRadiusDown => {
                self.light.radius = (self.light.radius - c.light_radius_step).max(c.light_min_radius)
            }
            Command::LightRadiusUp => self.light.radius += c.light_radius_step,
            Command::LightHeightDown => self.light.height -= c.light_height_step,
            Command::LightHeightUp => self.light.height += c.light_height_step,
            Command::ToggleSpecularModel => self.specular_model = self.specular_model.toggled(),
        }
        debug!("{command:?} -> camera {:?}, light {:?}", self.camera, self.light);
        Outcome::Redraw
    }

    /// Advances the auto-rotating light by `dt` seconds. Returns true if it moved.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.auto_rotate {
            return false;
        }
        self.light.angle = (self.light.angle + self.auto_rotate_speed * dt).rem_euclid(TAU);
        true
    }

    /// Camera for a `width` x `height` target.
    pub fn camera(&self, config: &Config, width: usize, height: usize) -> Camera {
        let projection = if self.perspective {
            ProjectionType::Perspective {
                fov_y_rad: config.camera.fov.to_radians(),
            }
        } else {
            ProjectionType::Orthographic {
                half_height: config.camera.ortho_half_height,
            }
        };
        Camera::orbiting(
            &self.camera,
            projection,
            aspect_ratio(width, height),
            config.camera.near,
            config.camera.far,
        )
    }

    /// Position of light 1 in display space.
    pub fn light_position(&self) -> Point3<f32> {
        self.light.eye()
    }
}

/// The loaded model plus everything needed to draw a frame of it.
pub struct RenderContext {
    pub config: Config,
    pub mesh: Mesh,
    pub bounds: Bounds,
    pub marker: Mesh,
    pub materials: Vec<Material>,
    pub state: ViewerState,
}

impl RenderContext {
    pub fn new(config: Config, mesh: Mesh) -> Self {
        let bounds = Bounds::of(&mesh);
        let materials = config.materials();
        let state = ViewerState::from_config(&config, materials.len());
        let marker = Mesh::cube(config.render.marker_size * 0.5);
        Self {
            config,
            mesh,
            bounds,
            marker,
            materials,
            state,
        }
    }

    pub fn material(&self) -> &Material {
        &self.materials[self.state.material_index % self.materials.len()]
    }

    pub fn background(&self) -> Vector3<f32> {
        Vector3::from(self.config.render.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state() -> ViewerState {
        ViewerState::from_config(&Config::default(), 3)
    }

    #[test]
    fn defaults_match_startup_view() {
        let s = state();
        assert_eq!(s.camera.angle, 0.0);
        assert_eq!(s.camera.radius, 3.0);
        assert_eq!(s.camera.height, 0.0);
        assert!(s.perspective);
        assert_eq!(s.shading, ShadeMode::Phong);
        assert_eq!(s.material_index, 0);
        assert!(!s.auto_rotate);
        assert_eq!(s.light.radius, 1.2);
        assert_eq!(s.light.height, 0.5);
    }

    #[test]
    fn camera_commands_step_and_clamp() {
        let mut s = state();
        s.apply(Command::OrbitRight);
        s.apply(Command::OrbitRight);
        s.apply(Command::OrbitLeft);
        assert_relative_eq!(s.camera.angle, 0.05, epsilon = 1e-6);

        s.apply(Command::CameraUp);
        assert_relative_eq!(s.camera.height, 0.08, epsilon = 1e-6);

        for _ in 0..100 {
            s.apply(Command::ZoomIn);
        }
        assert_eq!(s.camera.radius, 0.1);
        s.apply(Command::ZoomOut);
        assert_relative_eq!(s.camera.radius, 0.18, epsilon = 1e-6);
    }

    #[test]
    fn light_commands_step_and_clamp() {
        let mut s = state();
        s.apply(Command::LightAngleUp);
        assert_relative_eq!(s.light.angle, 0.08, epsilon = 1e-6);
        s.apply(Command::LightHeightDown);
        assert_relative_eq!(s.light.height, 0.45, epsilon = 1e-6);
        for _ in 0..100 {
            s.apply(Command::LightRadiusDown);
        }
        assert_eq!(s.light.radius, 0.05);
        s.apply(Command::LightRadiusUp);
        assert_relative_eq!(s.light.radius, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn material_cycles_and_wraps() {
        let mut s = state();
        let seen: Vec<usize> = (0..4)
            .map(|_| {
                s.apply(Command::NextMaterial);
                s.material_index
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn reset_restores_camera_and_light_but_not_modes() {
        let mut s = state();
        s.apply(Command::OrbitRight);
        s.apply(Command::ZoomOut);
        s.apply(Command::LightHeightUp);
        s.apply(Command::SetShading(ShadeMode::Flat));
        s.apply(Command::ToggleProjection);

        s.apply(Command::Reset);
        assert_eq!(s.camera, state().camera);
        assert_eq!(s.light, state().light);
        assert_eq!(s.shading, ShadeMode::Flat);
        assert!(!s.perspective);
    }

    #[test]
    fn quit_is_reported() {
        let mut s = state();
        assert_eq!(s.apply(Command::Quit), Outcome::Quit);
        assert_eq!(s.apply(Command::ToggleSpecularModel), Outcome::Redraw);
        assert_eq!(s.specular_model, SpecularModel::Phong);
    }

    #[test]
    fn auto_rotation_only_runs_when_enabled_and_wraps() {
        let mut s = state();
        assert!(!s.tick(1.0));
        assert_eq!(s.light.angle, 0.0);

        s.apply(Command::ToggleAutoRotate);
        s.light.angle = TAU - 0.1;
        assert!(s.tick(0.5));
        assert_relative_eq!(s.light.angle, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn render_context_frames_model_and_selects_material() {
        let mesh = Mesh::cube(2.0);
        let mut ctx = RenderContext::new(Config::default(), mesh);
        assert_relative_eq!(ctx.bounds.radius, 12f32.sqrt(), epsilon = 1e-5);
        assert_eq!(ctx.material().name, "White Shiny");
        ctx.state.apply(Command::NextMaterial);
        assert_eq!(ctx.material().name, "Gold");
    }
}
