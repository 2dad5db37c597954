use crate::scene::light::EyeLight;
use crate::scene::material::Material;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;

/// How the specular highlight is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecularModel {
    /// `max(N·H, 0)^shininess` with the half vector `H = normalize(L + V)`.
    #[default]
    BlinnPhong,
    /// `max(R·V, 0)^shininess` with `R = reflect(-L, N)`.
    Phong,
}

impl SpecularModel {
    pub fn label(self) -> &'static str {
        match self {
            SpecularModel::BlinnPhong => "Blinn-Phong",
            SpecularModel::Phong => "Phong",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SpecularModel::BlinnPhong => SpecularModel::Phong,
            SpecularModel::Phong => SpecularModel::BlinnPhong,
        }
    }
}

/// Lights, material and specular model for one frame.
/// Every shading path evaluates the same `shade` function; they differ only in where.
#[derive(Debug, Clone)]
pub struct Lighting {
    pub lights: Vec<EyeLight>,
    pub material: Material,
    pub specular_model: SpecularModel,
}

impl Lighting {
    /// Reflected color at eye-space `position` with unit `normal`, clamped to [0, 1].
    pub fn shade(&self, position: &Point3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
        clamp_color(self.shade_unclamped(position, normal))
    }

    /// Raw sum of the light terms. Channels may exceed 1 under strong highlights.
    pub fn shade_unclamped(&self, position: &Point3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
        self.reflect(position, normal, &self.material.ambient, &self.material.diffuse)
    }

    /// Same as `shade`, with the material's ambient and diffuse colors overridden.
    pub fn shade_with(
        &self,
        position: &Point3<f32>,
        normal: &Vector3<f32>,
        ambient_color: &Vector3<f32>,
        diffuse_color: &Vector3<f32>,
    ) -> Vector3<f32> {
        clamp_color(self.reflect(position, normal, ambient_color, diffuse_color))
    }

    fn reflect(
        &self,
        position: &Point3<f32>,
        normal: &Vector3<f32>,
        ambient_color: &Vector3<f32>,
        diffuse_color: &Vector3<f32>,
    ) -> Vector3<f32> {
        let material = &self.material;
        // The eye sits at the origin of eye space.
        let view_dir = (-position.coords).try_normalize(1e-6).unwrap_or_else(Vector3::z);

        let mut ambient = Vector3::zeros();
        let mut diffuse = Vector3::zeros();
        let mut specular = Vector3::zeros();

        for light in &self.lights {
            ambient += light.ambient;

            let Some(light_dir) = (light.position - position).try_normalize(1e-6) else {
                continue;
            };
            let n_dot_l = normal.dot(&light_dir).max(0.0);
            if n_dot_l <= 0.0 {
                continue;
            }
            diffuse += light.diffuse * n_dot_l;

            let highlight = match self.specular_model {
                SpecularModel::BlinnPhong => (light_dir + view_dir)
                    .try_normalize(1e-6)
                    .map_or(0.0, |half| normal.dot(&half).max(0.0)),
                SpecularModel::Phong => {
                    let reflected = normal * (2.0 * normal.dot(&light_dir)) - light_dir;
                    reflected.dot(&view_dir).max(0.0)
                }
            };
            specular += light.specular * highlight.powf(material.shininess);
        }

        ambient_color.component_mul(&ambient)
            + diffuse_color.component_mul(&diffuse)
            + material.specular.component_mul(&specular)
    }
}

#[inline]
pub fn clamp_color(color: Vector3<f32>) -> Vector3<f32> {
    color.map(|c| c.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn white_light(position: Point3<f32>) -> EyeLight {
        EyeLight {
            position,
            ambient: Vector3::repeat(0.1),
            diffuse: Vector3::repeat(0.5),
            specular: Vector3::repeat(1.0),
        }
    }

    fn matte() -> Material {
        Material::new(
            "matte",
            Vector3::repeat(1.0),
            Vector3::repeat(1.0),
            Vector3::zeros(),
            10.0,
        )
    }

    fn lighting(lights: Vec<EyeLight>, material: Material, model: SpecularModel) -> Lighting {
        Lighting {
            lights,
            material,
            specular_model: model,
        }
    }

    #[test]
    fn head_on_light_gives_full_diffuse() {
        let l = lighting(
            vec![white_light(Point3::new(0.0, 0.0, 0.0))],
            matte(),
            SpecularModel::BlinnPhong,
        );
        let c = l.shade(&Point3::new(0.0, 0.0, -2.0), &Vector3::z());
        assert_relative_eq!(c, Vector3::repeat(0.6), epsilon = 1e-6);
    }

    #[test]
    fn light_behind_surface_leaves_ambient_only() {
        let l = lighting(
            vec![white_light(Point3::new(0.0, 0.0, -5.0))],
            matte(),
            SpecularModel::Phong,
        );
        let c = l.shade(&Point3::new(0.0, 0.0, -2.0), &Vector3::z());
        assert_relative_eq!(c, Vector3::repeat(0.1), epsilon = 1e-6);
    }

    #[test]
    fn ambient_sums_over_all_lights() {
        let l = lighting(
            vec![
                white_light(Point3::new(0.0, 0.0, -5.0)),
                white_light(Point3::new(0.0, 0.0, -6.0)),
            ],
            matte(),
            SpecularModel::BlinnPhong,
        );
        let c = l.shade(&Point3::new(0.0, 0.0, -2.0), &Vector3::z());
        assert_relative_eq!(c, Vector3::repeat(0.2), epsilon = 1e-6);
    }

    #[test]
    fn mirror_configuration_peaks_for_both_specular_models() {
        let shiny = Material::new(
            "shiny",
            Vector3::zeros(),
            Vector3::zeros(),
            Vector3::repeat(0.5),
            50.0,
        );
        // Light and eye both straight above the surface: R == V and H == N.
        for model in [SpecularModel::BlinnPhong, SpecularModel::Phong] {
            let l = lighting(
                vec![white_light(Point3::new(0.0, 0.0, 0.0))],
                shiny.clone(),
                model,
            );
            let c = l.shade(&Point3::new(0.0, 0.0, -1.0), &Vector3::z());
            assert_relative_eq!(c, Vector3::repeat(0.5), epsilon = 1e-5);
        }
    }

    #[test]
    fn blinn_highlight_is_wider_than_phong() {
        let shiny = Material::new(
            "shiny",
            Vector3::zeros(),
            Vector3::zeros(),
            Vector3::repeat(1.0),
            20.0,
        );
        let position = Point3::new(0.0, 0.0, -1.0);
        let light = white_light(Point3::new(0.6, 0.0, 0.0));

        let blinn = lighting(vec![light], shiny.clone(), SpecularModel::BlinnPhong)
            .shade(&position, &Vector3::z());
        let phong =
            lighting(vec![light], shiny, SpecularModel::Phong).shade(&position, &Vector3::z());
        assert!(blinn.x > phong.x);
    }

    #[test]
    fn output_is_clamped() {
        let hot = Material::new(
            "hot",
            Vector3::repeat(5.0),
            Vector3::repeat(5.0),
            Vector3::repeat(5.0),
            1.0,
        );
        let l = lighting(
            vec![white_light(Point3::origin())],
            hot,
            SpecularModel::BlinnPhong,
        );
        let position = Point3::new(0.0, 0.0, -1.0);
        let c = l.shade(&position, &Vector3::z());
        assert_eq!(c, Vector3::repeat(1.0));

        let raw = l.shade_unclamped(&position, &Vector3::z());
        assert!(raw.x > 1.0);
    }

    #[test]
    fn toggling_specular_model_round_trips() {
        let model = SpecularModel::default();
        assert_eq!(model, SpecularModel::BlinnPhong);
        assert_eq!(model.toggled().toggled(), model);
        assert_eq!(model.toggled().label(), "Phong");
    }
}
