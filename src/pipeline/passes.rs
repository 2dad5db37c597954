use crate::core::math::transform::TransformFactory;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::LitUniforms;
use crate::pipeline::shaders::flat::FlatShader;
use crate::pipeline::shaders::gouraud::GouraudShader;
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::shaders::unlit::UnlitShader;
use crate::scene::context::{RenderContext, ShadeMode};
use crate::scene::light::Light;
use nalgebra::Vector3;

/// Draws one complete frame of `context` into `renderer`'s framebuffer.
pub fn render_frame(context: &RenderContext, renderer: &mut Renderer) {
    renderer.clear(context.background());

    let state = &context.state;
    let camera = state.camera(&context.config, renderer.width(), renderer.height());
    let view = camera.view_matrix();
    let projection = camera.projection_matrix();
    let model_view = view * context.bounds.model_matrix();

    let light_position = state.light_position();
    let lights = [Light::headlight(), Light::object_light(light_position)]
        .iter()
        .map(|light| light.to_eye(&view))
        .collect();

    let uniforms = LitUniforms::new(
        model_view,
        projection,
        lights,
        context.material().clone(),
        state.specular_model,
    );

    match state.shading {
        ShadeMode::Flat => {
            let shader = FlatShader::new(uniforms, context.config.render.flat_normal_tint);
            renderer.draw_mesh(&context.mesh, &shader);
        }
        ShadeMode::Gouraud => renderer.draw_mesh(&context.mesh, &GouraudShader::new(uniforms)),
        ShadeMode::Phong => renderer.draw_mesh(&context.mesh, &PhongShader::new(uniforms)),
    }

    render_light_marker(context, renderer, &(projection * view), &light_position.coords);
}

/// Small unlit cube at light 1's display-space position.
fn render_light_marker(
    context: &RenderContext,
    renderer: &mut Renderer,
    view_projection: &nalgebra::Matrix4<f32>,
    position: &Vector3<f32>,
) {
    let mvp = view_projection * TransformFactory::translation(position);
    let shader = UnlitShader::new(mvp, Vector3::from(context.config.render.marker_color));
    renderer.draw_mesh(&context.marker, &shader);
}
