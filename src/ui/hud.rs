use crate::scene::context::RenderContext;
use egui::{Align2, Color32, Frame, RichText, Vec2};

const BOX_ALPHA: u8 = 158;

/// Text shown in the overlay, top to bottom.
pub fn hud_lines(context: &RenderContext) -> Vec<String> {
    let state = &context.state;
    let projection = if state.perspective {
        "Perspective"
    } else {
        "Orthographic"
    };

    vec![
        format!("Material: {}", context.material().name),
        format!("Shade: {}", state.shading.label()),
        format!(
            "Projection: {}   Specular: {}",
            projection,
            state.specular_model.label()
        ),
        "Controls:".to_string(),
        "A/D - orbit   W/S - height   Q/E - radius   P - projection".to_string(),
        "1-Flat  2-Gouraud  3-Phong   M - material   H - specular".to_string(),
        format!(
            "L - toggle auto-rotate light ({})",
            if state.auto_rotate { "ON" } else { "OFF" }
        ),
        "Light1 (object coords): Z/X angle  C/V radius  B/N height".to_string(),
        format!(
            "Light angle: {:.2}  radius: {:.2}  height: {:.2}",
            state.light.angle, state.light.radius, state.light.height
        ),
        "R - reset   ESC - exit".to_string(),
    ]
}

/// Draws the overlay as a translucent box in the top-right corner of the screen.
pub fn draw_hud(ctx: &egui::Context, context: &RenderContext) {
    egui::Area::new(egui::Id::new("hud"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            Frame::new()
                .fill(Color32::from_black_alpha(BOX_ALPHA))
                .inner_margin(10.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    for line in hud_lines(context) {
                        ui.label(RichText::new(line).color(Color32::WHITE).monospace());
                    }
                });
        });
}
