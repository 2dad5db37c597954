use crate::io::image::save_framebuffer;
use crate::pipeline::passes::render_frame;
use crate::pipeline::renderer::Renderer;
use crate::scene::context::{Outcome, RenderContext};
use crate::ui::{hud, input};
use egui::{ColorImage, TextureHandle, TextureOptions};
use log::info;
use std::path::Path;
use std::time::Instant;

/// Interactive viewer: keyboard state on top of a software-rendered frame.
pub struct ViewerApp {
    pub context: RenderContext,
    renderer: Renderer,
    texture: Option<TextureHandle>,
    /// Set whenever the last rendered frame no longer matches the state.
    dirty: bool,
}

impl ViewerApp {
    pub fn new(context: RenderContext) -> Self {
        let render = &context.config.render;
        let renderer = Renderer::new(
            context.config.window.width,
            context.config.window.height,
            render.samples,
            render.cull_mode,
        );
        Self {
            context,
            renderer,
            texture: None,
            dirty: true,
        }
    }

    /// Applies the keys pressed this frame. Returns false when the viewer should close.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        for command in ctx.input(input::pressed_commands) {
            if self.context.state.apply(command) == Outcome::Quit {
                return false;
            }
            self.dirty = true;
        }
        true
    }

    /// Re-renders when needed and uploads the result to the GPU texture.
    fn refresh_frame(&mut self, ctx: &egui::Context, width: usize, height: usize) {
        if self.renderer.resize(width, height) {
            self.dirty = true;
        }
        if !self.dirty && self.texture.is_some() {
            return;
        }

        render_frame(&self.context, &mut self.renderer);
        let image = ColorImage::from_rgba_unmultiplied(
            [self.renderer.width(), self.renderer.height()],
            &self.renderer.framebuffer.to_rgba8(),
        );

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("frame", image, TextureOptions::LINEAR));
            }
        }
        self.dirty = false;
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.handle_input(ctx) {
            info!("Exit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let dt = ctx.input(|i| i.stable_dt);
        if self.context.state.tick(dt) {
            self.dirty = true;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let size = ui.available_size();
                let ppp = ctx.pixels_per_point();
                let width = (size.x * ppp).round().max(1.0) as usize;
                let height = (size.y * ppp).round().max(1.0) as usize;

                self.refresh_frame(ctx, width, height);

                if let Some(texture) = &self.texture {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                }
            });

        hud::draw_hud(ctx, &self.context);

        if self.context.state.auto_rotate {
            ctx.request_repaint();
        }
    }
}

/// Opens the viewer window and blocks until it is closed.
pub fn run_gui(context: RenderContext) -> Result<(), eframe::Error> {
    let window = &context.config.window;
    info!("Starting GUI mode ({}x{})...", window.width, window.height);

    let title = window.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([window.width as f32, window.height as f32])
            .with_min_inner_size([200.0, 150.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ViewerApp::new(context)))),
    )
}

/// Renders a single frame at the configured window size and saves it to `output`.
pub fn run_headless<P: AsRef<Path>>(
    context: &RenderContext,
    output: P,
) -> Result<(), image::ImageError> {
    let config = &context.config;
    info!("Starting headless render...");
    info!("Resolution: {}x{}", config.window.width, config.window.height);
    info!(
        "Shading: {}, material: {}",
        context.state.shading.label(),
        context.material().name
    );

    let start_time = Instant::now();
    let mut renderer = Renderer::new(
        config.window.width,
        config.window.height,
        config.render.samples,
        config.render.cull_mode,
    );
    render_frame(context, &mut renderer);
    info!("Render completed in {:.2?}", start_time.elapsed());

    save_framebuffer(&renderer.framebuffer, output)
}
