use smf_viewer::io::config::Config;
use smf_viewer::io::smf::load_smf;
use smf_viewer::pipeline::passes::render_frame;
use smf_viewer::pipeline::renderer::Renderer;
use smf_viewer::scene::context::{Command, RenderContext, ShadeMode};
use std::fs;
use std::path::PathBuf;

/// A unit cube centered away from the origin, written as quads.
const OFFSET_CUBE: &str = "\
# cube spanning [4, 6]^3
v 4 4 4
v 6 4 4
v 6 6 4
v 4 6 4
v 4 4 6
v 6 4 6
v 6 6 6
v 4 6 6
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

fn write_model(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("smf_viewer_{}_{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.window.width = 96;
    config.window.height = 72;
    config
}

fn render(context: &RenderContext) -> Renderer {
    let config = &context.config;
    let mut renderer = Renderer::new(
        config.window.width,
        config.window.height,
        config.render.samples,
        config.render.cull_mode,
    );
    render_frame(context, &mut renderer);
    renderer
}

fn center_pixel(renderer: &Renderer) -> [u8; 4] {
    let rgba = renderer.framebuffer.to_rgba8();
    let (w, h) = (renderer.width(), renderer.height());
    let i = ((h / 2) * w + w / 2) * 4;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

#[test]
fn off_center_model_is_recentered_and_drawn() {
    let path = write_model("cube.smf", OFFSET_CUBE);
    let mesh = load_smf(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.triangles.len(), 12);

    let context = RenderContext::new(small_config(), mesh);
    let background = [15, 15, 15, 255];

    let renderer = render(&context);
    assert_ne!(center_pixel(&renderer), background);

    let rgba = renderer.framebuffer.to_rgba8();
    assert_eq!(&rgba[0..4], &background);
}

#[test]
fn every_shading_mode_covers_the_center() {
    let path = write_model("tetra.smf", include_str!("../models/tetrahedron.smf"));
    let mesh = load_smf(&path).unwrap();
    let _ = fs::remove_file(&path);

    let mut context = RenderContext::new(small_config(), mesh);
    for mode in [ShadeMode::Flat, ShadeMode::Gouraud, ShadeMode::Phong] {
        context.state.apply(Command::SetShading(mode));
        let renderer = render(&context);
        assert_ne!(center_pixel(&renderer), [15, 15, 15, 255], "{mode:?}");
    }
}

#[test]
fn bundled_models_load() {
    for name in ["tetrahedron.smf", "octahedron.smf", "sphere.smf"] {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models").join(name);
        let mesh = load_smf(&path).unwrap();
        assert!(!mesh.triangles.is_empty(), "{name}");
    }
}
