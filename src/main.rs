use clap::Parser;
use log::{error, info, warn};
use smf_viewer::app::{run_gui, run_headless};
use smf_viewer::io::config::Config;
use smf_viewer::io::smf::load_smf;
use smf_viewer::scene::context::{Outcome, RenderContext, ShadeMode};
use smf_viewer::ui::input::command_for_char;
use std::path::PathBuf;

/// SMF mesh viewer with flat, Gouraud and Phong shading.
#[derive(Parser, Debug)]
#[command(name = "smf-viewer", version)]
struct Cli {
    /// Mesh to display (.smf)
    #[arg(value_name = "MODEL")]
    model: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render one frame to --output instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Image written in headless mode
    #[arg(short, long, value_name = "FILE", default_value = "render.png")]
    output: PathBuf,

    /// Initial shading mode
    #[arg(long, value_enum)]
    shading: Option<ShadeMode>,

    /// Initial material index (0-based, wraps)
    #[arg(long, value_name = "N")]
    material: Option<usize>,

    /// Key presses applied before the first frame, e.g. "ddd2m"
    #[arg(long, value_name = "KEYS")]
    keys: Option<String>,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .filter_module("egui_winit", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("wgpu", log::LevelFilter::Warn)
        .filter_module("glutin", log::LevelFilter::Warn)
        .filter_module("sctk", log::LevelFilter::Warn)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::load(path).map_err(|e| {
                error!("Config load failed: {e}");
                format!("failed to load config '{}'", path.display())
            })?
        }
        None => Config::default(),
    };
    if let Some(shading) = cli.shading {
        config.render.shading = shading;
    }

    let mesh = load_smf(&cli.model).map_err(|e| {
        error!("Model load failed: {e}");
        format!("failed to load model '{}'", cli.model.display())
    })?;
    if mesh.triangles.is_empty() {
        warn!("Model has no faces; only the light marker will be drawn");
    }

    let mut context = RenderContext::new(config, mesh);
    info!(
        "Model centroid {:?}, radius {:.4}",
        context.bounds.centroid, context.bounds.radius
    );

    if let Some(index) = cli.material {
        context.state.material_index = index % context.materials.len();
    }
    for c in cli.keys.as_deref().unwrap_or_default().chars() {
        match command_for_char(c) {
            Some(command) => {
                if context.state.apply(command) == Outcome::Quit {
                    info!("Quit key in --keys, exiting");
                    return Ok(());
                }
            }
            None => warn!("Ignoring unbound key '{c}'"),
        }
    }

    if cli.headless {
        run_headless(&context, &cli.output).map_err(|e| {
            error!("Headless render failed: {e}");
            format!("failed to write '{}'", cli.output.display())
        })
    } else {
        run_gui(context).map_err(|e| {
            error!("GUI failed to start: {e}");
            "GUI failed to start".to_string()
        })
    }
}
