use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use kiai_render::logging::{init_logging, LoggingConfig};

mod assets;
mod gpu;
mod headless;
mod runtime;
mod scene;

/// Demo host for the kiai render-command interpreter.
#[derive(Parser, Debug)]
#[command(name = "kiai-studio", version)]
struct Cli {
    /// Render without a window and write the last frame to this PNG.
    #[arg(long, value_name = "OUT.png")]
    headless: Option<PathBuf>,

    /// TrueType/OpenType font used for every text command.
    #[arg(long, env = "KIAI_FONT", value_name = "PATH")]
    font: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long, default_value_t = 18.0)]
    size: f32,

    /// PNG shown in the image slot (a checkerboard when absent).
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Frames rendered in headless mode.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Log filter in `env_logger` syntax; overrides `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter);
    }
    init_logging(logging);

    let fonts = assets::load_fonts(cli.font.as_deref(), cli.size)?;
    let picture = assets::load_picture(cli.image.as_deref())?;

    match &cli.headless {
        Some(out) => headless::render_png(
            out,
            &fonts,
            &picture,
            cli.width,
            cli.height,
            cli.frames.max(1),
        ),
        None => runtime::run(
            runtime::WindowConfig {
                title: "kiai studio".to_string(),
                width: cli.width,
                height: cli.height,
            },
            fonts,
            picture,
        ),
    }
}
