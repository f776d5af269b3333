use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cubescene_input::{Axis, InputEvent};
use cubescene_render::{DebugTextRenderer, Viewport};
use cubescene_runtime::{EngineConfig, FrameLoop, RenderContext, synthetic_clock};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubescene-cli", about = "Headless driver for the cube scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON engine config; defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Compose one frame of the demo scene and print it
    Frame {
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
    },
    /// Run the frame loop on a synthetic clock with held movement input
    Run {
        /// Number of display frames
        #[arg(short, long, default_value = "120")]
        frames: usize,
        /// Display frame rate of the synthetic clock
        #[arg(long, default_value = "60")]
        fps: f64,
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
        /// Held forward axis: -1, 0 or 1
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        forward: i8,
        /// Held lateral axis: -1, 0 or 1
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        lateral: i8,
        /// Look delta applied before the first fixed update, in input units
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        turn: f32,
        /// Print every frame instead of a summary
        #[arg(long)]
        dump: bool,
    },
    /// Print the effective config as JSON
    Config,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let config =
                EngineConfig::load(path).with_context(|| format!("loading config {}", path.display()))?;
            tracing::info!(path = %path.display(), fixed_update_hz = config.fixed_update_hz, "config loaded");
            Ok(config)
        }
        None => {
            tracing::debug!("no config file given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("cubescene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: {}", cubescene_math::crate_info());
            println!("scene: {}", cubescene_scene::crate_info());
            println!("render: {}", cubescene_render::crate_info());
            println!("input: {}", cubescene_input::crate_info());
            println!("runtime: {}", cubescene_runtime::crate_info());
        }
        Commands::Frame { width, height } => {
            let ctx = RenderContext::demo(Viewport::new(width, height))?;
            let mut fl = FrameLoop::new(&config, ctx, DebugTextRenderer::new())?;
            match fl.advance(0.0).and_then(|report| report.output) {
                Some(text) => print!("{text}"),
                None => anyhow::bail!("no frame could be composed at {width}x{height}"),
            }
        }
        Commands::Run {
            frames,
            fps,
            width,
            height,
            forward,
            lateral,
            turn,
            dump,
        } => {
            anyhow::ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {fps}");
            let ctx = RenderContext::demo(Viewport::new(width, height))?;
            let mut fl = FrameLoop::new(&config, ctx, DebugTextRenderer::new())?;
            fl.handle_event(InputEvent::DirectionalInput {
                forward: Axis::try_from(forward)?,
                lateral: Axis::try_from(lateral)?,
            })?;
            if turn != 0.0 {
                fl.handle_event(InputEvent::MoveDelta {
                    d_pitch: 0.0,
                    d_yaw: turn,
                })?;
            }

            let mut reused = 0u64;
            let ran = fl.run(synthetic_clock(frames, fps), |_, report| {
                if report.reused {
                    reused += 1;
                }
                if dump {
                    if let Some(text) = &report.output {
                        print!("{text}");
                    }
                }
            });

            let player = fl
                .context()
                .player()
                .context("player node missing after run")?;
            println!(
                "frames={ran} fixed_updates={} reused={reused} elapsed={:.3}s fps={:.1}",
                fl.fixed_updates(),
                fl.elapsed(),
                fl.timer().fps()
            );
            println!(
                "player position=({:.3}, {:.3}, {:.3}) pitch={:.3} yaw={:.3}",
                player.position.x,
                player.position.y,
                player.position.z,
                player.pitch(),
                player.yaw()
            );
            println!("rendered={}", fl.renderer().frames_rendered());
            if reused > 0 {
                tracing::warn!(reused, "some frames reused the previous composition");
            }
        }
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
        }
    }

    Ok(())
}
