use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use boids::render::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, parse_colour};
use boids::{Flock, FrameRenderer, TickOrder, WorldConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Simulate a flock of boids and write each frame as a PNG.
#[derive(FromArgs)]
struct Args {
    /// number of boids in the flock
    #[argh(option, default = "13")]
    boids: usize,

    /// number of frames to simulate
    #[argh(option, default = "600")]
    frames: usize,

    /// seed for the initial positions and headings
    #[argh(option, default = "42")]
    seed: u64,

    /// JSON file overriding the default world settings
    #[argh(option)]
    config: Option<PathBuf>,

    /// directory frames are written to
    #[argh(option, default = "PathBuf::from(\"frames\")")]
    output: PathBuf,

    /// background colour as a hex string
    #[argh(option, default = "DEFAULT_BACKGROUND.to_string()")]
    background: String,

    /// boid colour as a hex string
    #[argh(option, default = "DEFAULT_FOREGROUND.to_string()")]
    foreground: String,

    /// steer, move and wrap each boid before looking at the next one
    #[argh(switch)]
    interleaved: bool,

    /// simulate without writing frames
    #[argh(switch)]
    no_render: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => WorldConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WorldConfig::default(),
    };
    let order = if args.interleaved {
        TickOrder::Interleaved
    } else {
        TickOrder::Snapshot
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut flock = Flock::initialize(args.boids, config, &mut rng)?.with_order(order);

    let renderer = if args.no_render {
        None
    } else {
        fs::create_dir_all(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?;
        Some(FrameRenderer::new(
            &config,
            parse_colour(&args.background)?,
            parse_colour(&args.foreground)?,
        ))
    };

    let pbar = ProgressBar::new(args.frames as u64);
    pbar.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}/{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )?);
    for frame in 0..args.frames {
        if let Some(renderer) = &renderer {
            renderer.save_frame(flock.boids(), &args.output, frame)?;
        }
        flock.tick();
        pbar.inc(1);
    }
    pbar.finish();

    info!(
        ticks = flock.ticks(),
        boids = flock.boids().len(),
        order = ?flock.order(),
        "simulation finished"
    );
    Ok(())
}
