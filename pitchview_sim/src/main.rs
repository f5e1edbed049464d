//! PitchView Simulator CLI
//!
//! Plays a trajectory dataset through the animation engine, headless or in
//! the Rerun viewer.

use anyhow::{bail, Context, Result};
use clap::Parser;
use pitchview_core::{load_dataset, sample_dataset, AnimationConfig, TrajectoryAnimator, TrajectoryRecord};
use pitchview_env::{Renderer, SceneRenderer};
use pitchview_sim::{play, FrameLog, LoopConfig, SceneDressing};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// PitchView trajectory animation CLI
#[derive(Parser, Debug)]
#[command(name = "pitchview-sim")]
#[command(about = "Animate timestamped pitch trajectories side by side", long_about = None)]
struct Args {
    /// Dataset JSON (defaults to the built-in test pitch)
    #[arg(long)]
    data: Option<String>,

    /// Frames to wait before the animation starts
    #[arg(long, default_value = "50")]
    delay: u64,

    /// Tick rate in frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Maximum frames to run (0 = until complete plus hold)
    #[arg(long, default_value = "0")]
    frames: u64,

    /// Frames to keep running after the animation completes
    #[arg(long, default_value = "30")]
    hold: u64,

    /// Cap on resident meshes in the headless renderer
    #[arg(long)]
    capacity: Option<usize>,

    /// Export a per-frame JSON log to this path
    #[arg(long)]
    export: Option<String>,

    /// Render in the Rerun viewer (requires the `visualization` feature)
    #[arg(long)]
    visualize: bool,

    /// Save the Rerun recording to this `.rrd` file instead of spawning the viewer
    #[arg(long)]
    save: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Rendering goes through Rerun, live or saved.
    fn uses_rerun(&self) -> bool {
        self.visualize || self.save.is_some()
    }

    /// Capacity given for a renderer that does not enforce one.
    fn ignored_capacity(&self) -> Option<usize> {
        self.capacity.filter(|_| self.uses_rerun())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    info!("PitchView Simulator v{}", env!("CARGO_PKG_VERSION"));

    let (dataset_name, records) = match &args.data {
        Some(path) => (
            path.clone(),
            load_dataset(path).with_context(|| format!("Failed to load dataset {}", path))?,
        ),
        None => ("built-in sample".to_string(), sample_dataset()),
    };

    let config = AnimationConfig::default().with_delay(args.delay);
    let loop_config = LoopConfig {
        fps: args.fps,
        max_frames: args.frames,
        hold_frames: args.hold,
    };
    let dressing = SceneDressing::default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to build runtime")?;

    if args.uses_rerun() {
        if let Some(capacity) = args.ignored_capacity() {
            warn!(capacity, "--capacity only applies to the headless renderer, ignoring it");
        }
        return visualize(&runtime, &args, &dataset_name, &records, config, &loop_config, dressing);
    }

    let mut scene = SceneRenderer::new();
    scene.set_capacity(args.capacity);
    let mut animator = TrajectoryAnimator::from_records(&records, config, scene);
    runtime.block_on(run(&mut animator, &args, &dataset_name, &loop_config, dressing))?;

    let scene = animator.into_renderer();
    let stats = scene.stats();
    info!(
        resident = scene.resident(),
        created = stats.created,
        disposed = stats.disposed,
        rejected = stats.rejected,
        "Scene summary"
    );
    Ok(())
}

#[cfg(feature = "visualization")]
fn visualize(
    runtime: &tokio::runtime::Runtime,
    args: &Args,
    dataset_name: &str,
    records: &[TrajectoryRecord],
    config: AnimationConfig,
    loop_config: &LoopConfig,
    dressing: SceneDressing,
) -> Result<()> {
    use pitchview_core::visualization::RerunRenderer;

    let renderer = match &args.save {
        Some(path) => {
            let renderer = RerunRenderer::new_to_file("pitchview", path)
                .with_context(|| format!("Failed to create recording {}", path))?;
            info!("Saving Rerun recording to {}", path);
            renderer
        }
        None => {
            let renderer = RerunRenderer::new("pitchview").context("Failed to start Rerun")?;
            info!("Rerun visualization enabled - open Rerun Viewer to watch the pitches");
            renderer
        }
    };
    dressing.apply(&renderer).context("Failed to log scene dressing")?;

    let mut animator = TrajectoryAnimator::from_records(records, config, renderer);
    runtime.block_on(run(&mut animator, args, dataset_name, loop_config, dressing))
}

#[cfg(not(feature = "visualization"))]
fn visualize(
    _runtime: &tokio::runtime::Runtime,
    _args: &Args,
    _dataset_name: &str,
    _records: &[TrajectoryRecord],
    _config: AnimationConfig,
    _loop_config: &LoopConfig,
    _dressing: SceneDressing,
) -> Result<()> {
    bail!("Rerun visualization not available (compile with --features visualization)")
}

/// Plays the animation and writes the optional frame log.
async fn run<R: Renderer>(
    animator: &mut TrajectoryAnimator<R>,
    args: &Args,
    dataset_name: &str,
    loop_config: &LoopConfig,
    dressing: SceneDressing,
) -> Result<()> {
    if animator.tracked().is_empty() {
        bail!("No usable trajectories in {}", dataset_name);
    }

    let mut log = args
        .export
        .as_ref()
        .map(|_| FrameLog::new(dataset_name, animator.config().delay).with_dressing(dressing));

    let summary = play(animator, loop_config, log.as_mut()).await;

    match summary.completed_at {
        Some(frame) => info!("✓ Animation completed at frame {}", frame),
        None => info!("Stopped after {} frames before completion", summary.frames),
    }

    if let (Some(path), Some(log)) = (&args.export, &log) {
        log.write_to_file(path)
            .with_context(|| format!("Failed to write export {}", path))?;
        info!("Exported {} frames to {}", log.frames.len(), path);
    }
    Ok(())
}
