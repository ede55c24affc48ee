use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use stepback_common::{ControllerConfig, OverlapPolicy, Transform};
use stepback_controller::{FrameReport, PlayerController};
use stepback_input::{InputFrame, Key};
use stepback_kernel::Scene;
use tracing_subscriber::EnvFilter;

/// Upper bound on idle frames spent letting the last animated move finish.
const SETTLE_FRAMES: usize = 10_000;

#[derive(Parser)]
#[command(name = "stepback-cli", about = "Drive the player controller from the command line")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default tuning
    Info,
    /// Run the built-in step, click and undo scenarios
    Demo {
        /// Frame time in seconds
        #[arg(long, default_value = "0.125")]
        dt: f32,
    },
    /// Replay a YAML list of input frames against one entity at the origin
    Run {
        /// Input script (YAML list of frames)
        #[arg(short, long)]
        script: PathBuf,
        /// Controller config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Frame time in seconds
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct FrameLine {
    frame: usize,
    #[serde(flatten)]
    report: FrameReport,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = ControllerConfig::default();
            println!("stepback-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", stepback_common::crate_info());
            println!("kernel: {}", stepback_kernel::crate_info());
            println!("motion: {}", stepback_motion::crate_info());
            println!("history: {}", stepback_history::crate_info());
            println!("input: {}", stepback_input::crate_info());
            println!("controller: {}", stepback_controller::crate_info());
            println!(
                "defaults: step={} move_duration={}s overlap={:?} history_capacity={:?}",
                config.step, config.move_duration, config.overlap, config.history_capacity
            );
        }
        Commands::Demo { dt } => demo(dt)?,
        Commands::Run {
            script,
            config,
            dt,
            json,
        } => {
            let config = match config {
                Some(path) => ControllerConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ControllerConfig::default(),
            };
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let frames: Vec<InputFrame> = serde_yaml::from_str(&text)
                .with_context(|| format!("parsing script {}", script.display()))?;
            run(&frames, config, dt, json)?;
        }
    }

    Ok(())
}

fn run(frames: &[InputFrame], config: ControllerConfig, dt: f32, json: bool) -> anyhow::Result<()> {
    anyhow::ensure!(dt.is_finite() && dt > 0.0, "dt must be a positive number");

    let mut scene = Scene::new();
    let id = scene.spawn(Transform::default());
    let mut controller = PlayerController::new(id, config);
    tracing::info!(frames = frames.len(), dt, "running script");

    for (frame, input) in frames.iter().enumerate() {
        let report = controller.update(&mut scene, input, dt);
        if json {
            println!("{}", serde_json::to_string(&FrameLine { frame, report })?);
        } else {
            println!("frame {frame:>4}: {}", describe(&report));
        }
    }

    let settled = controller.settle(&mut scene, dt, SETTLE_FRAMES);
    let position = scene.position(id).context("player entity vanished")?;
    println!(
        "final: position={} history={} (settled in {settled} frames)",
        fmt_vec(position),
        controller.history().len()
    );
    Ok(())
}

fn demo(dt: f32) -> anyhow::Result<()> {
    anyhow::ensure!(dt.is_finite() && dt > 0.0, "dt must be a positive number");

    println!("Discrete steps with undo");
    let mut scene = Scene::new();
    let id = scene.spawn(Transform::default());
    let mut controller = PlayerController::new(id, ControllerConfig::default());
    for key in [Key::Right, Key::Up, Key::Undo, Key::Undo] {
        let report = controller.update(&mut scene, &InputFrame::idle().with_key(key), dt);
        println!(
            "  {key:?}: {} history={}",
            describe(&report),
            controller.history().len()
        );
    }

    for policy in [OverlapPolicy::CancelAndReplace, OverlapPolicy::Overlap] {
        println!("Click-to-move, second click mid-flight ({policy:?})");
        let mut scene = Scene::new();
        let id = scene.spawn(Transform::default());
        let config = ControllerConfig {
            overlap: policy,
            ..ControllerConfig::default()
        };
        let mut controller = PlayerController::new(id, config);
        let clicks = [Vec3::new(5.0, 0.0, 3.0), Vec3::new(-2.0, 0.0, 4.0)];
        for hit in clicks {
            let report = controller.update(&mut scene, &InputFrame::idle().with_click(Some(hit)), dt);
            println!("  click {}: {}", fmt_vec(hit), describe(&report));
        }
        let settled = controller.settle(&mut scene, dt, SETTLE_FRAMES);
        let position = scene.position(id).context("player entity vanished")?;
        println!("  settled after {settled} frames at {}", fmt_vec(position));

        controller.update(&mut scene, &InputFrame::idle().with_key(Key::Undo), dt);
        controller.settle(&mut scene, dt, SETTLE_FRAMES);
        let position = scene.position(id).context("player entity vanished")?;
        println!("  after undo: {}", fmt_vec(position));
    }
    Ok(())
}

fn describe(report: &FrameReport) -> String {
    let mut parts = Vec::new();
    if let Some(offset) = report.moved {
        parts.push(format!("step {}", fmt_vec(offset)));
    }
    if let Some(dest) = report.animated {
        parts.push(format!("move-to {}", fmt_vec(dest)));
    }
    if report.undone {
        parts.push("undo".to_string());
    }
    let position = report
        .position
        .map(fmt_vec)
        .unwrap_or_else(|| "-".to_string());
    if parts.is_empty() {
        format!("idle -> {position}")
    } else {
        format!("{} -> {position}", parts.join(", "))
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}
