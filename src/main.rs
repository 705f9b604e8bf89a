//! Tunnel Drone headless entry point
//!
//! Flies sessions on the sandbox physics world with the autopilot engaged and
//! logs every status change. Rendering and keyboard input belong to an external
//! harness; this binary is for balancing and smoke runs.
//!
//! Usage: `tunnel-drone [TUNING.json] [--seed N] [--runs N] [--seconds N] [--dump-tuning]`

use std::path::PathBuf;

use clap::Parser;
use tunnel_drone::consts::{SIM_DT, SIM_DT_MS};
use tunnel_drone::sim::{Game, SandboxWorld, TickInput, tick};
use tunnel_drone::{Status, Tuning};

#[derive(Parser, Debug)]
#[command(name = "tunnel-drone")]
#[command(about = "Fly headless autopilot sessions through generated corridors")]
struct Args {
    /// JSON tuning file (defaults are used when omitted)
    tuning_path: Option<PathBuf>,
    /// Corridor seed (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of runs; every run after the first starts with a reset
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Simulated seconds before a run counts as timed out
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Print the effective tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

fn run(args: &Args) -> Result<(), String> {
    let tuning = match &args.tuning_path {
        Some(path) => Tuning::load(path).map_err(|e| e.to_string())?,
        None => Tuning::default(),
    };
    if args.dump_tuning {
        println!("{}", tuning.to_json());
        return Ok(());
    }

    let world = SandboxWorld::default();
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(world, tuning, seed),
        None => Game::with_entropy(world, tuning),
    }
    .map_err(|e| e.to_string())?;

    let ticks_per_run = (args.seconds / SIM_DT).ceil() as u64;
    let mut last: Option<Status> = None;

    for n in 1..=args.runs {
        log::info!("Run {} of {}", n, args.runs);
        let mut input = TickInput {
            autopilot: true,
            down: n > 1,
            ..Default::default()
        };

        let mut finished = false;
        for _ in 0..ticks_per_run {
            let status = tick(&mut game, &input, SIM_DT_MS);
            input.down = false;
            game.world_mut().step(SIM_DT);

            if let Some(status) = status {
                if last != Some(status) {
                    let text = status.text();
                    log::info!("{} {}", text.primary, text.secondary);
                    last = Some(status);
                }
                if status.is_final() {
                    finished = true;
                    break;
                }
            }
        }

        if !finished {
            let pos = game.camera_target();
            log::warn!(
                "Run {} timed out after {}s at ({:.1}, {:.1}), score {}",
                n,
                args.seconds,
                pos.x,
                pos.y,
                game.score()
            );
        }
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tunnel Drone (headless) starting...");

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds are driven by the external harness
}
