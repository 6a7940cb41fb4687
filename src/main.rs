//! Skater Run headless runner
//!
//! Plays seeded runs at a fixed frame rate with the autopilot on the action
//! button and prints a JSON summary to stdout.
//!
//! ```text
//! skater-run [--seed N] [--frames N] [--fps N] [--tuning PATH] [--runs N]
//! ```

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use skater_run::SkaterError;
use skater_run::sim::{GameEvent, GameOverCause, GamePhase, GameSession, autopilot};

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "skater-run")]
#[command(about = "Play seeded Skater Run games with the autopilot", long_about = None)]
struct Cli {
    /// Seed for track generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Frame budget across all runs
    #[arg(long, default_value_t = 60 * 60 * 10)]
    frames: u64,
    /// Presented frames per second
    #[arg(long, default_value_t = 60.0, value_parser = parse_fps)]
    fps: f64,
    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Stop after this many finished runs
    #[arg(long, default_value_t = 1)]
    runs: u32,
}

fn parse_fps(value: &str) -> Result<f64, String> {
    let fps: f64 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("frame rate must be above zero, got {fps}"))
    }
}

/// One run as seen by the runner
#[derive(Debug, Clone, Default, Serialize)]
struct RunRecord {
    score: u64,
    /// `None` when the frame budget ran out mid-run
    cause: Option<GameOverCause>,
    frames: u64,
    jumps: u32,
    gems: u32,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    fps: f64,
    frames_simulated: u64,
    best_score: u64,
    runs: Vec<RunRecord>,
}

fn play<R: rand::Rng>(session: &mut GameSession<R>, opts: &Cli) -> RunSummary {
    let mut records = Vec::new();
    let mut current: Option<RunRecord> = None;
    let mut frame = 0;

    while frame < opts.frames {
        if session.phase() == GamePhase::Menu {
            if records.len() >= opts.runs as usize {
                break;
            }
            session.on_action_triggered();
            current = Some(RunRecord::default());
        } else if autopilot::wants_jump(session) {
            session.on_action_triggered();
        }

        let events = session.on_frame(frame as f64 / opts.fps);
        frame += 1;

        let Some(record) = current.as_mut() else {
            continue;
        };
        record.frames += 1;
        for event in events {
            match event {
                GameEvent::Jumped => record.jumps += 1,
                GameEvent::GemCollected { .. } => record.gems += 1,
                GameEvent::GameOver {
                    cause, final_score, ..
                } => {
                    record.cause = Some(cause);
                    record.score = final_score;
                }
                _ => {}
            }
        }
        if record.cause.is_some() {
            records.extend(current.take());
        }
    }

    if let Some(mut unfinished) = current {
        unfinished.score = session.score();
        log::info!("Frame budget spent mid-run at score {}", unfinished.score);
        records.push(unfinished);
    }

    RunSummary {
        seed: opts.seed,
        fps: opts.fps,
        frames_simulated: frame,
        best_score: session.best_score().max(session.score()),
        runs: records,
    }
}

fn run(opts: &Cli) -> Result<RunSummary, SkaterError> {
    let tuning = match &opts.tuning {
        Some(path) => skater_run::Tuning::load(path)?,
        None => skater_run::Tuning::default(),
    };
    let rng = <rand_pcg::Pcg32 as rand::SeedableRng>::seed_from_u64(opts.seed);
    let mut session = GameSession::with_tuning(tuning, rng)?;

    log::info!(
        "Playing up to {} runs over {} frames at {} fps (seed {})",
        opts.runs,
        opts.frames,
        opts.fps,
        opts.seed
    );
    Ok(play(&mut session, opts))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Skater Run (headless) starting...");

    let cli = Cli::parse();
    let summary = match run(&cli) {
        Ok(summary) => summary,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Could not serialize summary: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is embedded by a host; there is no headless runner on wasm
}
