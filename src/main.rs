//! Duck Shoot entry point
//!
//! Headless native host: runs one round at a fixed frame rate with a scripted
//! shooter standing in for the mouse, and logs what happens.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use duck_shoot::platform::{PointerEdge, RawInput};
use duck_shoot::renderer::{FrameSnapshot, RenderSurface};
use duck_shoot::sim::{GameEvent, RoundState, tick};
use duck_shoot::{MissPolicy, Settings};

#[derive(Debug, Parser)]
#[command(name = "duck-shoot", about = "Play a headless round of Duck Shoot")]
struct Args {
    /// Settings JSON (defaults are used for missing fields)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Override the miss policy from the settings file (lives or ammo)
    #[arg(long, value_parser = parse_policy)]
    policy: Option<MissPolicy>,
    /// Chance that the scripted shooter aims at a duck instead of empty sky
    #[arg(long, default_value_t = 0.7)]
    accuracy: f64,
    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,
}

fn parse_policy(s: &str) -> Result<MissPolicy, String> {
    MissPolicy::from_str(s).ok_or_else(|| {
        format!(
            "unknown policy '{}' (expected {} or {})",
            s,
            MissPolicy::LivesOnMiss.as_str(),
            MissPolicy::AmmoPerClick.as_str()
        )
    })
}

/// Frames a synthetic press is held down
const PRESS_FRAMES: u32 = 4;
/// Pause between synthetic presses (seconds)
const SHOT_COOLDOWN: f32 = 0.6;

/// Scripted stand-in for the mouse
struct Shooter {
    rng: Pcg32,
    accuracy: f64,
    cooldown: f32,
    held: u32,
    aim: Vec2,
}

impl Shooter {
    fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5EED_D0C5),
            accuracy: accuracy.clamp(0.0, 1.0),
            cooldown: SHOT_COOLDOWN,
            held: 0,
            aim: Vec2::ZERO,
        }
    }

    /// Sample the "mouse" for this frame
    fn sample(&mut self, state: &RoundState, dt: f32) -> RawInput {
        if self.held > 0 {
            self.held -= 1;
            return RawInput {
                pointer: self.aim,
                primary_down: true,
                ..Default::default()
            };
        }

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return RawInput {
                pointer: self.aim,
                ..Default::default()
            };
        }
        self.cooldown = SHOT_COOLDOWN;

        let target = state.ducks().iter().find(|d| d.is_flying()).map(|d| d.pos);
        self.aim = match target {
            Some(pos) if self.rng.random_bool(self.accuracy) => pos,
            // Aim at the grass, where no flying duck ever is
            _ => Vec2::new(
                self.rng.random_range(0.0..state.area.x),
                state.area.y - 10.0,
            ),
        };
        self.held = PRESS_FRAMES - 1;

        RawInput {
            pointer: self.aim,
            primary_down: true,
            ..Default::default()
        }
    }
}

/// Render surface that only logs
#[derive(Default)]
struct LogSurface {
    frames: u64,
}

impl RenderSurface for LogSurface {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(frame) {
                Ok(json) => log::trace!("frame {}: {}", self.frames, json),
                Err(e) => log::warn!("Failed to encode frame {}: {}", self.frames, e),
            }
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::DuckSpawned { id, pos } => {
            log::debug!("spawn  duck {} at ({:.0}, {:.0})", id, pos.x, pos.y)
        }
        GameEvent::DuckShot { id, pos } => {
            log::info!("hit    duck {} at ({:.0}, {:.0})", id, pos.x, pos.y)
        }
        GameEvent::Missed { pos } => log::info!("miss   at ({:.0}, {:.0})", pos.x, pos.y),
        GameEvent::DuckRemoved { id } => log::debug!("gone   duck {}", id),
        GameEvent::RoundOver { score } => log::info!("round over with {} points", score),
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(policy) = args.policy {
        settings.miss_policy = policy;
    }
    settings.validate().context("settings rejected")?;
    Ok(settings)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.seconds > 0.0) {
        return Err(anyhow!("--seconds must be > 0"));
    }

    let settings = load_settings(&args)?;

    if let Some(path) = &args.write_settings {
        settings
            .save(path)
            .with_context(|| format!("failed writing settings to {}", path.display()))?;
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Duck Shoot (native) starting with seed {}", seed);

    let mut state = RoundState::new(seed, &settings);
    for event in &state.events {
        log_event(event);
    }
    let mut shooter = Shooter::new(seed, args.accuracy);
    let mut edge = PointerEdge::new();
    let mut surface = LogSurface::default();

    let dt = settings.frame_dt();
    let max_frames = (args.seconds * settings.frame_rate as f32).ceil() as u64;
    let mut frame: u64 = 0;

    loop {
        let mut raw = shooter.sample(&state, dt);
        raw.window_closed = frame >= max_frames;

        let input = edge.tick_input(&raw);
        if input.close_requested {
            log::info!("Close requested after {} frames", frame);
            break;
        }

        tick(&mut state, &input, dt);
        for event in &state.events {
            log_event(event);
        }
        surface.present(&FrameSnapshot::capture(&state));
        frame += 1;

        if state.is_over() {
            break;
        }
    }

    let hud = state.hud();
    println!(
        "Score: {}  {}: {}  ({:.1}s simulated, {} frames drawn{})",
        hud.score,
        settings.miss_policy.counter_label(),
        hud.lives,
        state.elapsed,
        surface.frames,
        if hud.round_over { ", game over" } else { "" }
    );

    Ok(())
}
