//! Round state and core simulation types
//!
//! One `RoundState` lives for one round: it owns the live ducks, the spawn
//! timer, score and the miss counter, plus the seeded RNG every random draw
//! goes through.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::duck::{Duck, MotionParams};
use crate::consts::*;
use crate::settings::{MissPolicy, Settings};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ducks spawn, fly and can be shot
    Active,
    /// Miss counter ran out; nothing changes anymore
    Over,
}

/// Something that happened during the most recent tick
///
/// Hosts map these to sound effects, screen shake, etc.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    DuckSpawned { id: u32, pos: Vec2 },
    DuckShot { id: u32, pos: Vec2 },
    Missed { pos: Vec2 },
    /// A falling duck left the bottom of the screen
    DuckRemoved { id: u32 },
    RoundOver { score: u64 },
}

/// Numbers shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    /// Lives or ammo, depending on the miss policy
    pub lives: u32,
    pub round_over: bool,
}

/// Complete state of a round
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Play area (width, height)
    pub area: Vec2,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Points per duck
    pub hit_bonus: u64,
    pub miss_policy: MissPolicy,
    /// Simulated seconds since the round started (stops when the round ends)
    pub elapsed: f32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) score: u64,
    pub(crate) lives: u32,
    pub(crate) phase: RoundPhase,
    /// Live ducks in spawn order
    pub(crate) ducks: Vec<Duck>,
    rng: Pcg32,
    next_id: u32,
}

impl RoundState {
    /// Start a new round and put the opening ducks in the air
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            seed,
            area: settings.area(),
            spawn_interval: settings.spawn_interval,
            spawn_timer: 0.0,
            hit_bonus: settings.hit_bonus,
            miss_policy: settings.miss_policy,
            elapsed: 0.0,
            events: Vec::new(),
            score: 0,
            lives: settings.starting_lives,
            phase: RoundPhase::Active,
            ducks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        for _ in 0..settings.seed_spawns {
            state.spawn_duck();
        }

        log::info!(
            "Round started (seed {}, {} ducks, {} {})",
            seed,
            state.ducks.len(),
            state.lives,
            state.miss_policy.counter_label()
        );

        state
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a duck just off the left or right edge at a random height
    pub fn spawn_duck(&mut self) -> u32 {
        let top = SPAWN_TOP;
        let bottom = self.area.y - SPAWN_BOTTOM_MARGIN;
        let y = if bottom > top {
            self.rng.random_range(top..bottom)
        } else {
            top
        };
        let x = if self.rng.random_bool(0.5) {
            -SPAWN_EDGE_OFFSET
        } else {
            self.area.x + SPAWN_EDGE_OFFSET
        };

        let motion = MotionParams::sample(&mut self.rng);
        self.spawn_duck_with(Vec2::new(x, y), motion)
    }

    /// Spawn a duck at a fixed position with fixed motion
    pub fn spawn_duck_with(&mut self, pos: Vec2, motion: MotionParams) -> u32 {
        let id = self.next_entity_id();
        self.ducks.push(Duck::with_motion(id, pos, self.area, motion));
        self.events.push(GameEvent::DuckSpawned { id, pos });
        log::debug!("Duck {} spawned at ({:.0}, {:.0}), speed {:.0}", id, pos.x, pos.y, motion.speed);
        id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Remaining lives (or ammo)
    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    /// Live ducks in spawn order
    pub fn ducks(&self) -> &[Duck] {
        &self.ducks
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            round_over: self.is_over(),
        }
    }
}
