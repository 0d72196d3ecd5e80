//! Duck entity: flight path, shot reaction and fall
//!
//! A duck patrols horizontally while bobbing on a sine wave, bouncing back
//! whenever it drifts fully off either side of the play area. Once shot it
//! gets a small upward kick and falls under gravity until it is well below
//! the bottom edge, at which point it is marked for removal.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use crate::consts::*;

/// Lifecycle of a duck. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckState {
    /// Patrolling with sinusoidal bobbing
    Flying,
    /// Shot; falling under gravity
    Falling,
    /// Fell past the bottom margin; reaped at the end of the frame
    Removed,
}

/// Per-duck motion constants, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Signed horizontal speed (pixels/s); negative flies left
    pub speed: f32,
    /// Bobbing amplitude (pixels)
    pub amplitude: f32,
    /// Bobbing frequency (radians/s)
    pub frequency: f32,
}

impl MotionParams {
    /// Draw a random speed, direction, amplitude and frequency
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut speed = rng.random_range(DUCK_MIN_SPEED..DUCK_MAX_SPEED);
        if rng.random_bool(0.5) {
            speed = -speed;
        }
        let amplitude = rng.random_range(DUCK_MIN_AMPLITUDE..DUCK_MAX_AMPLITUDE);
        let frequency = rng.random_range(DUCK_MIN_FREQUENCY..DUCK_MAX_FREQUENCY);

        Self {
            speed,
            amplitude,
            frequency,
        }
    }
}

/// A duck entity
#[derive(Debug, Clone, PartialEq)]
pub struct Duck {
    pub id: u32,
    /// Center of the duck
    pub pos: Vec2,
    /// `x` is the patrol speed while flying; `y` is only used while falling
    pub vel: Vec2,
    /// Visual extent used for bounces and hit tests
    pub size: Vec2,
    /// Play area the duck bounces inside
    pub area: Vec2,
    /// Cosmetic spin in degrees, only advanced while falling
    pub rotation: f32,
    /// Mirror the sprite horizontally
    pub facing_left: bool,
    base_y: f32,
    elapsed: f32,
    amplitude: f32,
    frequency: f32,
    state: DuckState,
}

impl Duck {
    /// Spawn a duck with randomized motion
    pub fn spawn<R: Rng + ?Sized>(id: u32, pos: Vec2, area: Vec2, rng: &mut R) -> Self {
        Self::with_motion(id, pos, area, MotionParams::sample(rng))
    }

    /// Spawn a duck with explicit motion constants
    pub fn with_motion(id: u32, pos: Vec2, area: Vec2, motion: MotionParams) -> Self {
        debug_assert!(motion.speed != 0.0);
        debug_assert!(motion.amplitude > 0.0 && motion.frequency > 0.0);

        Self {
            id,
            pos,
            vel: Vec2::new(motion.speed, 0.0),
            size: DUCK_SIZE,
            area,
            rotation: 0.0,
            facing_left: motion.speed < 0.0,
            base_y: pos.y,
            elapsed: 0.0,
            amplitude: motion.amplitude,
            frequency: motion.frequency,
            state: DuckState::Flying,
        }
    }

    #[inline]
    pub fn state(&self) -> DuckState {
        self.state
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != DuckState::Removed
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.state == DuckState::Flying
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.state == DuckState::Falling
    }

    /// Baseline the bobbing is centered on
    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    /// Seconds spent flying (frozen once the duck is shot)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn motion(&self) -> MotionParams {
        MotionParams {
            speed: self.vel.x,
            amplitude: self.amplitude,
            frequency: self.frequency,
        }
    }

    /// Height on the flight path after `elapsed` seconds of flying
    pub fn flight_y(&self) -> f32 {
        self.base_y + self.amplitude * (self.frequency * self.elapsed).sin()
    }

    /// Current bounding box, including the spin while falling
    pub fn bounds(&self) -> Rect {
        Rect::rotated(self.pos, self.size, self.rotation)
    }

    /// Advance the duck by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        match self.state {
            DuckState::Flying => self.fly(dt),
            DuckState::Falling => self.fall(dt),
            DuckState::Removed => {}
        }
    }

    /// Knock the duck out of the sky. Returns false if it was not flying.
    pub fn shoot(&mut self) -> bool {
        if self.state != DuckState::Flying {
            return false;
        }
        self.state = DuckState::Falling;
        self.vel.y = SHOT_KICK;
        self.vel.x *= SHOT_DRAG;
        true
    }

    fn fly(&mut self, dt: f32) {
        self.elapsed += dt;
        // Height is recomputed from elapsed time, not integrated
        self.pos.x += self.vel.x * dt;
        self.pos.y = self.flight_y();

        let bounds = self.bounds();
        if bounds.max.x < 0.0 {
            // Fully off the left edge: come back in heading right
            self.pos.x = self.size.x / 2.0;
            self.vel.x = self.vel.x.abs();
            self.facing_left = false;
        } else if bounds.min.x > self.area.x {
            self.pos.x = self.area.x - self.size.x / 2.0;
            self.vel.x = -self.vel.x.abs();
            self.facing_left = true;
        }
    }

    fn fall(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt;
        self.rotation = (self.rotation + FALL_SPIN * dt) % 360.0;

        if self.pos.y > self.area.y + OFFSCREEN_MARGIN {
            self.state = DuckState::Removed;
        }
    }
}
