//! Duck Shoot - a pointer-driven duck shooting arcade game
//!
//! Core modules:
//! - `sim`: Simulation (duck motion, hit resolution, round state)
//! - `renderer`: Read-only frame snapshots handed to a drawing backend
//! - `platform`: Input edge detection between the host and the simulation
//! - `settings`: Data-driven round configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{MissPolicy, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default play area
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Visual extent of a duck (placeholder size, texture is scaled to match)
    pub const DUCK_SIZE: Vec2 = Vec2::new(42.0, 32.0);

    /// Horizontal speed range while flying (pixels/s, sign picked separately)
    pub const DUCK_MIN_SPEED: f32 = 80.0;
    pub const DUCK_MAX_SPEED: f32 = 160.0;
    /// Vertical bobbing amplitude range (pixels)
    pub const DUCK_MIN_AMPLITUDE: f32 = 10.0;
    pub const DUCK_MAX_AMPLITUDE: f32 = 40.0;
    /// Vertical bobbing frequency range (radians/s)
    pub const DUCK_MIN_FREQUENCY: f32 = 1.0;
    pub const DUCK_MAX_FREQUENCY: f32 = 3.0;

    /// Upward kick applied when a duck is shot (negative = up)
    pub const SHOT_KICK: f32 = -200.0;
    /// Horizontal speed multiplier applied when a duck is shot
    pub const SHOT_DRAG: f32 = 0.25;
    /// Gravity while falling (pixels/s², down is positive)
    pub const GRAVITY: f32 = 800.0;
    /// Cosmetic spin while falling (degrees/s)
    pub const FALL_SPIN: f32 = 200.0;
    /// How far below the play area a falling duck travels before removal
    pub const OFFSCREEN_MARGIN: f32 = 64.0;

    /// Ducks enter this far outside the left/right edge
    pub const SPAWN_EDGE_OFFSET: f32 = 60.0;
    /// Spawn band: top margin and distance kept from the bottom edge
    pub const SPAWN_TOP: f32 = 80.0;
    pub const SPAWN_BOTTOM_MARGIN: f32 = 200.0;

    /// Height of the grass strip drawn at the bottom of the scene
    pub const GRASS_HEIGHT: f32 = 120.0;
}
