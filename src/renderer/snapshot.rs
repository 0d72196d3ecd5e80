//! Per-frame render snapshots
//!
//! Snapshots are plain values copied out of the round so a renderer never
//! holds on to a duck between frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRASS_HEIGHT;
use crate::sim::{Duck, Hud, RoundState};

/// Sprite transform for one duck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuckSprite {
    pub id: u32,
    /// Sprite center
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation in degrees, clockwise
    pub rotation: f32,
    /// Mirror horizontally (duck heading left)
    pub flip_x: bool,
    pub falling: bool,
}

impl From<&Duck> for DuckSprite {
    fn from(duck: &Duck) -> Self {
        Self {
            id: duck.id,
            pos: duck.pos,
            size: duck.size,
            rotation: duck.rotation,
            flip_x: duck.facing_left,
            falling: duck.is_falling(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Play area (width, height)
    pub area: Vec2,
    /// Top of the grass strip; sky above it
    pub grass_top: f32,
    /// Ducks in spawn order (drawn back to front)
    pub ducks: Vec<DuckSprite>,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(state: &RoundState) -> Self {
        Self {
            area: state.area,
            grass_top: (state.area.y - GRASS_HEIGHT).max(0.0),
            ducks: state
                .ducks()
                .iter()
                .filter(|d| d.is_alive())
                .map(DuckSprite::from)
                .collect(),
            hud: state.hud(),
        }
    }
}

/// A drawing backend
pub trait RenderSurface {
    fn present(&mut self, frame: &FrameSnapshot);
}
