//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Seeded RNG only, owned by the round
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod duck;
pub mod rect;
pub mod state;
pub mod tick;

pub use duck::{Duck, DuckState, MotionParams};
pub use rect::Rect;
pub use state::{GameEvent, Hud, RoundPhase, RoundState};
pub use tick::{ClickOutcome, TickInput, advance, resolve_click, tick};
