//! Rendering boundary
//!
//! The simulation never draws. Each frame the host captures a
//! [`FrameSnapshot`] and hands it to whatever backend implements
//! [`RenderSurface`].

pub mod snapshot;

pub use snapshot::{DuckSprite, FrameSnapshot, RenderSurface};
