//! Platform abstraction layer
//!
//! Turns raw per-frame device samples into simulation input:
//! - Pointer press edges (one click per press, not per held frame)
//! - Close requests (window close, Escape)

pub mod input;

pub use input::{PointerEdge, RawInput};
