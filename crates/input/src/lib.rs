//! Polled input state for the viewer.
//!
//! The window layer pushes raw key and mouse-motion events in; the frame
//! driver pulls one [`InputSample`] out per frame.
//!
//! # Invariants
//! - Cursor deltas are consumed exactly once: `take_sample` resets them.
//! - Nothing here can fail; unset values read as zero or empty.

pub mod keys;
pub mod state;

pub use keys::{HeldKeys, MoveKey};
pub use state::{InputSample, InputState};
