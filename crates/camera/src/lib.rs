//! Free-fly camera driving the viewer.
//!
//! Orientation is stored as yaw/pitch in degrees; the front/right/up basis is
//! derived from them and never set on its own.
//!
//! # Invariants
//! - Basis vectors are unit length and mutually orthogonal after every update.
//! - Pitch stays strictly inside (-89°, 89°).
//! - `view_matrix` is a pure function of the current state.

mod camera;

pub use camera::{CameraSettings, FlyCamera};
