//! Renderer-agnostic description of what the viewer draws.
//!
//! # Invariants
//! - The scene is built once and never mutated.
//! - A frame plan lists draws in a fixed order: X, Y, Z axis lines, then the cube.
//! - Backends execute a plan; they never decide what to draw.

mod frame;
mod renderer;
mod scene;
mod uniforms;

pub use frame::{CLEAR_COLOR, DrawCall, FramePlan, ProgramId, Projection, cube_model_matrix};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{AXIS_HALF_LENGTH, DrawableId, Geometry, Scene, Topology};
pub use uniforms::{MatrixUniforms, UniformSlot};
