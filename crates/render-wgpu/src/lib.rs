//! wgpu render backend for the viewer.
//!
//! Compiles the four WGSL programs from disk, uploads the scene once and
//! executes a [`cubeview_render::FramePlan`] per frame.
//!
//! # Invariants
//! - Each program owns its uniform block; uniforms are written before the pass.
//! - Shader load or compile failure is reported at construction, never per frame.

mod drawable;
mod gpu;
mod shader;

pub use drawable::{GpuDrawable, GpuScene};
pub use gpu::WgpuRenderer;
pub use shader::{
    ProgramLayout, ShaderError, ShaderPaths, ShaderProgram, ShaderPrograms, ShaderSource,
    VERTEX_SHADER_FILE, fragment_shader_file,
};
