use glam::Mat4;

/// Size in bytes of one column-major 4x4 f32 matrix.
const MAT4_SIZE: u64 = 64;

/// A matrix uniform inside a program's uniform block.
///
/// The block is laid out as `model`, `view`, `projection`, each a `mat4x4<f32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    Model,
    View,
    Projection,
}

impl UniformSlot {
    pub const ALL: [UniformSlot; 3] = [
        UniformSlot::Model,
        UniformSlot::View,
        UniformSlot::Projection,
    ];

    /// Byte size of the whole block.
    pub const BLOCK_SIZE: u64 = MAT4_SIZE * 3;

    /// Byte offset of this matrix inside the block.
    pub fn offset(self) -> u64 {
        match self {
            UniformSlot::Model => 0,
            UniformSlot::View => MAT4_SIZE,
            UniformSlot::Projection => MAT4_SIZE * 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UniformSlot::Model => "model",
            UniformSlot::View => "view",
            UniformSlot::Projection => "projection",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

/// The three matrices a draw call uploads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl MatrixUniforms {
    pub fn get(&self, slot: UniformSlot) -> Mat4 {
        match slot {
            UniformSlot::Model => self.model,
            UniformSlot::View => self.view,
            UniformSlot::Projection => self.projection,
        }
    }
}
