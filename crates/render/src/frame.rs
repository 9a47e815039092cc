use crate::scene::{DrawableId, Topology};
use crate::uniforms::MatrixUniforms;
use glam::{Mat4, Vec3};

/// Framebuffer clear colour (mid grey).
pub const CLEAR_COLOR: [f64; 4] = [0.5, 0.5, 0.5, 1.0];

/// Identifies one of the four shader programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramId {
    /// Solid red, used for the X axis.
    XAxis,
    /// Solid green, used for the Y axis.
    YAxis,
    /// Solid blue, used for the Z axis.
    ZAxis,
    /// Position-coloured, used for the cube.
    Object,
}

impl ProgramId {
    pub const ALL: [ProgramId; 4] = [
        ProgramId::XAxis,
        ProgramId::YAxis,
        ProgramId::ZAxis,
        ProgramId::Object,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProgramId::XAxis => "x_axis",
            ProgramId::YAxis => "y_axis",
            ProgramId::ZAxis => "z_axis",
            ProgramId::Object => "object",
        }
    }

    /// Primitive assembly of the drawable this program is paired with.
    pub fn topology(self) -> Topology {
        match self {
            ProgramId::XAxis | ProgramId::YAxis | ProgramId::ZAxis => Topology::LineList,
            ProgramId::Object => Topology::TriangleList,
        }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Right-handed perspective with depth in [0, 1] for the given buffer size.
    pub fn matrix(&self, buffer_width: u32, buffer_height: u32) -> Mat4 {
        let aspect = buffer_width.max(1) as f32 / buffer_height.max(1) as f32;
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Cube placement: translated by (1, 0, 1), unit scale.
pub fn cube_model_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::new(1.0, 0.0, 1.0)) * Mat4::from_scale(Vec3::ONE)
}

/// One draw: bind `program`, upload `uniforms`, draw `drawable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub program: ProgramId,
    pub drawable: DrawableId,
    pub uniforms: MatrixUniforms,
}

/// Everything a backend needs to produce one frame, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: [f64; 4],
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    /// Axis lines first, each with its own colour program, then the cube.
    pub fn build(view: Mat4, projection: Mat4) -> Self {
        let axis = |program, drawable| DrawCall {
            program,
            drawable,
            uniforms: MatrixUniforms {
                model: Mat4::IDENTITY,
                view,
                projection,
            },
        };

        let draws = vec![
            axis(ProgramId::XAxis, DrawableId::XAxisLine),
            axis(ProgramId::YAxis, DrawableId::YAxisLine),
            axis(ProgramId::ZAxis, DrawableId::ZAxisLine),
            DrawCall {
                program: ProgramId::Object,
                drawable: DrawableId::Cube,
                uniforms: MatrixUniforms {
                    model: cube_model_matrix(),
                    view,
                    projection,
                },
            },
        ];

        Self {
            clear_color: CLEAR_COLOR,
            draws,
        }
    }
}
