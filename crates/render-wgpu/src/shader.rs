use crate::drawable;
use bytemuck::{Pod, Zeroable};
use cubeview_render::{MatrixUniforms, ProgramId, UniformSlot};
use glam::Mat4;
use std::path::{Path, PathBuf};
use wgpu::util::DeviceExt;

/// Vertex stage shared by every program.
pub const VERTEX_SHADER_FILE: &str = "object.vert.wgsl";

/// Fragment stage file for each program.
pub fn fragment_shader_file(program: ProgramId) -> &'static str {
    match program {
        ProgramId::XAxis => "red.frag.wgsl",
        ProgramId::YAxis => "green.frag.wgsl",
        ProgramId::ZAxis => "blue.frag.wgsl",
        ProgramId::Object => "object.frag.wgsl",
    }
}

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

/// Errors from loading or compiling a shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader {label} has no `{entry_point}` entry point")]
    MissingEntryPoint {
        label: String,
        entry_point: &'static str,
    },
    #[error("shader {label} failed to compile: {message}")]
    Compile { label: String, message: String },
}

/// WGSL text of one vertex/fragment pair.
///
/// The fragment file may use types declared by the vertex file; both are
/// compiled as a single module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub label: String,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn from_files(
        label: impl Into<String>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let source = Self {
            label: label.into(),
            vertex: read_shader(vertex_path.as_ref())?,
            fragment: read_shader(fragment_path.as_ref())?,
        };
        source.check_entry_points()?;
        Ok(source)
    }

    /// Vertex then fragment, as one WGSL module.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.vertex, self.fragment)
    }

    fn check_entry_points(&self) -> Result<(), ShaderError> {
        let stages = [(&self.vertex, VERTEX_ENTRY), (&self.fragment, FRAGMENT_ENTRY)];
        for (text, entry_point) in stages {
            if !text.contains(&format!("fn {entry_point}")) {
                return Err(ShaderError::MissingEntryPoint {
                    label: self.label.clone(),
                    entry_point,
                });
            }
        }
        Ok(())
    }
}

fn read_shader(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the fixed shader file names against a directory.
#[derive(Debug, Clone)]
pub struct ShaderPaths {
    dir: PathBuf,
}

impl ShaderPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn vertex(&self) -> PathBuf {
        self.dir.join(VERTEX_SHADER_FILE)
    }

    pub fn fragment(&self, program: ProgramId) -> PathBuf {
        self.dir.join(fragment_shader_file(program))
    }

    pub fn load(&self, program: ProgramId) -> Result<ShaderSource, ShaderError> {
        tracing::debug!(
            program = program.label(),
            vertex = %self.vertex().display(),
            fragment = %self.fragment(program).display(),
            "loading shader"
        );
        ShaderSource::from_files(program.label(), self.vertex(), self.fragment(program))
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GpuUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl From<&MatrixUniforms> for GpuUniforms {
    fn from(u: &MatrixUniforms) -> Self {
        Self {
            model: u.model.to_cols_array_2d(),
            view: u.view.to_cols_array_2d(),
            projection: u.projection.to_cols_array_2d(),
        }
    }
}

/// Bind group and pipeline layouts shared by all programs.
pub struct ProgramLayout {
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
}

impl ProgramLayout {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(UniformSlot::BLOCK_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        Self {
            bind_group_layout,
            pipeline_layout,
        }
    }
}

/// A compiled pipeline plus its own model/view/projection uniform block.
pub struct ShaderProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShaderProgram {
    pub fn new(
        device: &wgpu::Device,
        layout: &ProgramLayout,
        source: &ShaderSource,
        program: ProgramId,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&source.label),
            source: wgpu::ShaderSource::Wgsl(source.combined().into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&source.label),
            layout: Some(&layout.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[drawable::vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: drawable::primitive_topology(program.topology()),
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: crate::gpu::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Compile {
                label: source.label.clone(),
                message: err.to_string(),
            });
        }

        let identity = MatrixUniforms {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{}_uniforms", source.label)),
            contents: bytemuck::bytes_of(&GpuUniforms::from(&identity)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{}_bind_group", source.label)),
            layout: &layout.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            label: source.label.clone(),
            pipeline,
            uniform_buffer,
            bind_group,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Byte offset of a matrix inside this program's uniform buffer.
    pub fn location_of(&self, slot: UniformSlot) -> wgpu::BufferAddress {
        slot.offset()
    }

    pub fn upload(&self, queue: &wgpu::Queue, slot: UniformSlot, matrix: &Mat4) {
        queue.write_buffer(
            &self.uniform_buffer,
            self.location_of(slot),
            bytemuck::cast_slice(&matrix.to_cols_array()),
        );
    }

    pub fn upload_all(&self, queue: &wgpu::Queue, uniforms: &MatrixUniforms) {
        for slot in UniformSlot::ALL {
            self.upload(queue, slot, &uniforms.get(slot));
        }
    }

    /// Make this program current for subsequent draws in the pass.
    pub fn use_program(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
    }
}

/// The four programs, one named field each.
pub struct ShaderPrograms {
    pub x_axis: ShaderProgram,
    pub y_axis: ShaderProgram,
    pub z_axis: ShaderProgram,
    pub object: ShaderProgram,
}

impl ShaderPrograms {
    pub fn load(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        paths: &ShaderPaths,
    ) -> Result<Self, ShaderError> {
        let layout = ProgramLayout::new(device);
        let build = |program: ProgramId| -> Result<ShaderProgram, ShaderError> {
            let source = paths.load(program)?;
            ShaderProgram::new(device, &layout, &source, program, surface_format)
        };

        Ok(Self {
            x_axis: build(ProgramId::XAxis)?,
            y_axis: build(ProgramId::YAxis)?,
            z_axis: build(ProgramId::ZAxis)?,
            object: build(ProgramId::Object)?,
        })
    }

    pub fn get(&self, program: ProgramId) -> &ShaderProgram {
        match program {
            ProgramId::XAxis => &self.x_axis,
            ProgramId::YAxis => &self.y_axis,
            ProgramId::ZAxis => &self.z_axis,
            ProgramId::Object => &self.object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VERT: &str = "@vertex\nfn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }\n";
    const FRAG: &str = "@fragment\nfn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }\n";

    fn write_pair(dir: &Path, vert: &str, frag: &str) -> (PathBuf, PathBuf) {
        let v = dir.join("test.vert.wgsl");
        let f = dir.join("test.frag.wgsl");
        fs::write(&v, vert).unwrap();
        fs::write(&f, frag).unwrap();
        (v, f)
    }

    #[test]
    fn loads_and_combines_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (v, f) = write_pair(dir.path(), VERT, FRAG);
        let source = ShaderSource::from_files("test", &v, &f).unwrap();
        assert_eq!(source.label, "test");
        assert_eq!(source.combined(), format!("{VERT}\n{FRAG}"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let (v, _) = write_pair(dir.path(), VERT, FRAG);
        let missing = dir.path().join("nope.frag.wgsl");
        let err = ShaderSource::from_files("test", &v, &missing).unwrap_err();
        assert!(matches!(err, ShaderError::Io { ref path, .. } if path == &missing));
        assert!(err.to_string().contains("nope.frag.wgsl"));
    }

    #[test]
    fn missing_entry_point_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (v, f) = write_pair(dir.path(), VERT, "// empty fragment\n");
        let err = ShaderSource::from_files("broken", &v, &f).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingEntryPoint {
                entry_point: "fs_main",
                ..
            }
        ));
    }

    #[test]
    fn paths_resolve_fixed_file_names() {
        let paths = ShaderPaths::new("/tmp/shaders");
        assert_eq!(paths.vertex(), Path::new("/tmp/shaders/object.vert.wgsl"));
        assert_eq!(
            paths.fragment(ProgramId::XAxis),
            Path::new("/tmp/shaders/red.frag.wgsl")
        );
        assert_eq!(
            paths.fragment(ProgramId::YAxis),
            Path::new("/tmp/shaders/green.frag.wgsl")
        );
        assert_eq!(
            paths.fragment(ProgramId::ZAxis),
            Path::new("/tmp/shaders/blue.frag.wgsl")
        );
        assert_eq!(
            paths.fragment(ProgramId::Object),
            Path::new("/tmp/shaders/object.frag.wgsl")
        );
    }

    #[test]
    fn bundled_shaders_load() {
        let paths = ShaderPaths::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../shaders"));
        for program in ProgramId::ALL {
            let source = paths.load(program).unwrap();
            assert!(source.combined().contains("struct Uniforms"));
        }
    }

    #[test]
    fn gpu_uniforms_match_block_layout() {
        assert_eq!(
            std::mem::size_of::<GpuUniforms>() as u64,
            UniformSlot::BLOCK_SIZE
        );
    }
}
