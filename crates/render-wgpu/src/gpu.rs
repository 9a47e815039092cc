use crate::drawable::GpuScene;
use crate::shader::{ShaderError, ShaderPaths, ShaderPrograms};
use cubeview_render::{FramePlan, Scene};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// wgpu-based viewer renderer.
///
/// Owns every GPU resource of the viewer: the four shader programs, the
/// uploaded scene and the depth buffer. All of it is released on drop.
pub struct WgpuRenderer {
    programs: ShaderPrograms,
    drawables: GpuScene,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    /// Load shaders through `shader_paths`, compile programs and upload `scene`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        shader_paths: &ShaderPaths,
        scene: &Scene,
    ) -> Result<Self, ShaderError> {
        let programs = ShaderPrograms::load(device, surface_format, shader_paths)?;
        let drawables = GpuScene::upload(device, scene);
        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            shader_dir = %shader_paths.dir().display(),
            cube_elements = drawables.cube.element_count(),
            "renderer ready"
        );

        Ok(Self {
            programs,
            drawables,
            depth_texture,
            surface_format,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: clear, then each draw of the plan in order.
    ///
    /// Every program owns its uniform block, so a plan must not use one
    /// program for two draws.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        plan: &FramePlan,
    ) {
        for draw in &plan.draws {
            self.programs
                .get(draw.program)
                .upload_all(queue, &draw.uniforms);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = plan.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for draw in &plan.draws {
                self.programs.get(draw.program).use_program(&mut pass);
                self.drawables.get(draw.drawable).draw(&mut pass);
            }
            // Ending the pass unbinds the last program.
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
