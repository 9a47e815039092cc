use cubeview_render::{DrawableId, Geometry, Scene, Topology};
use wgpu::util::DeviceExt;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Position-only vertex layout shared by every drawable.
pub(crate) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

pub(crate) fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::LineList => wgpu::PrimitiveTopology::LineList,
        Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
    }
}

/// Vertex buffer, optional index buffer and the count a draw consumes.
pub struct GpuDrawable {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    element_count: u32,
}

impl GpuDrawable {
    pub fn upload(device: &wgpu::Device, label: &str, geometry: &Geometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&geometry.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = geometry.indices.as_ref().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}_index_buffer")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            element_count: geometry.element_count(),
        }
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.element_count, 0, 0..1);
            }
            None => pass.draw(0..self.element_count, 0..1),
        }
    }
}

/// GPU copies of the scene's drawables, released together on drop.
pub struct GpuScene {
    pub x_axis_line: GpuDrawable,
    pub y_axis_line: GpuDrawable,
    pub z_axis_line: GpuDrawable,
    pub cube: GpuDrawable,
}

impl GpuScene {
    pub fn upload(device: &wgpu::Device, scene: &Scene) -> Self {
        let upload = |id: DrawableId| GpuDrawable::upload(device, id.label(), scene.get(id));
        Self {
            x_axis_line: upload(DrawableId::XAxisLine),
            y_axis_line: upload(DrawableId::YAxisLine),
            z_axis_line: upload(DrawableId::ZAxisLine),
            cube: upload(DrawableId::Cube),
        }
    }

    pub fn get(&self, id: DrawableId) -> &GpuDrawable {
        match id {
            DrawableId::XAxisLine => &self.x_axis_line,
            DrawableId::YAxisLine => &self.y_axis_line,
            DrawableId::ZAxisLine => &self.z_axis_line,
            DrawableId::Cube => &self.cube,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_stride_is_three_floats() {
        let layout = vertex_layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn topology_mapping() {
        assert_eq!(
            primitive_topology(Topology::LineList),
            wgpu::PrimitiveTopology::LineList
        );
        assert_eq!(
            primitive_topology(Topology::TriangleList),
            wgpu::PrimitiveTopology::TriangleList
        );
    }
}
