/// How a geometry's vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    LineList,
    TriangleList,
}

/// Positions plus optional indices, ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub indices: Option<Vec<u32>>,
    pub topology: Topology,
}

impl Geometry {
    /// A single segment between two points.
    pub fn line(from: [f32; 3], to: [f32; 3]) -> Self {
        Self {
            positions: vec![from, to],
            indices: None,
            topology: Topology::LineList,
        }
    }

    pub fn indexed_triangles(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
            topology: Topology::TriangleList,
        }
    }

    /// Number of elements a draw call consumes: indices if present, else vertices.
    pub fn element_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.positions.len() as u32,
        }
    }
}

/// Identifies one of the scene's drawables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableId {
    XAxisLine,
    YAxisLine,
    ZAxisLine,
    Cube,
}

impl DrawableId {
    /// Creation order.
    pub const ALL: [DrawableId; 4] = [
        DrawableId::XAxisLine,
        DrawableId::YAxisLine,
        DrawableId::ZAxisLine,
        DrawableId::Cube,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DrawableId::XAxisLine => "x_axis_line",
            DrawableId::YAxisLine => "y_axis_line",
            DrawableId::ZAxisLine => "z_axis_line",
            DrawableId::Cube => "cube",
        }
    }
}

/// Axis lines run from -3 to 3 along their axis.
pub const AXIS_HALF_LENGTH: f32 = 3.0;

/// Everything the viewer draws, one named field per drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub x_axis_line: Geometry,
    pub y_axis_line: Geometry,
    pub z_axis_line: Geometry,
    pub cube: Geometry,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let h = AXIS_HALF_LENGTH;
        Self {
            x_axis_line: Geometry::line([-h, 0.0, 0.0], [h, 0.0, 0.0]),
            y_axis_line: Geometry::line([0.0, -h, 0.0], [0.0, h, 0.0]),
            z_axis_line: Geometry::line([0.0, 0.0, -h], [0.0, 0.0, h]),
            cube: unit_cube(),
        }
    }

    pub fn get(&self, id: DrawableId) -> &Geometry {
        match id {
            DrawableId::XAxisLine => &self.x_axis_line,
            DrawableId::YAxisLine => &self.y_axis_line,
            DrawableId::ZAxisLine => &self.z_axis_line,
            DrawableId::Cube => &self.cube,
        }
    }

    /// Drawables in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Geometry)> + '_ {
        DrawableId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// Unit cube spanning [0, 1] on every axis, 8 shared corners.
fn unit_cube() -> Geometry {
    #[rustfmt::skip]
    let positions = vec![
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  0, 2, 3, // top
        1, 0, 4,  5, 1, 4, // front
        2, 1, 5,  2, 5, 6, // right
        3, 2, 7,  2, 6, 7, // back
        5, 4, 6,  6, 4, 7, // bottom
        0, 3, 4,  4, 3, 7, // left
    ];
    Geometry::indexed_triangles(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_lines_span_their_axis() {
        let scene = Scene::new();
        assert_eq!(
            scene.x_axis_line.positions,
            vec![[-3.0, 0.0, 0.0], [3.0, 0.0, 0.0]]
        );
        assert_eq!(
            scene.y_axis_line.positions,
            vec![[0.0, -3.0, 0.0], [0.0, 3.0, 0.0]]
        );
        assert_eq!(
            scene.z_axis_line.positions,
            vec![[0.0, 0.0, -3.0], [0.0, 0.0, 3.0]]
        );
        for line in [&scene.x_axis_line, &scene.y_axis_line, &scene.z_axis_line] {
            assert_eq!(line.topology, Topology::LineList);
            assert_eq!(line.element_count(), 2);
        }
    }

    #[test]
    fn cube_is_indexed_and_in_range() {
        let cube = Scene::new().cube;
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.element_count(), 36);
        assert_eq!(cube.topology, Topology::TriangleList);
        let indices = cube.indices.as_ref().unwrap();
        assert!(indices.iter().all(|&i| (i as usize) < cube.positions.len()));
        for corner in &cube.positions {
            assert!(corner.iter().all(|&c| c == 0.0 || c == 1.0));
        }
    }

    #[test]
    fn iter_follows_creation_order() {
        let scene = Scene::new();
        let ids: Vec<DrawableId> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, DrawableId::ALL.to_vec());
        assert!(std::ptr::eq(scene.get(DrawableId::Cube), &scene.cube));
    }
}
