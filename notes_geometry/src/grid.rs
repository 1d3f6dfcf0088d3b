use bytemuck::{Pod, Zeroable};

use crate::error::GeometryError;

/// A vertex of a flat terrain grid. Laid out to be uploaded as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

pub struct Grid {
    pub vertices: Vec<GridVertex>,
    pub indices: Vec<u32>,
}

/// Builds a `rows x cols` grid of vertices centred on the origin in the XZ plane.
///
/// Rows run from +Z (row 0) towards -Z and columns from -X towards +X. The texture is stretched
/// over the whole grid and every cell becomes two triangles.
pub fn create_grid(width: f32, depth: f32, rows: u32, cols: u32) -> Result<Grid, GeometryError> {
    if rows < 2 || cols < 2 {
        return Err(GeometryError::DegenerateGrid { rows, cols });
    }

    let half_width = 0.5 * width;
    let half_depth = 0.5 * depth;

    let dx = width / (cols - 1) as f32;
    let dz = depth / (rows - 1) as f32;

    let du = 1.0 / (cols - 1) as f32;
    let dv = 1.0 / (rows - 1) as f32;

    let mut vertices = Vec::with_capacity((rows * cols) as usize);
    for i in 0..rows {
        let z = half_depth - i as f32 * dz;
        for j in 0..cols {
            let x = -half_width + j as f32 * dx;
            vertices.push(GridVertex {
                position: [x, 0.0, z],
                normal: [0.0, 1.0, 0.0],
                uv: [j as f32 * du, i as f32 * dv],
            });
        }
    }

    let mut indices = Vec::with_capacity(((rows - 1) * (cols - 1) * 6) as usize);
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            indices.extend_from_slice(&[
                i * cols + j,
                i * cols + j + 1,
                (i + 1) * cols + j,

                (i + 1) * cols + j,
                i * cols + j + 1,
                (i + 1) * cols + j + 1,
            ]);
        }
    }

    Ok(Grid { vertices, indices })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grid_has_two_triangles_per_cell() {
        let grid = create_grid(30.0, 30.0, 60, 60).unwrap();

        assert_eq!(grid.vertices.len(), 3600);
        assert_eq!(grid.indices.len(), 59 * 59 * 6);
        assert!(grid.indices.iter().all(|&i| i < 3600));
    }

    #[test]
    fn grid_corners_span_the_requested_size() {
        let grid = create_grid(4.0, 2.0, 3, 5).unwrap();

        assert_eq!(grid.vertices[0].position, [-2.0, 0.0, 1.0]);
        assert_eq!(grid.vertices[4].position, [2.0, 0.0, 1.0]);
        assert_eq!(grid.vertices[14].position, [2.0, 0.0, -1.0]);
    }

    #[test]
    fn texture_is_stretched_over_the_grid() {
        let grid = create_grid(1.0, 1.0, 4, 4).unwrap();

        assert_eq!(grid.vertices[0].uv, [0.0, 0.0]);
        assert_eq!(grid.vertices[15].uv, [1.0, 1.0]);
        assert!(grid.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn grid_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<GridVertex>(), 32);
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        assert!(create_grid(1.0, 1.0, 1, 10).is_err());
        assert!(create_grid(1.0, 1.0, 10, 0).is_err());
    }
}
