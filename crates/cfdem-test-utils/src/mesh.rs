//! Structured block-mesh generation.
//!
//! Produces the same topology a block-mesh generator would for an
//! axis-aligned channel: `(nx+1)(ny+1)(nz+1)` lattice points and
//! `nx*ny*nz` hexahedral cells, both numbered x-fastest.

use cfdem_core::{Cell, CellUid, GeometrySpec, Mesh, Point, PointId, Vec3};

/// Build a structured hexahedral mesh covering `geometry`.
///
/// Cell uids are the x-fastest linear grid index, so cell
/// `(i, j, k)` has uid `i + nx * (j + ny * k)`.
pub fn block_mesh(name: &str, geometry: &GeometrySpec) -> Mesh {
    let [nx, ny, nz] = geometry.resolution.map(u64::from);
    let size = geometry.cell_size();
    let (px, py) = (nx + 1, ny + 1);
    let point_id = |i: u64, j: u64, k: u64| PointId(i + px * (j + py * k));

    let mut mesh = Mesh::new(name);
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                let coordinates = [
                    i as f64 * size[0],
                    j as f64 * size[1],
                    k as f64 * size[2],
                ];
                mesh.add_point(Point::new(point_id(i, j, k), coordinates));
            }
        }
    }

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let corners = [
                    point_id(i, j, k),
                    point_id(i + 1, j, k),
                    point_id(i + 1, j + 1, k),
                    point_id(i, j + 1, k),
                    point_id(i, j, k + 1),
                    point_id(i + 1, j, k + 1),
                    point_id(i + 1, j + 1, k + 1),
                    point_id(i, j + 1, k + 1),
                ];
                mesh.add_cell(Cell::new(CellUid(i + nx * (j + ny * k)), corners));
            }
        }
    }
    mesh
}

/// Centre of grid cell `bucket` in channel coordinates.
pub fn cell_centre(geometry: &GeometrySpec, bucket: [u32; 3]) -> Vec3 {
    let size = geometry.cell_size();
    [
        (f64::from(bucket[0]) + 0.5) * size[0],
        (f64::from(bucket[1]) + 0.5) * size[1],
        (f64::from(bucket[2]) + 0.5) * size[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_mesh_counts() {
        let g = GeometrySpec::new([1.0, 1.0, 0.1], [10, 10, 1]);
        let mesh = block_mesh("mesh", &g);
        assert_eq!(mesh.cell_count(), 100);
        assert_eq!(mesh.point_count(), 11 * 11 * 2);
        assert!(mesh.iter_cells().all(|c| c.points.len() == 8));
    }

    #[test]
    fn lower_corner_matches_grid_position() {
        let g = GeometrySpec::new([2.0, 1.0, 1.0], [4, 2, 1]);
        let mesh = block_mesh("mesh", &g);
        let cell = mesh.get_cell(CellUid(1 + 4)).unwrap();
        let corner = mesh.cell_lower_corner(cell).unwrap();
        assert!((corner[0] - 0.5).abs() < 1e-12);
        assert!((corner[1] - 0.5).abs() < 1e-12);
        assert!(corner[2].abs() < 1e-12);
    }
}
