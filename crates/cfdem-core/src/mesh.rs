//! Fluid mesh dataset: points, cells, and cell-centred field data.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::id::{CellUid, PointId};
use crate::vec3::{self, Vec3};

/// Incident point ids of a cell. Hexahedral cells (8 vertices) stay inline.
pub type CellPoints = SmallVec<[PointId; 8]>;

/// A mesh vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// Point identifier, unique within its mesh.
    pub id: PointId,
    /// Position in channel coordinates.
    pub coordinates: Vec3,
}

impl Point {
    /// Create a point.
    pub fn new(id: PointId, coordinates: Vec3) -> Self {
        Self { id, coordinates }
    }
}

/// A mesh cell with its cell-centred fluid state.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Stable cell identifier.
    pub uid: CellUid,
    /// Ids of the points spanning the cell.
    pub points: CellPoints,
    /// Fluid velocity at the cell centre.
    pub velocity: Vec3,
    /// Fluid pressure at the cell centre.
    pub pressure: f64,
}

impl Cell {
    /// Create a cell at rest (zero velocity and pressure).
    pub fn new(uid: CellUid, points: impl IntoIterator<Item = PointId>) -> Self {
        Self {
            uid,
            points: points.into_iter().collect(),
            velocity: vec3::ZERO,
            pressure: 0.0,
        }
    }
}

/// A named fluid mesh.
///
/// Points and cells are kept in insertion order so that iteration is
/// deterministic. The coupling loop treats a mesh as immutable for the
/// duration of one iteration; only the fluid engine writes to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    name: String,
    points: IndexMap<PointId, Point>,
    cells: IndexMap<CellUid, Cell>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: IndexMap::new(),
            cells: IndexMap::new(),
        }
    }

    /// Dataset name of this mesh.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a point, returning the previous point with the same id.
    pub fn add_point(&mut self, point: Point) -> Option<Point> {
        self.points.insert(point.id, point)
    }

    /// Insert a cell, returning the previous cell with the same uid.
    pub fn add_cell(&mut self, cell: Cell) -> Option<Cell> {
        self.cells.insert(cell.uid, cell)
    }

    /// Look up a point.
    pub fn get_point(&self, id: PointId) -> Option<&Point> {
        self.points.get(&id)
    }

    /// Look up a cell.
    pub fn get_cell(&self, uid: CellUid) -> Option<&Cell> {
        self.cells.get(&uid)
    }

    /// Mutable access to a cell's field data.
    pub fn cell_mut(&mut self, uid: CellUid) -> Option<&mut Cell> {
        self.cells.get_mut(&uid)
    }

    /// Iterate cells in insertion order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }

    /// Iterate cells mutably in insertion order.
    pub fn iter_cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.values_mut()
    }

    /// Iterate points in insertion order.
    pub fn iter_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.values()
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Lower-near corner of a cell: the component-wise minimum over its
    /// incident points.
    ///
    /// Returns `None` if the cell has no points or references a point
    /// that is not part of this mesh.
    pub fn cell_lower_corner(&self, cell: &Cell) -> Option<Vec3> {
        let mut ids = cell.points.iter();
        let first = self.get_point(*ids.next()?)?.coordinates;
        ids.try_fold(first, |corner, id| {
            self.get_point(*id)
                .map(|p| vec3::min(corner, p.coordinates))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube(mesh: &mut Mesh, origin: Vec3, first_point: u64, uid: u64) {
        let mut ids = Vec::new();
        for k in 0..8u64 {
            let offset = [
                (k & 1) as f64,
                ((k >> 1) & 1) as f64,
                ((k >> 2) & 1) as f64,
            ];
            let id = PointId(first_point + k);
            mesh.add_point(Point::new(id, vec3::add(origin, offset)));
            ids.push(id);
        }
        mesh.add_cell(Cell::new(CellUid(uid), ids));
    }

    #[test]
    fn lower_corner_is_minimum_not_centroid() {
        let mut mesh = Mesh::new("mesh");
        unit_cube(&mut mesh, [2.0, 3.0, 4.0], 0, 5);
        let cell = mesh.get_cell(CellUid(5)).unwrap();
        assert_eq!(mesh.cell_lower_corner(cell), Some([2.0, 3.0, 4.0]));
    }

    #[test]
    fn lower_corner_missing_point_is_none() {
        let mut mesh = Mesh::new("mesh");
        mesh.add_point(Point::new(PointId(0), [0.0; 3]));
        let cell = Cell::new(CellUid(1), [PointId(0), PointId(99)]);
        assert_eq!(mesh.cell_lower_corner(&cell), None);
    }

    #[test]
    fn lower_corner_empty_cell_is_none() {
        let mesh = Mesh::new("mesh");
        let cell = Cell::new(CellUid(1), []);
        assert_eq!(mesh.cell_lower_corner(&cell), None);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut mesh = Mesh::new("mesh");
        unit_cube(&mut mesh, [1.0, 0.0, 0.0], 0, 9);
        unit_cube(&mut mesh, [0.0, 0.0, 0.0], 8, 3);
        let uids: Vec<u64> = mesh.iter_cells().map(|c| c.uid.0).collect();
        assert_eq!(uids, vec![9, 3]);
        assert_eq!(mesh.cell_count(), 2);
        assert_eq!(mesh.point_count(), 16);
    }

    #[test]
    fn cell_mut_updates_velocity() {
        let mut mesh = Mesh::new("mesh");
        unit_cube(&mut mesh, [0.0; 3], 0, 0);
        mesh.cell_mut(CellUid(0)).unwrap().velocity = [1.0, 2.0, 3.0];
        assert_eq!(mesh.get_cell(CellUid(0)).unwrap().velocity, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn clone_is_deep() {
        let mut mesh = Mesh::new("mesh");
        unit_cube(&mut mesh, [0.0; 3], 0, 0);
        let copy = mesh.clone();
        mesh.cell_mut(CellUid(0)).unwrap().velocity = [9.0; 3];
        assert_eq!(copy.get_cell(CellUid(0)).unwrap().velocity, [0.0; 3]);
    }
}
