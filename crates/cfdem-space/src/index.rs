//! Point-to-cell lookup over a uniform grid.

use cfdem_core::{vec3, CellUid, GeometrySpec, Mesh, Vec3};

use crate::boundary::{wrap_axis_index, AxisBoundary};
use crate::error::{IndexError, LocateError};

/// Grid multi-index `(i, j, k)`.
pub type Bucket = [u32; 3];

/// Dense map from grid bucket to mesh cell uid.
///
/// One slot per grid cell, stored x-fastest. Every slot is filled: a
/// successfully built index covers the whole resolution with distinct
/// cells.
///
/// # Examples
///
/// ```
/// use cfdem_core::{Cell, CellUid, GeometrySpec, Mesh, Point, PointId};
/// use cfdem_space::SpatialIndex;
///
/// // Two unit cells side by side along x.
/// let mut mesh = Mesh::new("mesh");
/// for (id, x) in [0.0, 1.0, 2.0].into_iter().enumerate() {
///     mesh.add_point(Point::new(PointId(id as u64), [x, 0.0, 0.0]));
///     mesh.add_point(Point::new(PointId(10 + id as u64), [x, 1.0, 1.0]));
/// }
/// mesh.add_cell(Cell::new(CellUid(7), [PointId(0), PointId(11)]));
/// mesh.add_cell(Cell::new(CellUid(3), [PointId(1), PointId(12)]));
///
/// let geometry = GeometrySpec::new([2.0, 1.0, 1.0], [2, 1, 1]);
/// let index = SpatialIndex::build(&mesh, &geometry).unwrap();
/// assert_eq!(index.locate([1.5, 0.5, 0.5]).unwrap(), CellUid(3));
/// // One step past the upper x face wraps to the first cell.
/// assert_eq!(index.locate([2.0, 0.5, 0.5]).unwrap(), CellUid(7));
/// ```
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    geometry: GeometrySpec,
    cell_size: Vec3,
    boundaries: [AxisBoundary; 3],
    cells: Vec<CellUid>,
}

impl SpatialIndex {
    /// Build the index from `mesh`, bucketing each cell by its lower corner.
    ///
    /// The corner is rounded to the nearest grid coordinate so float noise
    /// in the mesh points does not shift a cell into its neighbour's slot.
    /// All axes start out [`AxisBoundary::Periodic`].
    pub fn build(mesh: &Mesh, geometry: &GeometrySpec) -> Result<Self, IndexError> {
        geometry.validate()?;
        let cell_size = geometry.cell_size();
        let resolution = geometry.resolution;
        let expected = geometry.cell_count();
        if mesh.cell_count() != expected {
            return Err(IndexError::CellCountMismatch {
                expected,
                found: mesh.cell_count(),
            });
        }
        let mut slots: Vec<Option<CellUid>> = vec![None; expected];

        for cell in mesh.iter_cells() {
            let corner = mesh
                .cell_lower_corner(cell)
                .filter(|c| vec3::is_finite(*c))
                .ok_or(IndexError::UnresolvedCorner { cell: cell.uid })?;
            let raw = [0, 1, 2].map(|axis| (corner[axis] / cell_size[axis]).round() as i64);
            let bucket = bucket_in_range(raw, resolution).ok_or(IndexError::BucketOutOfRange {
                cell: cell.uid,
                bucket: raw,
            })?;
            let slot = &mut slots[linear(bucket, resolution)];
            if let Some(first) = *slot {
                return Err(IndexError::DuplicateBucket {
                    bucket,
                    first,
                    second: cell.uid,
                });
            }
            *slot = Some(cell.uid);
        }

        // One cell per bucket with no duplicates: every slot is filled.
        Ok(Self {
            geometry: *geometry,
            cell_size,
            boundaries: [AxisBoundary::Periodic; 3],
            cells: slots.into_iter().flatten().collect(),
        })
    }

    /// Replace the per-axis boundary handling.
    pub fn with_boundaries(mut self, boundaries: [AxisBoundary; 3]) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// Per-axis boundary handling.
    pub fn boundaries(&self) -> [AxisBoundary; 3] {
        self.boundaries
    }

    /// Grid bucket containing `point`, after boundary correction.
    pub fn locate_bucket(&self, point: Vec3) -> Result<Bucket, LocateError> {
        if !vec3::is_finite(point) {
            return Err(LocateError::NonFinite { point });
        }
        let mut bucket = [0u32; 3];
        for axis in 0..3 {
            let index = (point[axis] / self.cell_size[axis]).floor() as i64;
            bucket[axis] = wrap_axis_index(
                index,
                self.geometry.resolution[axis],
                self.boundaries[axis],
            )
            .ok_or(LocateError::OutsideDomain { point, axis, index })?;
        }
        Ok(bucket)
    }

    /// Uid of the cell containing `point`.
    pub fn locate(&self, point: Vec3) -> Result<CellUid, LocateError> {
        let bucket = self.locate_bucket(point)?;
        Ok(self.cells[linear(bucket, self.geometry.resolution)])
    }

    /// Uid stored for `bucket`, or `None` if the bucket is outside the grid.
    pub fn get(&self, bucket: Bucket) -> Option<CellUid> {
        let resolution = self.geometry.resolution;
        if (0..3).all(|axis| bucket[axis] < resolution[axis]) {
            self.cells.get(linear(bucket, resolution)).copied()
        } else {
            None
        }
    }

    /// Number of buckets (equal to `nx * ny * nz`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the index holds no buckets. Never true for a built index.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate `(bucket, uid)` pairs in x-fastest order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, CellUid)> + '_ {
        let resolution = self.geometry.resolution;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, uid)| (delinear(i, resolution), *uid))
    }

    /// Geometry the index was built against.
    pub fn geometry(&self) -> &GeometrySpec {
        &self.geometry
    }

    /// Grid resolution.
    pub fn resolution(&self) -> [u32; 3] {
        self.geometry.resolution
    }

    /// Edge lengths of one grid cell.
    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }
}

fn bucket_in_range(raw: [i64; 3], resolution: [u32; 3]) -> Option<Bucket> {
    let mut bucket = [0u32; 3];
    for axis in 0..3 {
        let b = u32::try_from(raw[axis]).ok()?;
        if b >= resolution[axis] {
            return None;
        }
        bucket[axis] = b;
    }
    Some(bucket)
}

fn linear(bucket: Bucket, resolution: [u32; 3]) -> usize {
    let [nx, ny, _] = resolution.map(|n| n as usize);
    let [i, j, k] = bucket.map(|b| b as usize);
    i + nx * (j + ny * k)
}

fn delinear(index: usize, resolution: [u32; 3]) -> Bucket {
    let [nx, ny, _] = resolution.map(|n| n as usize);
    let i = index % nx;
    let j = (index / nx) % ny;
    let k = index / (nx * ny);
    [i as u32, j as u32, k as u32]
}
