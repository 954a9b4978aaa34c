//! Channel geometry: physical extents and grid resolution.

use crate::error::GeometryError;
use crate::vec3::Vec3;

/// Axis labels used in diagnostics.
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Axis-aligned channel geometry.
///
/// The channel spans `[0, extent[i]]` on each axis and is divided into
/// `resolution[i]` equally sized cells. Construction does not validate;
/// call [`validate`](Self::validate) before deriving cell sizes from
/// untrusted input.
///
/// # Examples
///
/// ```
/// use cfdem_core::GeometrySpec;
///
/// let g = GeometrySpec::new([1.0, 1.0, 0.1], [10, 10, 1]);
/// assert!(g.validate().is_ok());
/// assert_eq!(g.cell_count(), 100);
/// assert!((g.cell_size()[0] - 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySpec {
    /// Channel lengths along x, y, z.
    pub extent: Vec3,
    /// Number of grid cells along x, y, z.
    pub resolution: [u32; 3],
}

impl GeometrySpec {
    /// Create a geometry from extents and resolution counts.
    pub const fn new(extent: Vec3, resolution: [u32; 3]) -> Self {
        Self { extent, resolution }
    }

    /// Check that every extent is finite and positive, every resolution
    /// count is non-zero, and the total cell count fits in `usize`.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for axis in 0..3 {
            let value = self.extent[axis];
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::NonPositiveExtent { axis, value });
            }
            if self.resolution[axis] == 0 {
                return Err(GeometryError::ZeroResolution { axis });
            }
        }
        self.checked_cell_count()
            .map(|_| ())
            .ok_or(GeometryError::CellCountOverflow)
    }

    /// Per-axis cell size: `extent[i] / resolution[i]`.
    pub fn cell_size(&self) -> Vec3 {
        [
            self.extent[0] / f64::from(self.resolution[0]),
            self.extent[1] / f64::from(self.resolution[1]),
            self.extent[2] / f64::from(self.resolution[2]),
        ]
    }

    /// Total number of grid cells, `nx * ny * nz`.
    ///
    /// Saturates at `usize::MAX`; `validate()` rejects geometries where
    /// that would happen.
    pub fn cell_count(&self) -> usize {
        self.checked_cell_count().unwrap_or(usize::MAX)
    }

    fn checked_cell_count(&self) -> Option<usize> {
        self.resolution
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_geometry_passes() {
        let g = GeometrySpec::new([0.1, 0.01, 0.002], [400, 40, 1]);
        assert!(g.validate().is_ok());
        assert_eq!(g.cell_count(), 16_000);
    }

    #[test]
    fn zero_extent_rejected() {
        let g = GeometrySpec::new([1.0, 0.0, 1.0], [1, 1, 1]);
        assert_eq!(
            g.validate(),
            Err(GeometryError::NonPositiveExtent {
                axis: 1,
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_extent_rejected() {
        let g = GeometrySpec::new([-1.0, 1.0, 1.0], [1, 1, 1]);
        assert!(matches!(
            g.validate(),
            Err(GeometryError::NonPositiveExtent { axis: 0, .. })
        ));
    }

    #[test]
    fn nan_extent_rejected() {
        let g = GeometrySpec::new([1.0, 1.0, f64::NAN], [1, 1, 1]);
        assert!(matches!(
            g.validate(),
            Err(GeometryError::NonPositiveExtent { axis: 2, .. })
        ));
    }

    #[test]
    fn zero_resolution_rejected() {
        let g = GeometrySpec::new([1.0, 1.0, 1.0], [4, 4, 0]);
        assert_eq!(g.validate(), Err(GeometryError::ZeroResolution { axis: 2 }));
    }

    #[test]
    fn cell_size_divides_extent() {
        let g = GeometrySpec::new([2.0, 1.0, 0.5], [4, 10, 5]);
        let size = g.cell_size();
        assert!((size[0] - 0.5).abs() < 1e-12);
        assert!((size[1] - 0.1).abs() < 1e-12);
        assert!((size[2] - 0.1).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn cells_tile_the_extent(
            extent in prop::array::uniform3(1e-4f64..1e3),
            resolution in prop::array::uniform3(1u32..=64),
        ) {
            let g = GeometrySpec::new(extent, resolution);
            prop_assert!(g.validate().is_ok());
            let size = g.cell_size();
            for axis in 0..3 {
                let span = size[axis] * f64::from(resolution[axis]);
                prop_assert!((span - extent[axis]).abs() <= 1e-12 * extent[axis]);
            }
            let product: usize = resolution.iter().map(|&n| n as usize).product();
            prop_assert_eq!(g.cell_count(), product);
        }
    }
}
