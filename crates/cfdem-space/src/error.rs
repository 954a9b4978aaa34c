//! Error types for index construction and point lookup.

use cfdem_core::{CellUid, GeometryError, Vec3, AXIS_NAMES};
use std::error::Error;
use std::fmt;

/// Errors arising while building a [`SpatialIndex`](crate::SpatialIndex).
///
/// Every variant means the mesh is not a structured grid consistent with
/// the configured geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexError {
    /// The geometry itself is invalid.
    InvalidGeometry(GeometryError),
    /// A cell has no points or references a point the mesh does not hold.
    UnresolvedCorner {
        /// The offending cell.
        cell: CellUid,
    },
    /// A cell's lower corner buckets outside `[0, resolution)`.
    BucketOutOfRange {
        /// The offending cell.
        cell: CellUid,
        /// The rounded bucket before range checking.
        bucket: [i64; 3],
    },
    /// Two cells share the same bucket.
    DuplicateBucket {
        /// The contested bucket.
        bucket: [u32; 3],
        /// Cell that claimed the bucket first.
        first: CellUid,
        /// Cell that collided with it.
        second: CellUid,
    },
    /// The mesh does not have one cell per grid bucket. Fewer cells
    /// leave buckets empty; more force a duplicate.
    CellCountMismatch {
        /// Cells the geometry's resolution calls for.
        expected: usize,
        /// Cells the mesh holds.
        found: usize,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry(e) => write!(f, "invalid geometry: {e}"),
            Self::UnresolvedCorner { cell } => {
                write!(f, "cell {cell} has no resolvable lower corner")
            }
            Self::BucketOutOfRange { cell, bucket } => {
                write!(f, "cell {cell} buckets to {bucket:?}, outside the grid")
            }
            Self::DuplicateBucket {
                bucket,
                first,
                second,
            } => write!(
                f,
                "cells {first} and {second} both occupy bucket {bucket:?}"
            ),
            Self::CellCountMismatch { expected, found } => write!(
                f,
                "mesh has {found} cell(s) but the grid has {expected} bucket(s)"
            ),
        }
    }
}

impl Error for IndexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for IndexError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e)
    }
}

/// Errors arising from a point lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum LocateError {
    /// A coordinate is NaN or infinite.
    NonFinite {
        /// The queried point.
        point: Vec3,
    },
    /// The point lies outside the grid even after boundary correction.
    OutsideDomain {
        /// The queried point.
        point: Vec3,
        /// Axis on which the lookup failed.
        axis: usize,
        /// Raw grid index on that axis.
        index: i64,
    },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { point } => write!(f, "point {point:?} is not finite"),
            Self::OutsideDomain { point, axis, index } => write!(
                f,
                "point {point:?} is outside the domain: {} index {index}",
                AXIS_NAMES.get(*axis).copied().unwrap_or("?")
            ),
        }
    }
}

impl Error for LocateError {}
