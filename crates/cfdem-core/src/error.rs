//! Error types shared across the cfdem workspace.
//!
//! [`EngineError`] is what the external solvers report through the
//! collaborator traits; the coupling kernel carries it upward unchanged.
//! [`GeometryError`] covers invalid channel geometry.

use std::error::Error;
use std::fmt;

use crate::id::ParticleId;

/// Errors reported by an external fluid or particle engine.
///
/// Engines construct these; the kernel never rewrites them. A failing
/// `advance()` surfaces to the caller as the very same value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The engine's `advance()` call failed.
    AdvanceFailed {
        /// Engine-provided description.
        reason: String,
    },
    /// No dataset (mesh or particle collection) with this name.
    UnknownDataset {
        /// The requested dataset name.
        name: String,
    },
    /// A dataset with this name is already registered.
    DuplicateDataset {
        /// The conflicting name.
        name: String,
    },
    /// The engine rejected a parameter or boundary setting.
    ParameterRejected {
        /// Which parameter was rejected.
        parameter: String,
        /// Engine-provided description.
        reason: String,
    },
    /// An update referenced a particle the collection does not contain.
    UnknownParticle {
        /// Name of the collection that was updated.
        dataset: String,
        /// The missing particle.
        particle: ParticleId,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdvanceFailed { reason } => write!(f, "advance failed: {reason}"),
            Self::UnknownDataset { name } => write!(f, "unknown dataset '{name}'"),
            Self::DuplicateDataset { name } => write!(f, "dataset '{name}' already exists"),
            Self::ParameterRejected { parameter, reason } => {
                write!(f, "parameter '{parameter}' rejected: {reason}")
            }
            Self::UnknownParticle { dataset, particle } => {
                write!(f, "particle {particle} not found in dataset '{dataset}'")
            }
        }
    }
}

impl Error for EngineError {}

/// Invalid channel geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// An extent is zero, negative, or not finite.
    NonPositiveExtent {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// The offending extent.
        value: f64,
    },
    /// A resolution count is zero.
    ZeroResolution {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
    },
    /// `nx * ny * nz` does not fit in `usize`.
    CellCountOverflow,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveExtent { axis, value } => write!(
                f,
                "extent along {} must be finite and positive, got {value}",
                axis_name(*axis)
            ),
            Self::ZeroResolution { axis } => write!(
                f,
                "resolution along {} must be at least 1",
                axis_name(*axis)
            ),
            Self::CellCountOverflow => write!(f, "grid cell count overflows usize"),
        }
    }
}

impl Error for GeometryError {}

fn axis_name(axis: usize) -> &'static str {
    crate::geometry::AXIS_NAMES.get(axis).copied().unwrap_or("?")
}
