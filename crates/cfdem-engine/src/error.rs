//! Run-level error type.

use std::error::Error;
use std::fmt;

use cfdem_core::{CellUid, EngineError, ParticleId};
use cfdem_drag::DragError;
use cfdem_space::{IndexError, LocateError};

use crate::config::ConfigError;

/// Broad class of a [`CouplingError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The run never started: bad configuration or inconsistent mesh.
    Configuration,
    /// A particle left the domain or a correlation hit a singularity.
    Domain,
    /// An external engine call failed.
    Engine,
}

/// Why a coupling run failed.
///
/// A consumer that stops acknowledging frames is not an error; that is
/// reported as [`RunOutcome::Aborted`](crate::RunOutcome::Aborted).
#[derive(Clone, Debug, PartialEq)]
pub enum CouplingError {
    /// Configuration was rejected before any engine call.
    Config(ConfigError),
    /// The fluid mesh is not a structured grid matching the geometry.
    Index(IndexError),
    /// A flow particle lies outside the indexed grid.
    OutsideDomain {
        /// The particle.
        particle: ParticleId,
        /// Lookup failure.
        source: LocateError,
    },
    /// The drag law could not produce a force for a particle.
    Drag {
        /// The particle.
        particle: ParticleId,
        /// Drag failure.
        source: DragError,
    },
    /// The index resolved a particle to a cell the mesh no longer holds.
    UnknownCell {
        /// The particle.
        particle: ParticleId,
        /// The missing cell.
        uid: CellUid,
    },
    /// The fluid engine failed. Carries the engine's own error.
    Fluid(EngineError),
    /// The particle engine failed. Carries the engine's own error.
    Particle(EngineError),
}

impl CouplingError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Index(_) => ErrorKind::Configuration,
            Self::OutsideDomain { .. } | Self::Drag { .. } | Self::UnknownCell { .. } => {
                ErrorKind::Domain
            }
            Self::Fluid(_) | Self::Particle(_) => ErrorKind::Engine,
        }
    }
}

impl fmt::Display for CouplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Index(e) => write!(f, "spatial index error: {e}"),
            Self::OutsideDomain { particle, source } => {
                write!(f, "particle {particle} left the domain: {source}")
            }
            Self::Drag { particle, source } => {
                write!(f, "drag failed for particle {particle}: {source}")
            }
            Self::UnknownCell { particle, uid } => {
                write!(f, "particle {particle} resolved to unknown cell {uid}")
            }
            Self::Fluid(e) => write!(f, "fluid engine: {e}"),
            Self::Particle(e) => write!(f, "particle engine: {e}"),
        }
    }
}

impl Error for CouplingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Index(e) => Some(e),
            Self::OutsideDomain { source, .. } => Some(source),
            Self::Drag { source, .. } => Some(source),
            Self::UnknownCell { .. } => None,
            Self::Fluid(e) | Self::Particle(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CouplingError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<IndexError> for CouplingError {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}
