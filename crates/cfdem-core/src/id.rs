//! Strongly-typed identifiers for mesh and particle entities.

use std::fmt;

/// Stable identifier of a mesh cell.
///
/// Assigned by the fluid engine when the mesh is created and unchanged
/// for the lifetime of that mesh. The spatial index maps grid buckets
/// to these ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellUid(pub u64);

impl fmt::Display for CellUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CellUid {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifier of a mesh point (cell vertex).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PointId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifier of a particle within its collection.
///
/// Unique per [`ParticleCollection`](crate::ParticleCollection), not
/// across collections: the flow and wall sets may reuse ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
