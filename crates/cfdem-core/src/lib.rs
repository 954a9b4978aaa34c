//! Core types and traits for the cfdem coupling kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data model shared by the rest of the workspace: typed identifiers,
//! [`Mesh`] and [`ParticleCollection`] datasets, the channel
//! [`GeometrySpec`], solver parameter types, error types, and the
//! [`FluidEngine`] / [`ParticleEngine`] collaborator traits through which
//! the kernel drives the external solvers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod mesh;
pub mod params;
pub mod particle;
pub mod traits;
pub mod vec3;

pub use error::{EngineError, GeometryError};
pub use geometry::{GeometrySpec, AXIS_NAMES};
pub use id::{CellUid, ParticleId, PointId};
pub use mesh::{Cell, CellPoints, Mesh, Point};
pub use params::{
    BoundaryCondition, FluidParam, MeshKind, PairPotential, ParticleMaterial, ParticleParam,
    SurfaceCondition, WallBoundary,
};
pub use particle::{
    Particle, ParticleCollection, ParticleGroup, FLOW_PARTICLES, WALL_PARTICLES,
};
pub use traits::{FluidEngine, ParticleEngine};
pub use vec3::Vec3;
