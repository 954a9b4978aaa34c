//! Collaborator traits for the external fluid and particle solvers.
//!
//! The kernel never reimplements either solver. It configures them,
//! calls `advance()`, reads their datasets, and writes per-particle
//! forces back. Both traits are object-safe; `Box<dyn FluidEngine>` and
//! `Box<dyn ParticleEngine>` implement the traits themselves.

use crate::error::EngineError;
use crate::geometry::GeometrySpec;
use crate::mesh::Mesh;
use crate::params::{
    FluidParam, MeshKind, ParticleMaterial, ParticleParam, SurfaceCondition, WallBoundary,
};
use crate::particle::{Particle, ParticleCollection, ParticleGroup};

/// A continuum fluid solver treated as an opaque state machine.
///
/// The engine is owned exclusively by the coupling worker for the whole
/// run, hence `Send` and `&mut self` on every mutating call.
pub trait FluidEngine: Send {
    /// Human-readable engine name for logs.
    fn name(&self) -> &str;

    /// Set a scalar solver parameter.
    fn set_scalar_param(&mut self, param: FluidParam, value: f64) -> Result<(), EngineError>;

    /// Read back a scalar solver parameter, if set.
    fn scalar_param(&self, param: FluidParam) -> Option<f64>;

    /// Set the velocity and pressure conditions of a named mesh face.
    fn set_boundary_condition(
        &mut self,
        face: &str,
        condition: &SurfaceCondition,
    ) -> Result<(), EngineError>;

    /// Generate the named mesh for the given channel geometry.
    fn create_mesh(
        &mut self,
        name: &str,
        geometry: &GeometrySpec,
        kind: MeshKind,
    ) -> Result<(), EngineError>;

    /// Run the configured number of internal sub-steps.
    fn advance(&mut self) -> Result<(), EngineError>;

    /// Current state of the named mesh.
    fn mesh(&self, name: &str) -> Result<&Mesh, EngineError>;
}

/// A discrete-element particle solver treated as an opaque state machine.
pub trait ParticleEngine: Send {
    /// Human-readable engine name for logs.
    fn name(&self) -> &str;

    /// Set a scalar solver parameter.
    fn set_scalar_param(&mut self, param: ParticleParam, value: f64) -> Result<(), EngineError>;

    /// Boundary treatment of the x, y and z box face pairs.
    fn set_box_faces(&mut self, faces: [WallBoundary; 3]) -> Result<(), EngineError>;

    /// Hold a particle group fixed (or release it).
    fn set_fixed(&mut self, group: ParticleGroup, fixed: bool) -> Result<(), EngineError>;

    /// Material properties of a particle group.
    fn set_material(
        &mut self,
        group: ParticleGroup,
        material: &ParticleMaterial,
    ) -> Result<(), EngineError>;

    /// Register a particle collection under its own name.
    fn add_dataset(&mut self, particles: ParticleCollection) -> Result<(), EngineError>;

    /// Current state of the named collection.
    fn dataset(&self, name: &str) -> Result<&ParticleCollection, EngineError>;

    /// Replace particles of the named collection by id.
    fn update_particles(&mut self, name: &str, particles: &[Particle]) -> Result<(), EngineError>;

    /// Run the configured number of internal sub-steps.
    fn advance(&mut self) -> Result<(), EngineError>;
}

impl<T: FluidEngine + ?Sized> FluidEngine for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_scalar_param(&mut self, param: FluidParam, value: f64) -> Result<(), EngineError> {
        (**self).set_scalar_param(param, value)
    }

    fn scalar_param(&self, param: FluidParam) -> Option<f64> {
        (**self).scalar_param(param)
    }

    fn set_boundary_condition(
        &mut self,
        face: &str,
        condition: &SurfaceCondition,
    ) -> Result<(), EngineError> {
        (**self).set_boundary_condition(face, condition)
    }

    fn create_mesh(
        &mut self,
        name: &str,
        geometry: &GeometrySpec,
        kind: MeshKind,
    ) -> Result<(), EngineError> {
        (**self).create_mesh(name, geometry, kind)
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        (**self).advance()
    }

    fn mesh(&self, name: &str) -> Result<&Mesh, EngineError> {
        (**self).mesh(name)
    }
}

impl<T: ParticleEngine + ?Sized> ParticleEngine for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_scalar_param(&mut self, param: ParticleParam, value: f64) -> Result<(), EngineError> {
        (**self).set_scalar_param(param, value)
    }

    fn set_box_faces(&mut self, faces: [WallBoundary; 3]) -> Result<(), EngineError> {
        (**self).set_box_faces(faces)
    }

    fn set_fixed(&mut self, group: ParticleGroup, fixed: bool) -> Result<(), EngineError> {
        (**self).set_fixed(group, fixed)
    }

    fn set_material(
        &mut self,
        group: ParticleGroup,
        material: &ParticleMaterial,
    ) -> Result<(), EngineError> {
        (**self).set_material(group, material)
    }

    fn add_dataset(&mut self, particles: ParticleCollection) -> Result<(), EngineError> {
        (**self).add_dataset(particles)
    }

    fn dataset(&self, name: &str) -> Result<&ParticleCollection, EngineError> {
        (**self).dataset(name)
    }

    fn update_particles(&mut self, name: &str, particles: &[Particle]) -> Result<(), EngineError> {
        (**self).update_particles(name, particles)
    }

    fn advance(&mut self) -> Result<(), EngineError> {
        (**self).advance()
    }
}
