//! Parameter vocabulary for configuring the external solvers.
//!
//! These types describe *what* the kernel asks of an engine; how an
//! engine maps them onto its own input decks is its own business.

use std::fmt;

use crate::vec3::Vec3;

/// Scalar parameters of the fluid engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FluidParam {
    /// Solver time step (s).
    TimeStep,
    /// Internal sub-steps executed per `advance()`.
    NumberOfTimeSteps,
    /// Fluid density (kg/m³).
    Density,
    /// Fluid dynamic viscosity (Pa·s).
    DynamicViscosity,
}

impl fmt::Display for FluidParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TimeStep => "time_step",
            Self::NumberOfTimeSteps => "number_of_time_steps",
            Self::Density => "density",
            Self::DynamicViscosity => "dynamic_viscosity",
        };
        f.write_str(name)
    }
}

/// Scalar parameters of the particle engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleParam {
    /// Solver time step (s).
    TimeStep,
    /// Internal sub-steps executed per `advance()`.
    NumberOfTimeSteps,
}

impl fmt::Display for ParticleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TimeStep => "time_step",
            Self::NumberOfTimeSteps => "number_of_time_steps",
        };
        f.write_str(name)
    }
}

/// How the fluid engine should generate its mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Structured block mesh.
    #[default]
    Block,
    /// Quad mesh spanned from the channel corner points.
    Quad,
}

/// Boundary condition for one field on one mesh face.
///
/// `T` is the value type of the field: [`Vec3`] for velocity, `f64` for
/// pressure.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum BoundaryCondition<T> {
    /// No condition set; the engine's own default applies.
    #[default]
    None,
    /// Face excluded from the solution (e.g. front/back of a 2D case).
    Empty,
    /// Zero normal gradient.
    ZeroGradient,
    /// Prescribed normal gradient.
    FixedGradient(T),
    /// Prescribed value.
    FixedValue(T),
}

/// Velocity and pressure conditions of one mesh face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceCondition {
    /// Velocity boundary condition.
    pub velocity: BoundaryCondition<Vec3>,
    /// Pressure boundary condition.
    pub pressure: BoundaryCondition<f64>,
}

/// Particle-engine treatment of a simulation box face pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallBoundary {
    /// Particles leaving one side re-enter on the other.
    Periodic,
    /// Closed face.
    Fixed,
}

/// Pair interaction model between particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairPotential {
    /// Purely repulsive contact.
    Repulsion,
    /// Repulsive contact with cohesion.
    Cohesion,
}

/// Material properties of a particle group.
///
/// Interaction coefficients are given separately for contacts with
/// flow particles and with wall particles.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleMaterial {
    /// Young's modulus (Pa).
    pub young_modulus: f64,
    /// Poisson's ratio.
    pub poisson_ratio: f64,
    /// Restitution coefficient against flow particles.
    pub restitution_with_flow: f64,
    /// Restitution coefficient against wall particles.
    pub restitution_with_wall: f64,
    /// Friction coefficient against flow particles.
    pub friction_with_flow: f64,
    /// Friction coefficient against wall particles.
    pub friction_with_wall: f64,
    /// Cohesion energy density against flow particles (J/m³).
    pub cohesion_with_flow: f64,
    /// Cohesion energy density against wall particles (J/m³).
    pub cohesion_with_wall: f64,
    /// Pair interaction model.
    pub pair_potential: PairPotential,
}

impl Default for ParticleMaterial {
    fn default() -> Self {
        Self {
            young_modulus: 2.0e4,
            poisson_ratio: 0.45,
            restitution_with_flow: 0.95,
            restitution_with_wall: 0.95,
            friction_with_flow: 0.0,
            friction_with_wall: 0.0,
            cohesion_with_flow: 0.0,
            cohesion_with_wall: 0.0,
            pair_potential: PairPotential::Repulsion,
        }
    }
}

impl ParticleMaterial {
    /// Every scalar coefficient with its name, for validation and logging.
    pub fn coefficients(&self) -> [(&'static str, f64); 8] {
        [
            ("young_modulus", self.young_modulus),
            ("poisson_ratio", self.poisson_ratio),
            ("restitution_with_flow", self.restitution_with_flow),
            ("restitution_with_wall", self.restitution_with_wall),
            ("friction_with_flow", self.friction_with_flow),
            ("friction_with_wall", self.friction_with_wall),
            ("cohesion_with_flow", self.cohesion_with_flow),
            ("cohesion_with_wall", self.cohesion_with_wall),
        ]
    }
}
