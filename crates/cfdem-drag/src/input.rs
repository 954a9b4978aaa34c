//! Per-particle drag inputs.

use cfdem_core::{vec3, Vec3};

/// Everything a closure law needs for one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragInput {
    /// Fluid velocity at the particle's cell minus the particle velocity.
    pub relative_velocity: Vec3,
    /// Particle radius.
    pub radius: f64,
    /// Fluid dynamic viscosity.
    pub viscosity: f64,
    /// Fluid density.
    pub density: f64,
}

impl DragInput {
    /// Inputs for a particle moving at `particle_velocity` through fluid
    /// moving at `fluid_velocity`.
    pub fn new(
        fluid_velocity: Vec3,
        particle_velocity: Vec3,
        radius: f64,
        viscosity: f64,
        density: f64,
    ) -> Self {
        Self {
            relative_velocity: vec3::sub(fluid_velocity, particle_velocity),
            radius,
            viscosity,
            density,
        }
    }

    /// Magnitude of the relative velocity.
    pub fn speed(&self) -> f64 {
        vec3::norm(self.relative_velocity)
    }

    /// Particle Reynolds number `ρ |v_rel| 2r / μ`.
    pub fn reynolds_number(&self) -> f64 {
        self.density * self.speed() * 2.0 * self.radius / self.viscosity
    }

    pub(crate) fn is_finite(&self) -> bool {
        vec3::is_finite(self.relative_velocity)
            && self.radius.is_finite()
            && self.viscosity.is_finite()
            && self.density.is_finite()
    }
}
