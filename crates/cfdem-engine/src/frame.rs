//! Immutable per-iteration snapshots.

use cfdem_core::{Mesh, ParticleCollection};

/// A consistent copy of both simulations at the end of one iteration.
///
/// A frame owns deep copies of the mesh and both particle collections.
/// Nothing the engines do after the frame is taken is visible through it.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// 0-based iteration the frame was taken at.
    pub iteration: u64,
    /// Fluid mesh with cell velocities.
    pub mesh: Mesh,
    /// Mobile particles with their applied drag forces.
    pub flow: ParticleCollection,
    /// Boundary particles.
    pub wall: ParticleCollection,
}

impl Frame {
    /// Total number of particles in both collections.
    pub fn particle_count(&self) -> usize {
        self.flow.len() + self.wall.len()
    }

    /// Percentage of a run of `total` iterations completed by this frame.
    pub fn progress_percent(&self, total: u64) -> f64 {
        if total == 0 {
            100.0
        } else {
            (self.iteration + 1) as f64 * 100.0 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfdem_core::{Particle, ParticleId, FLOW_PARTICLES, WALL_PARTICLES};

    fn frame(iteration: u64) -> Frame {
        Frame {
            iteration,
            mesh: Mesh::new("mesh"),
            flow: ParticleCollection::from_particles(
                FLOW_PARTICLES,
                [Particle::new(ParticleId(0), [0.0; 3], 0.1)],
            ),
            wall: ParticleCollection::new(WALL_PARTICLES),
        }
    }

    #[test]
    fn counts_both_collections() {
        assert_eq!(frame(0).particle_count(), 1);
    }

    #[test]
    fn progress() {
        assert_eq!(frame(0).progress_percent(4), 25.0);
        assert_eq!(frame(3).progress_percent(4), 100.0);
    }
}
