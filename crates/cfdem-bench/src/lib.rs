//! Benchmark profiles for the cfdem coupling kernel.
//!
//! - [`reference_profile`]: the default 400x40x1 channel (16K cells) with
//!   1K flow particles
//! - [`stress_profile`]: 1000x100x4 channel (400K cells) with 20K flow
//!   particles
//! - [`poiseuille`]: parabolic channel velocity profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cfdem_core::{GeometrySpec, ParticleCollection, Vec3, FLOW_PARTICLES, WALL_PARTICLES};
use cfdem_drag::ForceLaw;
use cfdem_engine::{CouplingConfig, CouplingError, CouplingSession};
use cfdem_test_utils::{
    seeded_particles, wall_row, MockFluidEngine, MockParticleEngine, VelocityProfile,
};

/// Everything needed to start a benchmark session.
pub struct BenchCase {
    /// Run configuration.
    pub config: CouplingConfig,
    /// Flow particles.
    pub flow: ParticleCollection,
    /// Wall particles.
    pub wall: ParticleCollection,
}

impl BenchCase {
    /// Configure engines and build a ready session.
    pub fn session(
        &self,
        u_max: f64,
    ) -> Result<CouplingSession<MockFluidEngine, MockParticleEngine>, CouplingError> {
        CouplingSession::new(
            self.config.clone(),
            MockFluidEngine::with_profile(poiseuille(&self.config.fluid.geometry, u_max)),
            MockParticleEngine::new(),
            self.flow.clone(),
            self.wall.clone(),
        )
    }
}

/// Reference case: default channel, 1K flow particles, 400 wall particles.
pub fn reference_profile(seed: u64, law: ForceLaw) -> BenchCase {
    let mut config = CouplingConfig::default();
    config.global.force_law = law;
    case(config, seed, 1_000, 400)
}

/// Stress case: 400K cells, 20K flow particles.
pub fn stress_profile(seed: u64, law: ForceLaw) -> BenchCase {
    let mut config = CouplingConfig::default();
    config.global.force_law = law;
    config.fluid.geometry = GeometrySpec::new([0.25, 0.025, 0.001], [1000, 100, 4]);
    case(config, seed, 20_000, 1_000)
}

fn case(config: CouplingConfig, seed: u64, n_flow: usize, n_wall: usize) -> BenchCase {
    let g = config.fluid.geometry;
    let radius = g.cell_size()[0] / 4.0;
    BenchCase {
        flow: seeded_particles(FLOW_PARTICLES, seed, n_flow, &g, radius),
        wall: wall_row(WALL_PARTICLES, &g, n_wall, 0.0, radius),
        config,
    }
}

/// Fully developed laminar channel flow along x with peak speed `u_max`
/// on the centre line and no slip at `y = 0` and `y = extent[1]`.
pub fn poiseuille(geometry: &GeometrySpec, u_max: f64) -> VelocityProfile {
    let height = geometry.extent[1];
    Box::new(move |centre: Vec3, _step: u64| {
        let eta = centre[1] / height;
        [4.0 * u_max * eta * (1.0 - eta), 0.0, 0.0]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poiseuille_peaks_on_centre_line() {
        let g = GeometrySpec::new([1.0, 2.0, 1.0], [1, 1, 1]);
        let profile = poiseuille(&g, 3.0);
        assert_eq!(profile([0.0, 1.0, 0.0], 0), [3.0, 0.0, 0.0]);
        assert_eq!(profile([0.0, 0.0, 0.0], 0), [0.0; 3]);
    }

    #[test]
    fn reference_profile_builds_a_session() {
        let case = reference_profile(1, ForceLaw::Dala);
        let session = case.session(0.01).unwrap();
        assert_eq!(session.index().len(), 400 * 40);
    }
}
