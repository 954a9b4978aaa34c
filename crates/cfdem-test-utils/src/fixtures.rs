//! Particle fixtures.

use cfdem_core::{GeometrySpec, Particle, ParticleCollection, ParticleId, Vec3, FLOW_PARTICLES};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` particles scattered uniformly inside `geometry`, reproducible
/// from `seed`. Particles keep a clearance of `radius` from every face
/// whose extent allows it.
pub fn seeded_particles(
    name: &str,
    seed: u64,
    count: usize,
    geometry: &GeometrySpec,
    radius: f64,
) -> ParticleCollection {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut coord = |extent: f64| {
        if extent > 2.0 * radius {
            rng.random_range(radius..extent - radius)
        } else {
            rng.random_range(0.0..extent)
        }
    };
    let particles = (0..count as u64).map(|i| {
        let coordinates = [
            coord(geometry.extent[0]),
            coord(geometry.extent[1]),
            coord(geometry.extent[2]),
        ];
        Particle::new(ParticleId(i), coordinates, radius)
    });
    ParticleCollection::from_particles(name, particles.collect::<Vec<_>>())
}

/// Two resting flow particles in a unit-extent channel, one near each end.
pub fn two_particle_flow() -> ParticleCollection {
    ParticleCollection::from_particles(
        FLOW_PARTICLES,
        [
            Particle::new(ParticleId(0), [0.15, 0.35, 0.5], 0.02),
            Particle::new(ParticleId(1), [0.85, 0.65, 0.5], 0.02),
        ],
    )
}

/// A row of `count` particles along x at height `y`, evenly spaced over
/// the channel length.
pub fn wall_row(
    name: &str,
    geometry: &GeometrySpec,
    count: usize,
    y: f64,
    radius: f64,
) -> ParticleCollection {
    let pitch = geometry.extent[0] / count.max(1) as f64;
    let z = geometry.extent[2] / 2.0;
    let particles = (0..count).map(|i| {
        let coordinates: Vec3 = [(i as f64 + 0.5) * pitch, y, z];
        Particle::new(ParticleId(i as u64), coordinates, radius)
    });
    ParticleCollection::from_particles(name, particles.collect::<Vec<_>>())
}
