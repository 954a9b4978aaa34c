//! Particle datasets handed to and read back from the particle engine.

use indexmap::IndexMap;

use crate::error::EngineError;
use crate::id::ParticleId;
use crate::vec3::{self, Vec3};

/// Dataset name of the mobile particles that receive drag.
pub const FLOW_PARTICLES: &str = "flow_particles";

/// Dataset name of the boundary particles.
pub const WALL_PARTICLES: &str = "wall_particles";

/// The two particle populations of a coupled run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleGroup {
    /// Mobile particles, subject to drag.
    Flow,
    /// Boundary particles, generally held fixed.
    Wall,
}

impl ParticleGroup {
    /// Both groups, flow first.
    pub const ALL: [ParticleGroup; 2] = [ParticleGroup::Flow, ParticleGroup::Wall];

    /// Dataset name used for this group inside the particle engine.
    pub fn dataset_name(self) -> &'static str {
        match self {
            Self::Flow => FLOW_PARTICLES,
            Self::Wall => WALL_PARTICLES,
        }
    }
}

/// A single discrete particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Identifier within the owning collection.
    pub id: ParticleId,
    /// Position in channel coordinates.
    pub coordinates: Vec3,
    /// Particle radius.
    pub radius: f64,
    /// Particle velocity.
    pub velocity: Vec3,
    /// External force applied on the next particle-engine advance.
    pub force: Vec3,
}

impl Particle {
    /// Create a particle at rest with no applied force.
    pub fn new(id: ParticleId, coordinates: Vec3, radius: f64) -> Self {
        Self {
            id,
            coordinates,
            radius,
            velocity: vec3::ZERO,
            force: vec3::ZERO,
        }
    }

    /// Builder-style velocity setter.
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
}

/// A named, ordered set of particles.
///
/// Iteration follows insertion order. [`update_particles`](Self::update_particles)
/// replaces existing particles by id and never inserts new ones.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleCollection {
    name: String,
    particles: IndexMap<ParticleId, Particle>,
    box_origin: Vec3,
}

impl ParticleCollection {
    /// Create an empty collection with its box origin at `(0, 0, 0)`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            particles: IndexMap::new(),
            box_origin: vec3::ZERO,
        }
    }

    /// Create a collection from an iterator of particles.
    pub fn from_particles(
        name: impl Into<String>,
        particles: impl IntoIterator<Item = Particle>,
    ) -> Self {
        let mut collection = Self::new(name);
        for p in particles {
            collection.add_particle(p);
        }
        collection
    }

    /// Dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the collection.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Insert a particle, returning any previous particle with the same id.
    pub fn add_particle(&mut self, particle: Particle) -> Option<Particle> {
        self.particles.insert(particle.id, particle)
    }

    /// Look up a particle.
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` if the collection holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterate particles in insertion order.
    pub fn iter_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.values()
    }

    /// Iterate particles mutably in insertion order.
    pub fn iter_particles_mut(&mut self) -> impl Iterator<Item = &mut Particle> + '_ {
        self.particles.values_mut()
    }

    /// Replace existing particles by id.
    ///
    /// All ids are checked before anything is written: if any particle is
    /// unknown the collection is left untouched.
    pub fn update_particles(&mut self, particles: &[Particle]) -> Result<(), EngineError> {
        if let Some(missing) = particles
            .iter()
            .find(|p| !self.particles.contains_key(&p.id))
        {
            return Err(EngineError::UnknownParticle {
                dataset: self.name.clone(),
                particle: missing.id,
            });
        }
        for p in particles {
            if let Some(slot) = self.particles.get_mut(&p.id) {
                *slot = p.clone();
            }
        }
        Ok(())
    }

    /// Simulation box origin the coordinates are expressed against.
    pub fn box_origin(&self) -> Vec3 {
        self.box_origin
    }

    /// Set the box origin without moving any particle.
    pub fn set_box_origin(&mut self, origin: Vec3) {
        self.box_origin = origin;
    }

    /// Shift every particle by `-box_origin` and reset the origin to zero,
    /// so coordinates line up with a channel that starts at `(0, 0, 0)`.
    pub fn translate_to_origin(&mut self) {
        let origin = self.box_origin;
        for p in self.particles.values_mut() {
            p.coordinates = vec3::sub(p.coordinates, origin);
        }
        self.box_origin = vec3::ZERO;
    }
}
