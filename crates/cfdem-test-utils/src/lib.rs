//! Test utilities and mock solver engines for cfdem development.
//!
//! Provides a structured block-mesh generator, seeded particle fixtures,
//! and in-memory implementations of the collaborator traits
//! ([`FluidEngine`](cfdem_core::FluidEngine),
//! [`ParticleEngine`](cfdem_core::ParticleEngine)) that record what the
//! coupling kernel asked of them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod engines;
pub mod fixtures;
pub mod mesh;

pub use engines::{MockFluidEngine, MockParticleEngine, VelocityProfile};
pub use fixtures::{seeded_particles, two_particle_flow, wall_row};
pub use mesh::{block_mesh, cell_centre};
