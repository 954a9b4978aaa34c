//! cfdem: a CFD-DEM coupling kernel.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all cfdem sub-crates. For most users, adding `cfdem` as a single
//! dependency is sufficient; the solvers themselves are supplied through
//! the [`FluidEngine`](prelude::FluidEngine) and
//! [`ParticleEngine`](prelude::ParticleEngine) traits.
//!
//! # Quick start
//!
//! ```rust
//! use cfdem::prelude::*;
//! use cfdem_test_utils::{two_particle_flow, MockFluidEngine, MockParticleEngine};
//!
//! let mut config = CouplingConfig::default();
//! config.global = GlobalConfig::with_force_tag(3, 1, "Dala").unwrap();
//! config.fluid.geometry = GeometrySpec::new([1.0, 1.0, 1.0], [10, 10, 1]);
//!
//! let mut session = CouplingSession::new(
//!     config,
//!     MockFluidEngine::with_uniform_velocity([0.1, 0.0, 0.0]),
//!     MockParticleEngine::new(),
//!     two_particle_flow(),
//!     ParticleCollection::new(WALL_PARTICLES),
//! )
//! .unwrap();
//!
//! let outcome = session.run(&mut FrameHandoff::discard()).unwrap();
//! assert_eq!(outcome.into_frame().unwrap().iteration, 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cfdem-core` | IDs, mesh and particle data, parameters, solver traits |
//! | [`space`] | `cfdem-space` | Bucket grid index from positions to mesh cells |
//! | [`drag`] | `cfdem-drag` | Stokes, Dalla Valle and Coulson drag closures |
//! | [`engine`] | `cfdem-engine` | Coupling loop, frame handoff, background worker |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`cfdem-core`).
///
/// Contains the mesh and particle data model, solver parameters, and the
/// collaborator traits [`types::FluidEngine`] and [`types::ParticleEngine`].
pub use cfdem_core as types;

/// Spatial lookup from particle positions to mesh cells (`cfdem-space`).
pub use cfdem_space as space;

/// Drag closure laws (`cfdem-drag`).
///
/// [`drag::DragForceModel`] selects one of the three laws named by
/// [`drag::ForceLaw`].
pub use cfdem_drag as drag;

/// Coupling loop and frame delivery (`cfdem-engine`).
///
/// [`engine::CouplingSession`] for driving the loop on the current thread,
/// [`engine::CouplingWorker`] for running it in the background.
pub use cfdem_engine as engine;

/// Common imports for typical cfdem usage.
///
/// ```rust
/// use cfdem::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use cfdem_core::{
        CellUid, FluidEngine, GeometrySpec, Mesh, Particle, ParticleCollection, ParticleEngine,
        ParticleId, Vec3, FLOW_PARTICLES, WALL_PARTICLES,
    };

    // Errors
    pub use cfdem_core::{EngineError, GeometryError};
    pub use cfdem_drag::DragError;
    pub use cfdem_engine::{ConfigError, CouplingError};
    pub use cfdem_space::{IndexError, LocateError};

    // Space
    pub use cfdem_space::{AxisBoundary, SpatialIndex};

    // Drag
    pub use cfdem_drag::{DragForceModel, DragInput, DragModel, ForceLaw};

    // Engine
    pub use cfdem_engine::{
        frame_channel, run_coupling, CouplingConfig, CouplingSession, CouplingWorker, Frame,
        FrameHandoff, GlobalConfig, RunOutcome, SendOutcome,
    };
}
