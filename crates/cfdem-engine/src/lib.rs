//! Coupling loop, frame handoff and background worker for cfdem.
//!
//! The kernel drives two external solvers in lockstep. Each iteration:
//!
//! 1. advance the [`FluidEngine`](cfdem_core::FluidEngine);
//! 2. locate every flow particle in the fluid mesh through the
//!    [`SpatialIndex`](cfdem_space::SpatialIndex) and apply the configured
//!    drag law;
//! 3. advance the [`ParticleEngine`](cfdem_core::ParticleEngine);
//! 4. snapshot both into a [`Frame`] and, every `update_frequency`
//!    iterations, hand it to the consumer through a [`FrameHandoff`].
//!
//! Delivery is single-slot with a bounded acknowledgement wait. A consumer
//! that stops acknowledging ends the run with [`RunOutcome::Aborted`]
//! instead of blocking the physics forever.
//!
//! [`run_coupling`] runs everything on the calling thread;
//! [`CouplingWorker`] runs a prepared [`CouplingSession`] on its own
//! thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod frame;
pub mod handoff;
pub mod metrics;
pub mod session;
pub mod worker;

pub use config::{
    ConfigError, CouplingConfig, FluidConfig, GlobalConfig, HandoffConfig, ParticleConfig,
};
pub use error::{CouplingError, ErrorKind};
pub use frame::Frame;
pub use handoff::{
    ack_pair, frame_channel, AckSignal, AckToken, AckWaiter, Delivery, FrameConsumer,
    FrameHandoff, FrameReceiver, FrameSender, SendOutcome,
};
pub use metrics::RunMetrics;
pub use session::{run_coupling, CouplingSession, LoopPhase, RunOutcome};
pub use worker::{CouplingWorker, RunReport, WorkerError};
