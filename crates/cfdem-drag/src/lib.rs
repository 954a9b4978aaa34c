//! Interphase drag closure laws for the cfdem coupling kernel.
//!
//! Each law converts the local fluid/particle relative velocity, the
//! particle radius and the fluid properties into a force vector:
//!
//! - [`StokesDrag`]: linear creeping-flow drag.
//! - [`DallaValleDrag`]: drag coefficient `(0.63 + 4.8/√Re)²`.
//! - [`CoulsonDrag`]: Reynolds-number correlation applied as a scalar on
//!   every axis.
//!
//! The law is chosen once from a [`ForceLaw`] tag and evaluated through
//! [`DragForceModel`], which dispatches by `match` rather than by name.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coulson;
pub mod dalla_valle;
pub mod error;
pub mod input;
pub mod law;
pub mod model;
pub mod stokes;

pub use coulson::CoulsonDrag;
pub use dalla_valle::DallaValleDrag;
pub use error::DragError;
pub use input::DragInput;
pub use law::{ForceLaw, ParseForceLawError};
pub use model::{DragForceModel, DragModel};
pub use stokes::StokesDrag;
