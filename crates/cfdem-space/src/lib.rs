//! Uniform-grid spatial index for the cfdem coupling kernel.
//!
//! A [`SpatialIndex`] is built once from a structured fluid mesh and then
//! answers point-to-cell queries for every particle on every iteration.
//! Out-of-range grid indices at the domain faces are resolved per axis by
//! [`wrap_axis_index`] according to an [`AxisBoundary`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod index;

pub use boundary::{wrap_axis_index, AxisBoundary};
pub use error::{IndexError, LocateError};
pub use index::{Bucket, SpatialIndex};
