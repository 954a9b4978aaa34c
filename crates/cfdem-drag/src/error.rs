//! Error type for drag evaluation.

use crate::law::ForceLaw;
use std::fmt;

/// A drag law could not produce a finite force.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragError {
    /// The correlation diverges at zero relative velocity.
    ZeroRelativeVelocity {
        /// Law that was evaluated.
        law: ForceLaw,
    },
    /// An input or the resulting force is NaN or infinite.
    NonFinite {
        /// Law that was evaluated.
        law: ForceLaw,
    },
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRelativeVelocity { law } => {
                write!(f, "{law} drag is singular at zero relative velocity")
            }
            Self::NonFinite { law } => write!(f, "{law} drag produced a non-finite force"),
        }
    }
}

impl std::error::Error for DragError {}
