//! The [`DragModel`] trait and the enum-dispatched [`DragForceModel`].

use cfdem_core::{vec3, Vec3};

use crate::coulson::CoulsonDrag;
use crate::dalla_valle::DallaValleDrag;
use crate::error::DragError;
use crate::input::DragInput;
use crate::law::ForceLaw;
use crate::stokes::StokesDrag;

/// A drag closure law.
///
/// # Contract
///
/// - `force()` is a pure function of its input.
/// - Non-finite inputs and non-finite results are reported as
///   [`DragError::NonFinite`], never returned as a force.
///
/// # Examples
///
/// ```
/// use cfdem_drag::{DragInput, DragModel, StokesDrag};
///
/// let input = DragInput {
///     relative_velocity: [1.0, 0.0, 0.0],
///     radius: 0.01,
///     viscosity: 1e-3,
///     density: 1000.0,
/// };
/// let f = StokesDrag.force(&input).unwrap();
/// assert!(f[0] > 0.0 && f[1] == 0.0);
/// ```
pub trait DragModel: Send + Sync {
    /// Tag of the law this model implements.
    fn law(&self) -> ForceLaw;

    /// Force exerted by the fluid on one particle.
    fn force(&self, input: &DragInput) -> Result<Vec3, DragError>;
}

/// The configured drag law, selected once from a [`ForceLaw`] tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragForceModel {
    /// See [`StokesDrag`].
    Stokes(StokesDrag),
    /// See [`DallaValleDrag`].
    Dala(DallaValleDrag),
    /// See [`CoulsonDrag`].
    Coul(CoulsonDrag),
}

impl DragForceModel {
    /// Model implementing `law`.
    pub fn from_law(law: ForceLaw) -> Self {
        match law {
            ForceLaw::Stokes => Self::Stokes(StokesDrag),
            ForceLaw::Dala => Self::Dala(DallaValleDrag),
            ForceLaw::Coul => Self::Coul(CoulsonDrag),
        }
    }
}

impl Default for DragForceModel {
    fn default() -> Self {
        Self::from_law(ForceLaw::default())
    }
}

impl From<ForceLaw> for DragForceModel {
    fn from(law: ForceLaw) -> Self {
        Self::from_law(law)
    }
}

impl DragModel for DragForceModel {
    fn law(&self) -> ForceLaw {
        match self {
            Self::Stokes(m) => m.law(),
            Self::Dala(m) => m.law(),
            Self::Coul(m) => m.law(),
        }
    }

    fn force(&self, input: &DragInput) -> Result<Vec3, DragError> {
        match self {
            Self::Stokes(m) => m.force(input),
            Self::Dala(m) => m.force(input),
            Self::Coul(m) => m.force(input),
        }
    }
}

/// Reject non-finite inputs before a law runs.
pub(crate) fn check_input(law: ForceLaw, input: &DragInput) -> Result<(), DragError> {
    if input.is_finite() {
        Ok(())
    } else {
        Err(DragError::NonFinite { law })
    }
}

/// Reject a non-finite force after a law runs.
pub(crate) fn check_force(law: ForceLaw, force: Vec3) -> Result<Vec3, DragError> {
    if vec3::is_finite(force) {
        Ok(force)
    } else {
        Err(DragError::NonFinite { law })
    }
}
