//! Coulson and Richardson drag.

use cfdem_core::Vec3;

use crate::error::DragError;
use crate::input::DragInput;
use crate::law::ForceLaw;
use crate::model::{check_force, check_input, DragModel};

use std::f64::consts::PI;

/// `F = π r² ρ |v_rel| (1.84 Re^-0.31 + 0.293 Re^0.06)^3.45` on every axis.
///
/// The same scalar is written to all three components; the force does not
/// follow the direction of the relative velocity. This isotropic output is
/// kept as the established behaviour of the law in this kernel.
///
/// The correlation grows as `|v_rel|^-0.07` near zero relative velocity
/// and diverges at zero, which is reported as
/// [`DragError::ZeroRelativeVelocity`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoulsonDrag;

impl CoulsonDrag {
    /// Scalar force magnitude for a given speed and Reynolds number.
    fn magnitude(input: &DragInput, speed: f64) -> f64 {
        let re = input.reynolds_number();
        let correlation = (1.84 * re.powf(-0.31) + 0.293 * re.powf(0.06)).powf(3.45);
        PI * input.radius * input.radius * input.density * speed * correlation
    }
}

impl DragModel for CoulsonDrag {
    fn law(&self) -> ForceLaw {
        ForceLaw::Coul
    }

    fn force(&self, input: &DragInput) -> Result<Vec3, DragError> {
        check_input(ForceLaw::Coul, input)?;
        let speed = input.speed();
        if speed == 0.0 {
            return Err(DragError::ZeroRelativeVelocity {
                law: ForceLaw::Coul,
            });
        }
        let f = Self::magnitude(input, speed);
        check_force(ForceLaw::Coul, [f; 3])
    }
}
