//! Linear Stokes drag.

use cfdem_core::{vec3, Vec3};

use crate::error::DragError;
use crate::input::DragInput;
use crate::law::ForceLaw;
use crate::model::{check_force, check_input, DragModel};

use std::f64::consts::PI;

/// `F_i = 6π μ r v_rel_i`, each axis independently.
///
/// Valid for creeping flow. Density is not used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StokesDrag;

impl DragModel for StokesDrag {
    fn law(&self) -> ForceLaw {
        ForceLaw::Stokes
    }

    fn force(&self, input: &DragInput) -> Result<Vec3, DragError> {
        check_input(ForceLaw::Stokes, input)?;
        let coefficient = 3.0 * PI * input.viscosity * input.radius * 2.0;
        check_force(
            ForceLaw::Stokes,
            vec3::scale(input.relative_velocity, coefficient),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_fixture() {
        let input = DragInput {
            relative_velocity: [1.2, 5.2, 0.2],
            radius: 0.02,
            viscosity: 0.0062,
            density: 1005.2,
        };
        let f = StokesDrag.force(&input).unwrap();
        let expected = [
            0.0028048139211249673,
            0.012154193658208192,
            0.00046746898685416123,
        ];
        for axis in 0..3 {
            assert!((f[axis] - expected[axis]).abs() < 1e-15);
        }
    }

    #[test]
    fn zero_velocity_gives_zero_force() {
        let input = DragInput {
            relative_velocity: [0.0; 3],
            radius: 0.02,
            viscosity: 0.0062,
            density: 1005.2,
        };
        assert_eq!(StokesDrag.force(&input), Ok([0.0; 3]));
    }

    proptest! {
        #[test]
        fn linear_in_relative_velocity(
            vx in -10.0f64..10.0,
            vy in -10.0f64..10.0,
            vz in -10.0f64..10.0,
            k in -5.0f64..5.0,
        ) {
            let base = DragInput {
                relative_velocity: [vx, vy, vz],
                radius: 0.01,
                viscosity: 1e-3,
                density: 1000.0,
            };
            let scaled = DragInput {
                relative_velocity: vec3::scale(base.relative_velocity, k),
                ..base
            };
            let f = StokesDrag.force(&base).unwrap();
            let g = StokesDrag.force(&scaled).unwrap();
            for axis in 0..3 {
                prop_assert!((g[axis] - k * f[axis]).abs() <= 1e-12 * (1.0 + f[axis].abs()));
            }
        }
    }
}
