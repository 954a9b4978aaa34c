//! Dalla Valle drag.

use cfdem_core::{vec3, Vec3};

use crate::error::DragError;
use crate::input::DragInput;
use crate::law::ForceLaw;
use crate::model::{check_force, check_input, DragModel};

use std::f64::consts::PI;

/// `C_d = (0.63 + 4.8/√Re)²`, `F_i = ½ C_d π r² ρ |v_rel| v_rel_i`.
///
/// At zero relative velocity the coefficient is unbounded but the force
/// tends to zero (`F ∝ |v_rel|` as `Re → 0`), so the zero vector is
/// returned there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DallaValleDrag;

impl DallaValleDrag {
    /// Drag coefficient at Reynolds number `re`.
    pub fn drag_coefficient(re: f64) -> f64 {
        let c = 0.63 + 4.8 / re.sqrt();
        c * c
    }
}

impl DragModel for DallaValleDrag {
    fn law(&self) -> ForceLaw {
        ForceLaw::Dala
    }

    fn force(&self, input: &DragInput) -> Result<Vec3, DragError> {
        check_input(ForceLaw::Dala, input)?;
        let speed = input.speed();
        if speed == 0.0 {
            return Ok(vec3::ZERO);
        }
        let cd = Self::drag_coefficient(input.reynolds_number());
        let scale = 0.5 * cd * PI * input.radius * input.radius * input.density * speed;
        check_force(ForceLaw::Dala, vec3::scale(input.relative_velocity, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(v: Vec3) -> DragInput {
        DragInput {
            relative_velocity: v,
            radius: 0.02,
            viscosity: 0.0062,
            density: 1005.2,
        }
    }

    #[test]
    fn reference_fixture() {
        let f = DallaValleDrag.force(&input([1.2, 5.2, 0.2])).unwrap();
        let expected = [1.7406892534402443, 7.542986764907726, 0.29011487557337406];
        for axis in 0..3 {
            assert!((f[axis] - expected[axis]).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_relative_velocity_gives_zero_force() {
        assert_eq!(DallaValleDrag.force(&input([0.0; 3])), Ok([0.0; 3]));
    }

    #[test]
    fn tiny_relative_velocity_is_small_and_finite() {
        let f = DallaValleDrag.force(&input([1e-12, 0.0, 0.0])).unwrap();
        assert!(f[0] > 0.0 && f[0] < 1e-9);
    }

    proptest! {
        #[test]
        fn force_parallel_to_relative_velocity(
            vx in -10.0f64..10.0,
            vy in -10.0f64..10.0,
            vz in -10.0f64..10.0,
        ) {
            prop_assume!(vec3::norm([vx, vy, vz]) > 1e-6);
            let v = [vx, vy, vz];
            let f = DallaValleDrag.force(&input(v)).unwrap();
            let ratio = vec3::norm(f) / vec3::norm(v);
            for axis in 0..3 {
                prop_assert!((f[axis] - ratio * v[axis]).abs() <= 1e-9 * (1.0 + f[axis].abs()));
            }
        }
    }
}
