//! Reference force values for every law, selected by configuration tag.

use cfdem_drag::{DragError, DragForceModel, DragInput, DragModel, ForceLaw};

fn fixture() -> DragInput {
    DragInput::new([1.2, 5.2, 0.2], [0.0; 3], 0.02, 0.0062, 1005.2)
}

fn assert_close(actual: [f64; 3], expected: [f64; 3], tol: f64) {
    for axis in 0..3 {
        assert!(
            (actual[axis] - expected[axis]).abs() < tol,
            "axis {axis}: {} != {}",
            actual[axis],
            expected[axis]
        );
    }
}

fn model(tag: &str) -> DragForceModel {
    DragForceModel::from_law(tag.parse::<ForceLaw>().unwrap())
}

#[test]
fn stokes_by_tag() {
    let f = model("Stokes").force(&fixture()).unwrap();
    assert_close(f, [0.0028048, 0.0121542, 0.0004675], 1e-7);
}

#[test]
fn dala_by_tag() {
    let f = model("Dala").force(&fixture()).unwrap();
    assert_close(f, [1.740689, 7.542987, 0.290115], 1e-6);
}

#[test]
fn coul_by_tag() {
    let f = model("Coul").force(&fixture()).unwrap();
    assert_close(f, [1.301003; 3], 1e-6);
}

#[test]
fn zero_relative_velocity_policy() {
    let at_rest = DragInput::new([0.3, 0.0, 0.0], [0.3, 0.0, 0.0], 0.02, 0.0062, 1005.2);
    assert_eq!(model("Stokes").force(&at_rest), Ok([0.0; 3]));
    assert_eq!(model("Dala").force(&at_rest), Ok([0.0; 3]));
    assert_eq!(
        model("Coul").force(&at_rest),
        Err(DragError::ZeroRelativeVelocity {
            law: ForceLaw::Coul
        })
    );
}

#[test]
fn unknown_tag_is_a_parse_error() {
    assert!("Ergun".parse::<ForceLaw>().is_err());
}
