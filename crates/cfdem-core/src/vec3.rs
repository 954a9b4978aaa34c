//! Fixed-size 3-vector helpers.
//!
//! Coordinates, velocities and forces are plain `[f64; 3]` arrays. The
//! handful of operations the kernel needs live here as free functions.

/// A 3-component vector (x, y, z).
pub type Vec3 = [f64; 3];

/// The zero vector.
pub const ZERO: Vec3 = [0.0; 3];

/// Component-wise `a - b`.
#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Component-wise `a + b`.
#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// `v * s`.
#[inline]
pub fn scale(v: Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Euclidean norm.
#[inline]
pub fn norm(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Component-wise minimum.
#[inline]
pub fn min(a: Vec3, b: Vec3) -> Vec3 {
    [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])]
}

/// `true` if every component is finite.
#[inline]
pub fn is_finite(v: Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_of_pythagorean_triple() {
        assert!((norm([3.0, 4.0, 0.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn sub_then_add_restores() {
        let a = [1.5, -2.0, 0.25];
        let b = [0.5, 4.0, -1.0];
        assert_eq!(add(sub(a, b), b), a);
    }

    #[test]
    fn min_is_componentwise() {
        assert_eq!(min([1.0, 5.0, -1.0], [2.0, 3.0, -4.0]), [1.0, 3.0, -4.0]);
    }

    #[test]
    fn finite_check_rejects_nan_and_inf() {
        assert!(is_finite([0.0, 1.0, 2.0]));
        assert!(!is_finite([f64::NAN, 0.0, 0.0]));
        assert!(!is_finite([0.0, f64::INFINITY, 0.0]));
    }
}
