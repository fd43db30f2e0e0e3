use na::{Matrix3, Vector3};

use crate::types::Float;

/// Skew-symmetric matrix of v, such that skew_symmetric(v) * w == v x w
#[rustfmt::skip]
pub fn skew_symmetric(v: &Vector3<Float>) -> Matrix3<Float> {
    Matrix3::new(
        0., -v.z, v.y,
        v.z, 0., -v.x,
        -v.y, v.x, 0.,
    )
}

#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        let tol = $tolerance;
        let diff = (left - right).abs();
        if diff > tol {
            panic!(
                "assertion failed: {} ~= {} \
                (tolerance: {}, difference: {})",
                left, right, tol, diff
            );
        }
    };
}

#[macro_export]
macro_rules! assert_vec_close {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        assert_eq!(left.len(), right.len(), "length mismatch");
        let tol = $tolerance;
        for (a, b) in left.iter().zip(right.iter()) {
            $crate::assert_close!(a, b, tol);
        }
    };
}
