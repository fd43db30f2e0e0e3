use na::{Vector3, Vector6};

use crate::types::Float;

/// A 6-dimensional motion vector: angular velocity stacked over the linear
/// velocity of the point at the origin of the frame it is expressed in.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct SpatialVector {
    pub angular: Vector3<Float>,
    pub linear: Vector3<Float>,
}

impl SpatialVector {
    pub fn new(angular: Vector3<Float>, linear: Vector3<Float>) -> Self {
        SpatialVector { angular, linear }
    }

    /// Split a stacked [angular; linear] vector.
    pub fn from_vector6(v: &Vector6<Float>) -> Self {
        SpatialVector::new(
            v.fixed_rows::<3>(0).into_owned(),
            v.fixed_rows::<3>(3).into_owned(),
        )
    }

    pub fn as_vector6(&self) -> Vector6<Float> {
        Vector6::new(
            self.angular.x,
            self.angular.y,
            self.angular.z,
            self.linear.x,
            self.linear.y,
            self.linear.z,
        )
    }
}
