use na::Matrix6xX;

use crate::{spatial::transform::Transform3D, types::Float};

/// A joint without degrees of freedom. Useful as the root of a mechanism
/// bolted to the world, or to rigidly attach a body to its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedJoint {
    pub name: String,
}

impl FixedJoint {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn motion_subspace(&self) -> Matrix6xX<Float> {
        Matrix6xX::zeros(0)
    }

    pub fn transform(&self) -> Transform3D {
        Transform3D::identity()
    }
}
