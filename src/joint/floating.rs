use na::{Matrix6xX, Quaternion, UnitQuaternion, Vector3};

use crate::{spatial::transform::Transform3D, types::Float};

/// A 6-dof joint. Its position is parameterized by a quaternion
/// [w, x, y, z] followed by a translation [x, y, z].
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingJoint {
    pub name: String,
}

impl FloatingJoint {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Identity: the joint velocity is the twist of the output frame,
    /// expressed in the output frame.
    pub fn motion_subspace(&self) -> Matrix6xX<Float> {
        Matrix6xX::from_fn(6, |i, j| if i == j { 1. } else { 0. })
    }

    pub fn transform(&self, q: &[Float]) -> Transform3D {
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(q[0], q[1], q[2], q[3]));
        let translation = Vector3::new(q[4], q[5], q[6]);
        Transform3D::from_parts(translation, rotation)
    }
}
