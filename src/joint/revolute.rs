use na::{Matrix6xX, UnitVector3, Vector3};

use crate::{spatial::transform::Transform3D, types::Float};

/// Represents a revolute joint connecting a predecessor and a successor body.
///
/// Note: the axis is expressed in the joint output frame, which coincides
/// with the joint input frame at q = 0.
#[derive(Clone, Debug, PartialEq)]
pub struct RevoluteJoint {
    pub name: String,
    pub axis: UnitVector3<Float>,
}

impl RevoluteJoint {
    pub fn new(name: &str, axis: UnitVector3<Float>) -> Self {
        Self {
            name: name.to_string(),
            axis,
        }
    }

    /// [axis; 0]
    pub fn motion_subspace(&self) -> Matrix6xX<Float> {
        let mut subspace = Matrix6xX::zeros(1);
        subspace.fixed_view_mut::<3, 1>(0, 0).copy_from(&self.axis.into_inner());
        subspace
    }

    /// Rotation about the axis by q
    pub fn transform(&self, q: Float) -> Transform3D {
        Transform3D::rotation(&self.axis, q)
    }
}

impl Default for RevoluteJoint {
    fn default() -> Self {
        RevoluteJoint::new("revolute", Vector3::z_axis())
    }
}
