use na::{Matrix6xX, UnitVector3};

use crate::{spatial::transform::Transform3D, types::Float};

/// Represents a prismatic joint connecting a predecessor and a successor body.
#[derive(Clone, Debug, PartialEq)]
pub struct PrismaticJoint {
    pub name: String,
    pub axis: UnitVector3<Float>, // axis expressed in joint output frame
}

impl PrismaticJoint {
    pub fn new(name: &str, axis: UnitVector3<Float>) -> Self {
        Self {
            name: name.to_string(),
            axis,
        }
    }

    /// [0; axis]
    pub fn motion_subspace(&self) -> Matrix6xX<Float> {
        let mut subspace = Matrix6xX::zeros(1);
        subspace.fixed_view_mut::<3, 1>(3, 0).copy_from(&self.axis.into_inner());
        subspace
    }

    /// Translation along the axis by q
    pub fn transform(&self, q: Float) -> Transform3D {
        Transform3D::translation(&self.axis, q)
    }
}
