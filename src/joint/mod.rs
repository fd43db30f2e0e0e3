use fixed::FixedJoint;
use floating::FloatingJoint;
use na::{Matrix6xX, UnitVector3};
use prismatic::PrismaticJoint;
use revolute::RevoluteJoint;

use crate::{spatial::transform::Transform3D, types::Float};

pub mod fixed;
pub mod floating;
pub mod prismatic;
pub mod revolute;

#[derive(Clone, Debug, PartialEq)]
pub enum Joint {
    RevoluteJoint(RevoluteJoint),
    PrismaticJoint(PrismaticJoint),
    FixedJoint(FixedJoint),
    FloatingJoint(FloatingJoint),
}

impl Joint {
    pub fn new_revolute(name: &str, axis: UnitVector3<Float>) -> Self {
        Joint::RevoluteJoint(RevoluteJoint::new(name, axis))
    }

    pub fn new_prismatic(name: &str, axis: UnitVector3<Float>) -> Self {
        Joint::PrismaticJoint(PrismaticJoint::new(name, axis))
    }

    pub fn new_fixed(name: &str) -> Self {
        Joint::FixedJoint(FixedJoint::new(name))
    }

    pub fn new_floating(name: &str) -> Self {
        Joint::FloatingJoint(FloatingJoint::new(name))
    }

    pub fn name(&self) -> &str {
        match self {
            Joint::RevoluteJoint(joint) => &joint.name,
            Joint::PrismaticJoint(joint) => &joint.name,
            Joint::FixedJoint(joint) => &joint.name,
            Joint::FloatingJoint(joint) => &joint.name,
        }
    }

    /// Number of velocity coordinates of the joint
    pub fn dof(&self) -> usize {
        match self {
            Joint::RevoluteJoint(_) | Joint::PrismaticJoint(_) => 1,
            Joint::FixedJoint(_) => 0,
            Joint::FloatingJoint(_) => 6,
        }
    }

    /// Number of position coordinates of the joint
    pub fn params(&self) -> usize {
        match self {
            Joint::RevoluteJoint(_) | Joint::PrismaticJoint(_) => 1,
            Joint::FixedJoint(_) => 0,
            Joint::FloatingJoint(_) => 7,
        }
    }

    /// 6 x dof matrix mapping joint velocity to the twist of the joint output
    /// frame relative to the input frame, expressed in the output frame.
    pub fn motion_subspace(&self) -> Matrix6xX<Float> {
        match self {
            Joint::RevoluteJoint(joint) => joint.motion_subspace(),
            Joint::PrismaticJoint(joint) => joint.motion_subspace(),
            Joint::FixedJoint(joint) => joint.motion_subspace(),
            Joint::FloatingJoint(joint) => joint.motion_subspace(),
        }
    }

    /// Pose of the joint output frame in the joint input frame at position q.
    /// q must hold `params()` values.
    pub fn transform(&self, q: &[Float]) -> Transform3D {
        match self {
            Joint::RevoluteJoint(joint) => joint.transform(q[0]),
            Joint::PrismaticJoint(joint) => joint.transform(q[0]),
            Joint::FixedJoint(joint) => joint.transform(),
            Joint::FloatingJoint(joint) => joint.transform(q),
        }
    }

    /// Position at which `transform` returns the identity.
    pub fn zero_param(&self) -> Vec<Float> {
        match self {
            Joint::FloatingJoint(_) => vec![1., 0., 0., 0., 0., 0., 0.],
            _ => vec![0.; self.params()],
        }
    }

    pub fn zero_dof(&self) -> Vec<Float> {
        vec![0.; self.dof()]
    }
}
