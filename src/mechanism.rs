use std::collections::{HashMap, HashSet};

use itertools::izip;

use crate::{
    error::JacobianError, joint::Joint, rigid_body::RigidBody,
    spatial::transform::Transform3D,
};

/// Static description of an articulated rigid-body tree.
///
/// Bodies and joints live in flat arrays. Joint i moves body i (its
/// successor) relative to its predecessor body, which is `None` when the
/// joint hangs from the world. Per joint, two fixed transforms frame the
/// joint motion:
///
/// ```text
/// pose(successor) = pose(predecessor) * transform_in * joint(q) * transform_out
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Mechanism {
    bodies: Vec<RigidBody>,
    joints: Vec<Joint>,
    predecessors: Vec<Option<usize>>,
    successors: Vec<usize>,
    parents: Vec<Option<usize>>,
    transforms_in: Vec<Transform3D>,  // joint input frame to predecessor body frame
    transforms_out: Vec<Transform3D>, // successor body frame to joint output frame

    body_index_by_id: HashMap<usize, usize>,
    joint_pos_in_dof: Vec<usize>,
    n_params: usize,
    n_dof: usize,
}

impl Mechanism {
    /// Build a mechanism from parallel per-joint arrays.
    ///
    /// Joints must be ordered parents first, and joint i must have body i as
    /// successor.
    pub fn new(
        bodies: Vec<RigidBody>,
        joints: Vec<Joint>,
        predecessors: Vec<Option<usize>>,
        successors: Vec<usize>,
        parents: Vec<Option<usize>>,
        transforms_in: Vec<Transform3D>,
        transforms_out: Vec<Transform3D>,
    ) -> Result<Self, JacobianError> {
        let n = joints.len();
        let lengths = [
            ("bodies", bodies.len()),
            ("predecessors", predecessors.len()),
            ("successors", successors.len()),
            ("parents", parents.len()),
            ("transforms_in", transforms_in.len()),
            ("transforms_out", transforms_out.len()),
        ];
        for (what, len) in lengths {
            if len != n {
                return Err(JacobianError::InvalidMechanism(format!(
                    "{} joints but {} {}",
                    n, len, what
                )));
            }
        }

        for (i, (pred, succ, parent)) in
            izip!(predecessors.iter(), successors.iter(), parents.iter()).enumerate()
        {
            if *succ != i {
                return Err(JacobianError::InvalidMechanism(format!(
                    "joint {} has successor {}, expected {}",
                    i, succ, i
                )));
            }
            if pred != parent {
                return Err(JacobianError::InvalidMechanism(format!(
                    "joint {} has predecessor {:?} but parent {:?}",
                    i, pred, parent
                )));
            }
            if let Some(p) = parent {
                if *p >= i {
                    return Err(JacobianError::InvalidMechanism(format!(
                        "joint {} has parent {}, parents must come first",
                        i, p
                    )));
                }
            }
        }

        let mut ids = HashSet::with_capacity(n);
        for body in bodies.iter() {
            if !ids.insert(body.id) {
                return Err(JacobianError::InvalidMechanism(format!(
                    "duplicate body id {}",
                    body.id
                )));
            }
        }

        Ok(Mechanism::new_unchecked(
            bodies,
            joints,
            predecessors,
            successors,
            parents,
            transforms_in,
            transforms_out,
        ))
    }

    /// Assemble a mechanism whose arrays are known to be consistent.
    pub(crate) fn new_unchecked(
        bodies: Vec<RigidBody>,
        joints: Vec<Joint>,
        predecessors: Vec<Option<usize>>,
        successors: Vec<usize>,
        parents: Vec<Option<usize>>,
        transforms_in: Vec<Transform3D>,
        transforms_out: Vec<Transform3D>,
    ) -> Self {
        let n = joints.len();
        let body_index_by_id = bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (body.id, index))
            .collect();

        let mut joint_pos_in_dof = Vec::with_capacity(n);
        let mut n_params = 0;
        let mut n_dof = 0;
        for joint in joints.iter() {
            joint_pos_in_dof.push(n_dof);
            n_params += joint.params();
            n_dof += joint.dof();
        }

        Mechanism {
            bodies,
            joints,
            predecessors,
            successors,
            parents,
            transforms_in,
            transforms_out,
            body_index_by_id,
            joint_pos_in_dof,
            n_params,
            n_dof,
        }
    }

    /// Build a tree from a parent list alone: predecessor equals parent and
    /// joint i moves body i.
    pub fn from_tree(
        bodies: Vec<RigidBody>,
        joints: Vec<Joint>,
        parents: Vec<Option<usize>>,
        transforms_in: Vec<Transform3D>,
        transforms_out: Vec<Transform3D>,
    ) -> Result<Self, JacobianError> {
        let successors = (0..joints.len()).collect();
        let predecessors = parents.clone();
        Mechanism::new(
            bodies,
            joints,
            predecessors,
            successors,
            parents,
            transforms_in,
            transforms_out,
        )
    }

    pub fn body(&self, index: usize) -> &RigidBody {
        &self.bodies[index]
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn joint(&self, index: usize) -> &Joint {
        &self.joints[index]
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents[index]
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    pub fn predecessor(&self, index: usize) -> Option<usize> {
        self.predecessors[index]
    }

    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    pub fn successor(&self, index: usize) -> usize {
        self.successors[index]
    }

    pub fn successors(&self) -> &[usize] {
        &self.successors
    }

    pub fn transform_in(&self, index: usize) -> &Transform3D {
        &self.transforms_in[index]
    }

    pub fn transforms_in(&self) -> &[Transform3D] {
        &self.transforms_in
    }

    pub fn transform_out(&self, index: usize) -> &Transform3D {
        &self.transforms_out[index]
    }

    pub fn transforms_out(&self) -> &[Transform3D] {
        &self.transforms_out
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Total number of velocity coordinates
    pub fn dof(&self) -> usize {
        self.n_dof
    }

    /// Total number of position coordinates
    pub fn params(&self) -> usize {
        self.n_params
    }

    pub fn body_index_by_id(&self, id: usize) -> Option<usize> {
        self.body_index_by_id.get(&id).copied()
    }

    /// Offset of each joint in the full joint velocity vector
    pub fn joint_pos_in_dof(&self, index: usize) -> usize {
        self.joint_pos_in_dof[index]
    }
}
