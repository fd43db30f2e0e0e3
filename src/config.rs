use crate::{
    error::JacobianError, mechanism::Mechanism, spatial::transform::Transform3D, types::Float,
};

/// Per-instant state of a mechanism.
///
/// `joint_config` and `body_pos_w` are derived from `q` by
/// [`forward_kinematics`](crate::kinematics::forward_kinematics) and are only
/// meaningful after it has run.
#[derive(Clone, Debug, PartialEq)]
pub struct MechanismConfig {
    pub q: Vec<Vec<Float>>,     // joint positions, one entry per joint
    pub alpha: Vec<Vec<Float>>, // joint velocities, one entry per joint
    pub joint_config: Vec<Transform3D>, // joint output frame to joint input frame
    pub body_pos_w: Vec<Transform3D>,   // body frame to world frame
}

impl MechanismConfig {
    /// The neutral configuration: every joint at its zero position and at
    /// rest, every transform identity.
    pub fn new(mechanism: &Mechanism) -> Self {
        MechanismConfig {
            q: mechanism.joints().iter().map(|j| j.zero_param()).collect(),
            alpha: mechanism.joints().iter().map(|j| j.zero_dof()).collect(),
            joint_config: vec![Transform3D::identity(); mechanism.joint_count()],
            body_pos_w: vec![Transform3D::identity(); mechanism.body_count()],
        }
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), JacobianError> {
    if expected != actual {
        return Err(JacobianError::ConfigSizeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

pub fn check_match_body_pos(
    mechanism: &Mechanism,
    config: &MechanismConfig,
) -> Result<(), JacobianError> {
    check_len("body_pos_w", mechanism.body_count(), config.body_pos_w.len())
}

pub fn check_match_joint_config(
    mechanism: &Mechanism,
    config: &MechanismConfig,
) -> Result<(), JacobianError> {
    check_len(
        "joint_config",
        mechanism.joint_count(),
        config.joint_config.len(),
    )
}

/// Checks both the number of joints and the parameter count of each joint.
pub fn check_match_q(mechanism: &Mechanism, config: &MechanismConfig) -> Result<(), JacobianError> {
    check_len("q", mechanism.joint_count(), config.q.len())?;
    for (joint, q) in mechanism.joints().iter().zip(config.q.iter()) {
        check_len("q", joint.params(), q.len())?;
    }
    Ok(())
}

/// Checks both the number of joints and the dof of each joint.
pub fn check_match_alpha(
    mechanism: &Mechanism,
    config: &MechanismConfig,
) -> Result<(), JacobianError> {
    check_len("alpha", mechanism.joint_count(), config.alpha.len())?;
    for (joint, alpha) in mechanism.joints().iter().zip(config.alpha.iter()) {
        check_len("alpha", joint.dof(), alpha.len())?;
    }
    Ok(())
}
