use itertools::izip;

use crate::{
    config::{check_match_body_pos, check_match_joint_config, check_match_q, MechanismConfig},
    error::JacobianError,
    mechanism::Mechanism,
    spatial::transform::Transform3D,
};

/// Refresh `joint_config` and `body_pos_w` from `q`.
///
/// Joints are visited in index order, which puts every parent before its
/// children. Sizes are assumed to match; see [`checked_forward_kinematics`].
pub fn forward_kinematics(mechanism: &Mechanism, config: &mut MechanismConfig) {
    for (i, (joint, q)) in izip!(mechanism.joints().iter(), config.q.iter()).enumerate() {
        let joint_config = joint.transform(q);
        let pred_to_world = match mechanism.predecessor(i) {
            Some(pred) => config.body_pos_w[pred],
            None => Transform3D::identity(),
        };
        let body_to_world = pred_to_world
            * *mechanism.transform_in(i)
            * joint_config
            * *mechanism.transform_out(i);

        config.joint_config[i] = joint_config;
        config.body_pos_w[mechanism.successor(i)] = body_to_world;
    }
}

/// [`forward_kinematics`] after validating every array of the configuration.
pub fn checked_forward_kinematics(
    mechanism: &Mechanism,
    config: &mut MechanismConfig,
) -> Result<(), JacobianError> {
    check_match_q(mechanism, config)?;
    check_match_joint_config(mechanism, config)?;
    check_match_body_pos(mechanism, config)?;

    forward_kinematics(mechanism, config);
    Ok(())
}
