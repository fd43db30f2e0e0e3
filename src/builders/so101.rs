use na::Vector3;

use crate::{
    joint::Joint, mechanism::Mechanism, rigid_body::RigidBody, spatial::transform::Transform3D,
};

/// Body ids of the SO-Arm 101, in joint order.
pub const SO101_BASE: usize = 0;
pub const SO101_SHOULDER: usize = 1;
pub const SO101_UPPER_ARM: usize = 2;
pub const SO101_LOWER_ARM: usize = 3;
pub const SO101_WRIST: usize = 4;
pub const SO101_GRIPPER: usize = 5;
pub const SO101_JAW: usize = 6;

/// Build the kinematic tree of the SO-Arm 101 from its URDF description.
/// The base is bolted to the world and the chain ends at the moving jaw.
/// Ref: https://github.com/TheRobotStudio/SO-ARM100/blob/main/Simulation/SO101/so101_new_calib.urdf
pub fn build_so101() -> Mechanism {
    let shoulder_to_base = Transform3D::new_xyz_rpy(
        &[0.0388353, -8.97657e-09, 0.0624],
        &[3.14159, 4.18253e-17, -3.14159],
    );
    let upper_arm_to_shoulder = Transform3D::new_xyz_rpy(
        &[-0.0303992, -0.0182778, -0.054],
        &[-1.5708, -1.5708, 0.],
    );
    let lower_arm_to_upper_arm = Transform3D::new_xyz_rpy(
        &[-0.11257, -0.028, 1.73763e-16],
        &[-3.63608e-16, 8.74301e-16, 1.5708],
    );
    let wrist_to_lower_arm = Transform3D::new_xyz_rpy(
        &[-0.1349, 0.0052, 3.62355e-17],
        &[4.02456e-15, 8.67362e-16, -1.5708],
    );
    let gripper_to_wrist = Transform3D::new_xyz_rpy(
        &[5.55112e-17, -0.0611, 0.0181],
        &[1.5708, 0.0486795, 3.14159],
    );
    let jaw_to_gripper = Transform3D::new_xyz_rpy(
        &[0.0202, 0.0188, -0.0234],
        &[1.5708, -5.24284e-08, -1.41553e-15],
    );

    let joints = vec![
        Joint::new_fixed("base"),
        Joint::new_revolute("shoulder_pan", Vector3::z_axis()),
        Joint::new_revolute("shoulder_lift", Vector3::z_axis()),
        Joint::new_revolute("elbow_flex", Vector3::z_axis()),
        Joint::new_revolute("wrist_flex", Vector3::z_axis()),
        Joint::new_revolute("wrist_roll", Vector3::z_axis()),
        Joint::new_revolute("gripper", Vector3::z_axis()),
    ];
    let bodies = vec![
        RigidBody::new(SO101_BASE, "base"),
        RigidBody::new(SO101_SHOULDER, "shoulder"),
        RigidBody::new(SO101_UPPER_ARM, "upper_arm"),
        RigidBody::new(SO101_LOWER_ARM, "lower_arm"),
        RigidBody::new(SO101_WRIST, "wrist"),
        RigidBody::new(SO101_GRIPPER, "gripper"),
        RigidBody::new(SO101_JAW, "jaw"),
    ];
    let parents = vec![None, Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)];
    let transforms_in = vec![
        Transform3D::identity(),
        shoulder_to_base,
        upper_arm_to_shoulder,
        lower_arm_to_upper_arm,
        wrist_to_lower_arm,
        gripper_to_wrist,
        jaw_to_gripper,
    ];

    Mechanism::from_tree(
        bodies,
        joints,
        parents,
        transforms_in,
        vec![Transform3D::identity(); 7],
    )
    .expect("so101 arrays are consistent")
}
