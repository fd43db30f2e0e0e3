use na::{UnitVector3, Vector3};

use crate::{
    joint::Joint, mechanism::Mechanism, rigid_body::RigidBody, spatial::transform::Transform3D,
    types::Float,
};

/// Build a planar chain of `n` revolute joints rotating about z. Joint 0
/// sits at the world origin, every following joint `link_length` further
/// along the x axis of its predecessor. Body ids equal body indices.
pub fn build_serial_chain(n: usize, link_length: Float) -> Mechanism {
    build_chain_with_axes(&vec![Vector3::z_axis(); n], link_length)
}

/// Like [`build_serial_chain`], one revolute joint per given axis.
pub fn build_chain_with_axes(axes: &[UnitVector3<Float>], link_length: Float) -> Mechanism {
    let n = axes.len();
    let bodies = (0..n)
        .map(|i| RigidBody::new(i, &format!("link{}", i)))
        .collect();
    let joints = axes
        .iter()
        .enumerate()
        .map(|(i, axis)| Joint::new_revolute(&format!("joint{}", i), *axis))
        .collect();
    let parents = (0..n).map(|i| i.checked_sub(1)).collect();
    let transforms_in = (0..n)
        .map(|i| {
            if i == 0 {
                Transform3D::identity()
            } else {
                Transform3D::move_x(link_length)
            }
        })
        .collect();
    let transforms_out = vec![Transform3D::identity(); n];

    Mechanism::from_tree(bodies, joints, parents, transforms_in, transforms_out)
        .expect("chain arrays are consistent")
}

/// Build the following tree, every link of length 1:
///
/// ```text
///              3 -- 4
///             /
/// 0 -- 1 -- 2
///             \
///              5
/// ```
///
/// Joint 0 is fixed to the world, joint 4 is prismatic along x, the other
/// joints are revolute about z. Body ids are 100 + index.
pub fn build_branching_tree() -> Mechanism {
    let bodies = (0..6)
        .map(|i| RigidBody::new(100 + i, &format!("link{}", i)))
        .collect();
    let joints = vec![
        Joint::new_fixed("root"),
        Joint::new_revolute("joint1", Vector3::z_axis()),
        Joint::new_revolute("joint2", Vector3::z_axis()),
        Joint::new_revolute("joint3", Vector3::z_axis()),
        Joint::new_prismatic("joint4", Vector3::x_axis()),
        Joint::new_revolute("joint5", Vector3::z_axis()),
    ];
    let parents = vec![None, Some(0), Some(1), Some(2), Some(3), Some(2)];
    let transforms_in = vec![
        Transform3D::identity(),
        Transform3D::move_x(1.0),
        Transform3D::move_x(1.0),
        Transform3D::move_xyz(1.0, 1.0, 0.0),
        Transform3D::move_x(1.0),
        Transform3D::move_xyz(1.0, -1.0, 0.0),
    ];
    let transforms_out = vec![Transform3D::identity(); 6];

    Mechanism::from_tree(bodies, joints, parents, transforms_in, transforms_out)
        .expect("tree arrays are consistent")
}
