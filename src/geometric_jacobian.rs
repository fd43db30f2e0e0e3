use na::{DVector, Matrix6xX, Vector3, Vector6};
use tracing::{debug, warn};

use crate::{
    config::{check_match_alpha, check_match_body_pos, check_match_joint_config, MechanismConfig},
    error::JacobianError,
    mechanism::Mechanism,
    spatial::{spatial_vector::SpatialVector, transform::Transform3D},
    types::Float,
};

/// A geometric Jacobian maps the velocities of the joints between the root
/// of a mechanism and a target body to the spatial velocity of a point
/// attached to that body.
///
/// The joint path is computed once, at construction. Each column block of
/// the matrix belongs to one joint of the path, in root-to-target order, so
/// joint velocities must be supplied in that same order.
///
/// The result is expressed in a frame located at the point and oriented
/// like the world frame. Rows 0..3 hold the angular part, rows 3..6 the
/// linear velocity of the point.
///
/// The matrix is owned by the Jacobian and overwritten by every compute
/// call: the reference returned by [`GeometricJacobian::jacobian`] borrows
/// `self` mutably, so it has to be dropped (or cloned) before the next call.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometricJacobian {
    joints_path: Vec<usize>,
    dof: usize,
    point: Vector3<Float>,
    jac: Matrix6xX<Float>,
}

impl GeometricJacobian {
    /// Jacobian of the origin of body `body_id`.
    pub fn new(mechanism: &Mechanism, body_id: usize) -> Result<Self, JacobianError> {
        GeometricJacobian::with_point(mechanism, body_id, Vector3::zeros())
    }

    /// Jacobian of `point`, given in the frame of body `body_id`.
    ///
    /// Walks from the body up to the root through the parent relation. No
    /// check is made against any other mechanism the Jacobian may later be
    /// evaluated with; see the `checked_` methods for that.
    pub fn with_point(
        mechanism: &Mechanism,
        body_id: usize,
        point: Vector3<Float>,
    ) -> Result<Self, JacobianError> {
        let index = mechanism
            .body_index_by_id(body_id)
            .ok_or(JacobianError::UnknownBody(body_id))?;

        let mut joints_path = vec![];
        let mut dof = 0;
        let mut current = Some(index);
        while let Some(i) = current {
            joints_path.push(i);
            dof += mechanism.joint(i).dof();
            current = mechanism.parent(i);
        }
        joints_path.reverse();

        debug!(
            body_id,
            path_len = joints_path.len(),
            dof,
            "built joint path"
        );

        Ok(GeometricJacobian {
            joints_path,
            dof,
            point,
            jac: Matrix6xX::zeros(dof),
        })
    }

    /// Joint indices from the root to the target body, target last.
    pub fn joints_path(&self) -> &[usize] {
        &self.joints_path
    }

    /// Number of columns of the Jacobian.
    pub fn dof(&self) -> usize {
        self.dof
    }

    /// The point, in the target body frame.
    pub fn point(&self) -> &Vector3<Float> {
        &self.point
    }

    /// Result of the last compute call.
    pub fn matrix(&self) -> &Matrix6xX<Float> {
        &self.jac
    }

    fn target(&self) -> usize {
        self.joints_path[self.joints_path.len() - 1]
    }

    fn max_path_index(&self) -> usize {
        self.joints_path.iter().copied().max().unwrap_or(0)
    }

    /// Compute the Jacobian in the given configuration.
    ///
    /// The mechanism must be the one (or compatible with the one) the
    /// Jacobian was built from, and `config` must have been brought up to
    /// date by forward kinematics. Nothing is checked.
    pub fn jacobian(
        &mut self,
        mechanism: &Mechanism,
        config: &MechanismConfig,
    ) -> &Matrix6xX<Float> {
        // World-oriented frame located at the point
        let point_w = config.body_pos_w[self.target()].transform_point(&self.point);
        let frame = Transform3D::move_xyz(point_w.x, point_w.y, point_w.z);
        let world_to_frame = frame.inv();

        let mut col = 0;
        for &i in self.joints_path.iter() {
            let joint = mechanism.joint(i);
            let local = &config.joint_config[i];

            let pred_to_world = match mechanism.predecessor(i) {
                Some(pred) => config.body_pos_w[pred],
                None => Transform3D::identity(),
            };
            // Joint input side seen from the point
            let pred_to_frame = &world_to_frame * &pred_to_world;
            let out_to_frame = &(&pred_to_frame * mechanism.transform_in(i)) * local;

            let dof = joint.dof();
            self.jac
                .columns_mut(col, dof)
                .copy_from(&out_to_frame.transform_motion_subspace(&joint.motion_subspace()));
            col += dof;
        }

        &self.jac
    }

    /// Ensure the joint path fits in `mechanism` and that its joints there
    /// have the dof the matrix was sized for.
    fn check_path(&self, mechanism: &Mechanism) -> Result<(), JacobianError> {
        let max_index = self.max_path_index();
        if max_index >= mechanism.joint_count() {
            return Err(JacobianError::TopologyMismatch {
                max_index,
                joint_count: mechanism.joint_count(),
            });
        }

        let dof: usize = self
            .joints_path
            .iter()
            .map(|&i| mechanism.joint(i).dof())
            .sum();
        if dof != self.dof {
            return Err(JacobianError::PathDofMismatch {
                expected: self.dof,
                actual: dof,
            });
        }
        Ok(())
    }

    fn check_config(
        &self,
        mechanism: &Mechanism,
        config: &MechanismConfig,
    ) -> Result<(), JacobianError> {
        check_match_body_pos(mechanism, config)?;
        check_match_joint_config(mechanism, config)?;
        self.check_path(mechanism)
    }

    /// [`GeometricJacobian::jacobian`] after checking that `config` matches
    /// `mechanism` and that the joint path fits in `mechanism` with the same
    /// dof.
    ///
    /// On error the matrix is left untouched.
    pub fn checked_jacobian(
        &mut self,
        mechanism: &Mechanism,
        config: &MechanismConfig,
    ) -> Result<&Matrix6xX<Float>, JacobianError> {
        if let Err(e) = self.check_config(mechanism, config) {
            warn!(error = %e, "rejected jacobian computation");
            return Err(e);
        }

        Ok(self.jacobian(mechanism, config))
    }

    /// Spatial velocity of the point, from the joint velocities `config.alpha`
    /// of the joints on the path. Unchecked, like [`GeometricJacobian::jacobian`].
    pub fn velocity(
        &mut self,
        mechanism: &Mechanism,
        config: &MechanismConfig,
    ) -> SpatialVector {
        let alpha = DVector::from_iterator(
            self.dof,
            self.joints_path
                .iter()
                .flat_map(|&i| config.alpha[i].iter().copied()),
        );
        let jac = self.jacobian(mechanism, config);
        let v: Vector6<Float> = jac * alpha;
        SpatialVector::from_vector6(&v)
    }

    /// [`GeometricJacobian::velocity`] after checking every array of `config`,
    /// joint velocities included.
    pub fn checked_velocity(
        &mut self,
        mechanism: &Mechanism,
        config: &MechanismConfig,
    ) -> Result<SpatialVector, JacobianError> {
        if let Err(e) = self
            .check_config(mechanism, config)
            .and_then(|_| check_match_alpha(mechanism, config))
        {
            warn!(error = %e, "rejected velocity computation");
            return Err(e);
        }

        Ok(self.velocity(mechanism, config))
    }

    /// Spatial velocity of the point for joint velocities given in path
    /// order, using the last computed matrix.
    pub fn path_velocity(&self, alpha: &[Float]) -> Result<SpatialVector, JacobianError> {
        if alpha.len() != self.dof {
            return Err(JacobianError::VelocitySizeMismatch {
                expected: self.dof,
                actual: alpha.len(),
            });
        }

        let v: Vector6<Float> = &self.jac * DVector::from_column_slice(alpha);
        Ok(SpatialVector::from_vector6(&v))
    }

    /// Scatter the path-ordered columns of `jac` into a 6 x `mechanism.dof()`
    /// matrix following the joint ordering of the whole mechanism. Columns
    /// of joints off the path are zero.
    pub fn full_jacobian(
        &self,
        mechanism: &Mechanism,
        jac: &Matrix6xX<Float>,
    ) -> Matrix6xX<Float> {
        let mut full = Matrix6xX::zeros(mechanism.dof());

        let mut col = 0;
        for &i in self.joints_path.iter() {
            let dof = mechanism.joint(i).dof();
            full.columns_mut(mechanism.joint_pos_in_dof(i), dof)
                .copy_from(&jac.columns(col, dof));
            col += dof;
        }

        full
    }

    /// Extract the path as a new mechanism: a plain chain whose joint k is
    /// the k-th joint of the path. Bodies, joints and fixed transforms are
    /// copied unchanged. Nothing is checked.
    pub fn sub_mechanism(&self, mechanism: &Mechanism) -> Mechanism {
        let n = self.joints_path.len();
        let mut bodies = Vec::with_capacity(n);
        let mut joints = Vec::with_capacity(n);
        let mut transforms_in = Vec::with_capacity(n);
        let mut transforms_out = Vec::with_capacity(n);

        for &i in self.joints_path.iter() {
            bodies.push(mechanism.body(i).clone());
            joints.push(mechanism.joint(i).clone());
            transforms_in.push(*mechanism.transform_in(i));
            transforms_out.push(*mechanism.transform_out(i));
        }

        let parents: Vec<Option<usize>> = (0..n).map(|k| k.checked_sub(1)).collect();
        let predecessors = parents.clone();
        let successors = (0..n).collect();

        debug!(path_len = n, "extracted sub mechanism");

        Mechanism::new_unchecked(
            bodies,
            joints,
            predecessors,
            successors,
            parents,
            transforms_in,
            transforms_out,
        )
    }

    /// [`GeometricJacobian::sub_mechanism`] after checking that the joint path
    /// fits in `mechanism` with the same dof.
    pub fn checked_sub_mechanism(
        &self,
        mechanism: &Mechanism,
    ) -> Result<Mechanism, JacobianError> {
        if let Err(e) = self.check_path(mechanism) {
            warn!(error = %e, "rejected sub mechanism extraction");
            return Err(e);
        }

        Ok(self.sub_mechanism(mechanism))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use na::{vector, Matrix3, UnitVector3, Vector6};
    use rand::Rng;

    use crate::{
        assert_vec_close,
        builders::{
            chain_builder::{build_branching_tree, build_chain_with_axes, build_serial_chain},
            so101::{build_so101, SO101_JAW},
        },
        joint::Joint,
        kinematics::forward_kinematics,
        rigid_body::RigidBody,
        util::test_utils::{random_config, TOL},
        PI,
    };

    use super::*;

    /// At the zero position with identity fixed transforms, every composed
    /// transform is the identity and the columns are the raw motion
    /// subspaces.
    #[test]
    fn zero_position_gives_raw_motion_subspaces() {
        // Arrange
        let axes: Vec<UnitVector3<Float>> =
            vec![Vector3::x_axis(), Vector3::y_axis(), Vector3::z_axis()];
        let mechanism = build_chain_with_axes(&axes, 0.0);
        let config = MechanismConfig::new(&mechanism);
        let mut jacobian = GeometricJacobian::new(&mechanism, 2).unwrap();

        // Act
        let jac = jacobian.jacobian(&mechanism, &config);

        // Assert
        assert_eq!(jac.nrows(), 6);
        assert_eq!(jac.ncols(), 3);
        for (i, joint) in mechanism.joints().iter().enumerate() {
            let subspace = joint.motion_subspace();
            assert_vec_close!(jac.column(i), subspace.column(0), TOL);
        }
    }

    #[test]
    fn shape_is_six_by_path_dof() {
        // Arrange
        let joints = vec![
            Joint::new_floating("base"),
            Joint::new_revolute("a", Vector3::y_axis()),
            Joint::new_fixed("b"),
            Joint::new_prismatic("c", Vector3::z_axis()),
            Joint::new_revolute("d", Vector3::x_axis()),
        ];
        let bodies = (0..5).map(|i| RigidBody::new(i, "body")).collect();
        let parents = vec![None, Some(0), Some(1), Some(2), Some(1)];
        let mechanism = Mechanism::from_tree(
            bodies,
            joints,
            parents,
            vec![Transform3D::move_x(0.3); 5],
            vec![Transform3D::move_z(0.1); 5],
        )
        .unwrap();
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);

        for (body_id, expected_path, expected_dof) in [
            (0, vec![0], 6),
            (3, vec![0, 1, 2, 3], 8),
            (4, vec![0, 1, 4], 8),
        ] {
            // Act
            let mut jacobian = GeometricJacobian::new(&mechanism, body_id).unwrap();
            let jac = jacobian.jacobian(&mechanism, &config);

            // Assert
            assert_eq!(jac.shape(), (6, expected_dof));
            assert_eq!(jacobian.joints_path(), expected_path.as_slice());
            assert_eq!(jacobian.dof(), expected_dof);
        }
    }

    #[test]
    fn compute_is_deterministic() {
        // Arrange
        let mechanism = build_so101();
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);
        let point = vector![0.01, 0.02, 0.03];
        let mut jacobian = GeometricJacobian::with_point(&mechanism, SO101_JAW, point).unwrap();

        // Act
        let first = jacobian.jacobian(&mechanism, &config).clone();
        let second = jacobian.jacobian(&mechanism, &config).clone();

        // Assert
        assert_eq!(first, second);
    }

    /// Two revolute joints about z, links of length 1 along x, point at the
    /// end of the second link. At q = (pi/2, -pi/2) the point is at (1, 1, 0).
    #[test]
    fn planar_arm_columns() {
        // Arrange
        let mechanism = build_serial_chain(2, 1.0);
        let mut config = MechanismConfig::new(&mechanism);
        config.q = vec![vec![PI / 2.0], vec![-PI / 2.0]];
        forward_kinematics(&mechanism, &mut config);
        let point = vector![1., 0., 0.];
        let mut jacobian = GeometricJacobian::with_point(&mechanism, 1, point).unwrap();

        // Act
        let jac = jacobian.jacobian(&mechanism, &config);

        // Assert
        let expected0 = Vector6::new(0., 0., 1., -1., 1., 0.);
        let expected1 = Vector6::new(0., 0., 1., 0., 1., 0.);
        assert_vec_close!(jac.column(0), expected0, TOL);
        assert_vec_close!(jac.column(1), expected1, TOL);
    }

    /// Compare the velocity of a point on the jaw of the SO-101 with finite
    /// differences of its pose.
    #[cfg(not(feature = "f32"))]
    #[test]
    fn velocity_matches_finite_differences() {
        // Arrange
        let mechanism = build_so101();
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);
        let point = vector![0.01, -0.02, 0.015];
        let mut jacobian = GeometricJacobian::with_point(&mechanism, SO101_JAW, point).unwrap();

        let h = 1e-6;
        let perturbed = |sign: Float| {
            let mut perturbed = config.clone();
            for (q, alpha) in perturbed.q.iter_mut().zip(config.alpha.iter()) {
                for (qi, ai) in q.iter_mut().zip(alpha.iter()) {
                    *qi += sign * h * ai;
                }
            }
            forward_kinematics(&mechanism, &mut perturbed);
            perturbed.body_pos_w[SO101_JAW]
        };
        let plus = perturbed(1.0);
        let minus = perturbed(-1.0);

        // Act
        let velocity = jacobian.velocity(&mechanism, &config);

        // Assert
        let linear = (plus.transform_point(&point) - minus.transform_point(&point)) / (2.0 * h);
        assert_relative_eq!(velocity.linear, linear, epsilon = 1e-6);

        let w_hat: Matrix3<Float> =
            (plus.rot() - minus.rot()) / (2.0 * h) * config.body_pos_w[SO101_JAW].rot().transpose();
        let angular = vector![w_hat[(2, 1)], w_hat[(0, 2)], w_hat[(1, 0)]];
        assert_relative_eq!(velocity.angular, angular, epsilon = 1e-6);
    }

    #[test]
    fn path_velocity_uses_path_order() {
        // Arrange
        let mechanism = build_branching_tree();
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);
        let mut jacobian = GeometricJacobian::new(&mechanism, 105).unwrap();
        let expected = jacobian.checked_velocity(&mechanism, &config).unwrap();
        let alpha: Vec<Float> = jacobian
            .joints_path()
            .iter()
            .flat_map(|&i| config.alpha[i].clone())
            .collect();

        // Act
        let velocity = jacobian.path_velocity(&alpha).unwrap();
        let mismatch = jacobian.path_velocity(&alpha[1..]);

        // Assert
        assert_relative_eq!(velocity.as_vector6(), expected.as_vector6(), epsilon = TOL);
        assert_eq!(
            mismatch,
            Err(JacobianError::VelocitySizeMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn root_target_has_single_entry_path() {
        // Arrange
        let tree = build_branching_tree();
        let chain = build_serial_chain(3, 1.0);

        // Act
        let mut fixed_root = GeometricJacobian::new(&tree, 100).unwrap();
        let revolute_root = GeometricJacobian::new(&chain, 0).unwrap();
        let jac = fixed_root
            .checked_jacobian(&tree, &MechanismConfig::new(&tree))
            .unwrap();

        // Assert
        assert_eq!(jac.shape(), (6, 0));
        assert_eq!(fixed_root.joints_path(), &[0]);
        assert_eq!(fixed_root.dof(), 0);
        assert_eq!(revolute_root.joints_path(), &[0]);
        assert_eq!(revolute_root.dof(), 1);
    }

    #[test]
    fn unknown_body_is_rejected() {
        let mechanism = build_serial_chain(2, 1.0);

        let result = GeometricJacobian::new(&mechanism, 42);

        assert_eq!(result, Err(JacobianError::UnknownBody(42)));
    }

    /// A Jacobian built on a 5 joint chain must refuse a 3 joint chain, and
    /// keep its previous result.
    #[test]
    fn checked_jacobian_rejects_smaller_mechanism() {
        // Arrange
        let mechanism = build_serial_chain(5, 1.0);
        let truncated = build_serial_chain(3, 1.0);
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);
        let truncated_config = random_config(&mut rng, &truncated);
        let mut jacobian = GeometricJacobian::new(&mechanism, 4).unwrap();
        let before = jacobian.checked_jacobian(&mechanism, &config).unwrap().clone();

        // Act
        let result = jacobian.checked_jacobian(&truncated, &truncated_config);

        // Assert
        assert_eq!(
            result,
            Err(JacobianError::TopologyMismatch {
                max_index: 4,
                joint_count: 3
            })
        );
        assert_eq!(jacobian.matrix(), &before);
    }

    #[test]
    fn checked_jacobian_rejects_config_size_mismatch() {
        // Arrange
        let mechanism = build_serial_chain(3, 1.0);
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);
        let mut jacobian = GeometricJacobian::new(&mechanism, 2).unwrap();
        let before = jacobian.jacobian(&mechanism, &config).clone();
        let mut short_body_pos = config.clone();
        short_body_pos.body_pos_w.pop();
        let mut short_joint_config = config.clone();
        short_joint_config.joint_config.pop();

        // Act
        let body_pos = jacobian.checked_jacobian(&mechanism, &short_body_pos).map(|j| j.clone());
        let joint_config = jacobian
            .checked_jacobian(&mechanism, &short_joint_config)
            .map(|j| j.clone());

        // Assert
        assert!(matches!(
            body_pos,
            Err(JacobianError::ConfigSizeMismatch { what: "body_pos_w", .. })
        ));
        assert!(matches!(
            joint_config,
            Err(JacobianError::ConfigSizeMismatch { what: "joint_config", .. })
        ));
        assert_eq!(jacobian.matrix(), &before);
    }

    /// Same joint count, but the last joint is floating instead of revolute.
    fn chain_with_floating_tip() -> Mechanism {
        let joints = vec![
            Joint::new_revolute("joint0", Vector3::z_axis()),
            Joint::new_revolute("joint1", Vector3::z_axis()),
            Joint::new_floating("joint2"),
        ];
        let bodies = (0..3).map(|i| RigidBody::new(i, "body")).collect();
        Mechanism::from_tree(
            bodies,
            joints,
            vec![None, Some(0), Some(1)],
            vec![Transform3D::move_x(1.0); 3],
            vec![Transform3D::identity(); 3],
        )
        .unwrap()
    }

    #[test]
    fn checked_calls_reject_same_size_different_joints() {
        // Arrange
        let mechanism = build_serial_chain(3, 1.0);
        let swapped = chain_with_floating_tip();
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &mechanism);
        let swapped_config = random_config(&mut rng, &swapped);
        let mut jacobian = GeometricJacobian::new(&mechanism, 2).unwrap();
        let before = jacobian.checked_jacobian(&mechanism, &config).unwrap().clone();
        let expected = JacobianError::PathDofMismatch {
            expected: 3,
            actual: 8,
        };

        // Act
        let jac = jacobian
            .checked_jacobian(&swapped, &swapped_config)
            .map(|j| j.clone());
        let velocity = jacobian.checked_velocity(&swapped, &swapped_config);
        let chain = jacobian.checked_sub_mechanism(&swapped);

        // Assert
        assert_eq!(jac, Err(expected.clone()));
        assert_eq!(velocity, Err(expected.clone()));
        assert_eq!(chain, Err(expected));
        assert_eq!(jacobian.matrix(), &before);
    }

    #[test]
    fn checked_velocity_rejects_missing_velocities() {
        // Arrange
        let mechanism = build_serial_chain(3, 1.0);
        let mut rng = rand::rng();
        let mut config = random_config(&mut rng, &mechanism);
        let mut jacobian = GeometricJacobian::new(&mechanism, 2).unwrap();
        let before = jacobian.jacobian(&mechanism, &config).clone();
        config.alpha[1].clear();

        // Act
        let result = jacobian.checked_velocity(&mechanism, &config);

        // Assert
        assert!(matches!(
            result,
            Err(JacobianError::ConfigSizeMismatch { what: "alpha", .. })
        ));
        assert_eq!(jacobian.matrix(), &before);
    }

    #[test]
    fn sub_mechanism_is_a_chain() {
        // Arrange
        let tree = build_branching_tree();
        let jacobian = GeometricJacobian::new(&tree, 104).unwrap();

        // Act
        let chain = jacobian.checked_sub_mechanism(&tree).unwrap();

        // Assert
        let k = jacobian.joints_path().len();
        assert_eq!(k, 5);
        assert_eq!(chain.joint_count(), k);
        assert_eq!(chain.body_count(), k);
        assert_eq!(chain.parents(), &[None, Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(chain.predecessors(), &[None, Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(chain.successors(), &[0, 1, 2, 3, 4]);
        assert_eq!(chain.dof(), 4);
    }

    #[test]
    fn sub_mechanism_skips_other_branches() {
        // Arrange
        let tree = build_branching_tree();
        let jacobian = GeometricJacobian::new(&tree, 105).unwrap();

        // Act
        let chain = jacobian.sub_mechanism(&tree);

        // Assert
        assert_eq!(jacobian.joints_path(), &[0, 1, 2, 5]);
        for (k, &i) in jacobian.joints_path().iter().enumerate() {
            assert_eq!(chain.body(k), tree.body(i));
            assert_eq!(chain.joint(k), tree.joint(i));
            assert_eq!(chain.transform_in(k), tree.transform_in(i));
            assert_eq!(chain.transform_out(k), tree.transform_out(i));
        }
        assert_eq!(chain.body_index_by_id(105), Some(3));
        assert_eq!(chain.body_index_by_id(103), None);
    }

    /// The Jacobian of the extracted chain equals the Jacobian on the full
    /// tree in the same joint positions.
    #[test]
    fn sub_mechanism_preserves_jacobian() {
        // Arrange
        let tree = build_branching_tree();
        let mut rng = rand::rng();
        let tree_config = random_config(&mut rng, &tree);
        let point = vector![0.2, 0.1, -0.3];
        let mut tree_jacobian = GeometricJacobian::with_point(&tree, 105, point).unwrap();
        let chain = tree_jacobian.sub_mechanism(&tree);

        let mut chain_config = MechanismConfig::new(&chain);
        for (k, &i) in tree_jacobian.joints_path().iter().enumerate() {
            chain_config.q[k] = tree_config.q[i].clone();
        }
        forward_kinematics(&chain, &mut chain_config);
        let mut chain_jacobian = GeometricJacobian::with_point(&chain, 105, point).unwrap();

        // Act
        let expected = tree_jacobian.jacobian(&tree, &tree_config).clone();
        let jac = chain_jacobian.checked_jacobian(&chain, &chain_config).unwrap();

        // Assert
        assert_relative_eq!(*jac, expected, epsilon = TOL);
    }

    #[test]
    fn checked_sub_mechanism_rejects_smaller_mechanism() {
        let mechanism = build_serial_chain(5, 1.0);
        let truncated = build_serial_chain(3, 1.0);
        let jacobian = GeometricJacobian::new(&mechanism, 4).unwrap();

        let result = jacobian.checked_sub_mechanism(&truncated);

        assert_eq!(
            result,
            Err(JacobianError::TopologyMismatch {
                max_index: 4,
                joint_count: 3
            })
        );
    }

    #[test]
    fn full_jacobian_scatters_columns() {
        // Arrange
        let tree = build_branching_tree();
        let mut rng = rand::rng();
        let config = random_config(&mut rng, &tree);
        let mut jacobian = GeometricJacobian::new(&tree, 105).unwrap();
        let jac = jacobian.jacobian(&tree, &config).clone();

        // Act
        let full = jacobian.full_jacobian(&tree, &jac);

        // Assert
        assert_eq!(full.shape(), (6, tree.dof()));
        assert_eq!(full.column(0), jac.column(0));
        assert_eq!(full.column(1), jac.column(1));
        assert_eq!(full.column(2), Vector6::zeros());
        assert_eq!(full.column(3), Vector6::zeros());
        assert_eq!(full.column(4), jac.column(2));
    }

    /// Chains of random length and joint types always give 6 x sum(dof).
    #[test]
    fn random_chains_have_matching_shape() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            // Arrange
            let n = rng.random_range(1..8);
            let joints: Vec<Joint> = (0..n)
                .map(|i| match rng.random_range(0..4) {
                    0 => Joint::new_revolute(&i.to_string(), Vector3::x_axis()),
                    1 => Joint::new_prismatic(&i.to_string(), Vector3::y_axis()),
                    2 => Joint::new_fixed(&i.to_string()),
                    _ => Joint::new_floating(&i.to_string()),
                })
                .collect();
            let expected_dof: usize = joints.iter().map(|j| j.dof()).sum();
            let bodies = (0..n).map(|i| RigidBody::new(i, "body")).collect();
            let parents = (0..n).map(|i: usize| i.checked_sub(1)).collect();
            let mechanism = Mechanism::from_tree(
                bodies,
                joints,
                parents,
                vec![Transform3D::move_y(0.5); n],
                vec![Transform3D::identity(); n],
            )
            .unwrap();
            let config = random_config(&mut rng, &mechanism);
            let mut jacobian = GeometricJacobian::new(&mechanism, n - 1).unwrap();

            // Act
            let jac = jacobian.checked_jacobian(&mechanism, &config).unwrap();

            // Assert
            assert_eq!(jac.shape(), (6, expected_dof));
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn jacobian_is_send_sync() {
        assert_send_sync::<GeometricJacobian>();
    }
}
