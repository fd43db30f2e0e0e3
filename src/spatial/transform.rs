use std::ops::Mul;

use na::{
    Isometry3, Matrix3, Matrix6, Matrix6xX, Translation3, UnitQuaternion, UnitVector3, Vector3,
};

use crate::{types::Float, util::skew_symmetric};

/// A rigid transformation from one 3-dimensional Cartesian coordinate system
/// to another, i.e. the pose of the `from` frame expressed in the `to` frame.
///
/// Which frames are related is implied by where the transform is stored
/// (a joint index, a body index), so no frame names are carried around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub iso: Isometry3<Float>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Transform3D::identity()
    }
}

impl Transform3D {
    pub fn identity() -> Self {
        Transform3D {
            iso: Isometry3::identity(),
        }
    }

    pub fn from_parts(translation: Vector3<Float>, rotation: UnitQuaternion<Float>) -> Self {
        Transform3D {
            iso: Isometry3::from_parts(Translation3::from(translation), rotation),
        }
    }

    pub fn new_xyz_rpy(xyz: &[Float; 3], rpy: &[Float; 3]) -> Self {
        let translation = Translation3::new(xyz[0], xyz[1], xyz[2]);
        let rotation = UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]);

        Transform3D {
            iso: Isometry3::from_parts(translation, rotation),
        }
    }

    pub fn move_x(amount: Float) -> Self {
        Transform3D::move_xyz(amount, 0., 0.)
    }

    pub fn move_y(amount: Float) -> Self {
        Transform3D::move_xyz(0., amount, 0.)
    }

    pub fn move_z(amount: Float) -> Self {
        Transform3D::move_xyz(0., 0., amount)
    }

    /// Returns a pure translation by (x, y, z)
    pub fn move_xyz(x: Float, y: Float, z: Float) -> Self {
        Transform3D {
            iso: Isometry3::translation(x, y, z),
        }
    }

    /// Returns a pure rotation about axis by theta
    pub fn rotation(axis: &UnitVector3<Float>, theta: Float) -> Self {
        Transform3D {
            iso: Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(axis, theta),
            ),
        }
    }

    /// Returns a pure translation along axis by distance
    pub fn translation(axis: &UnitVector3<Float>, distance: Float) -> Self {
        let p = axis.into_inner() * distance;
        Transform3D::move_xyz(p.x, p.y, p.z)
    }

    pub fn inv(&self) -> Self {
        Transform3D {
            iso: self.iso.inverse(),
        }
    }

    pub fn rot(&self) -> Matrix3<Float> {
        self.iso.rotation.to_rotation_matrix().matrix().into_owned()
    }

    pub fn trans(&self) -> Vector3<Float> {
        self.iso.translation.vector
    }

    pub fn transform_point(&self, point: &Vector3<Float>) -> Vector3<Float> {
        self.rot() * point + self.trans()
    }

    /// The 6x6 matrix that re-expresses a spatial motion vector
    /// [angular; linear] given in the `from` frame in the `to` frame:
    /// | R        0 |
    /// | p_hat R  R |
    pub fn action_matrix(&self) -> Matrix6<Float> {
        let rot = self.rot();
        let mut matrix = Matrix6::zeros();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rot);
        matrix.fixed_view_mut::<3, 3>(3, 3).copy_from(&rot);
        matrix
            .fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&(skew_symmetric(&self.trans()) * rot));
        matrix
    }

    /// Apply the action of this transform to every column of a motion
    /// subspace.
    pub fn transform_motion_subspace(&self, subspace: &Matrix6xX<Float>) -> Matrix6xX<Float> {
        self.action_matrix() * subspace
    }
}

impl Mul for Transform3D {
    type Output = Transform3D;

    fn mul(self, rhs: Self) -> Self::Output {
        Transform3D {
            iso: self.iso * rhs.iso,
        }
    }
}

impl<'a, 'b> Mul<&'b Transform3D> for &'a Transform3D {
    type Output = Transform3D;

    fn mul(self, rhs: &'b Transform3D) -> Self::Output {
        Transform3D {
            iso: self.iso * rhs.iso,
        }
    }
}

#[cfg(test)]
mod tests {
    use na::{vector, Vector6};

    use crate::{
        assert_vec_close,
        util::test_utils::{random_transform, TOL},
    };

    use super::*;

    #[test]
    fn compose_translations() {
        // Arrange
        let a = Transform3D::move_x(1.0);
        let b = Transform3D::move_z(2.0);

        // Act
        let ab = &a * &b;

        // Assert
        assert_eq!(ab.trans(), vector![1.0, 0.0, 2.0]);
        assert_eq!(ab.rot(), Matrix3::identity());
    }

    #[test]
    fn inverse_composes_to_identity() {
        // Arrange
        let mut rng = rand::rng();
        let t = random_transform(&mut rng, 1.0);

        // Act
        let identity = &t * &t.inv();

        // Assert
        assert_vec_close!(
            identity.iso.to_homogeneous(),
            Isometry3::<Float>::identity().to_homogeneous(),
            TOL
        );
    }

    /// A pure rotation about z seen from a frame one unit down the x axis
    /// must produce a linear velocity along y at that frame's origin.
    #[test]
    fn action_matrix_shifts_angular_velocity() {
        // Arrange
        let t = Transform3D::move_x(-1.0);
        let motion = Vector6::new(0., 0., 1., 0., 0., 0.);

        // Act
        let result = t.action_matrix() * motion;

        // Assert
        assert_vec_close!(result, Vector6::new(0., 0., 1., 0., 1., 0.), TOL);
    }

    /// The action of a product equals the product of the actions.
    #[test]
    fn action_matrix_is_homomorphic() {
        // Arrange
        let mut rng = rand::rng();
        let a = random_transform(&mut rng, 2.0);
        let b = random_transform(&mut rng, 2.0);

        // Act
        let lhs = (&a * &b).action_matrix();
        let rhs = a.action_matrix() * b.action_matrix();

        // Assert
        assert_vec_close!(lhs, rhs, TOL);
    }
}
