use chain_jacobian::{
    builders::chain_builder::build_serial_chain, config::MechanismConfig,
    kinematics::checked_forward_kinematics, types::Float, GeometricJacobian, JacobianError, PI,
};
use nalgebra::vector;
use tracing_subscriber::EnvFilter;

/// Print the Jacobian and the tip velocity of a planar 3-link arm
pub fn main() -> Result<(), JacobianError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let l: Float = 0.5;
    let mechanism = build_serial_chain(3, l);
    println!(
        "{} joints, {} position params, {} dof",
        mechanism.joint_count(),
        mechanism.params(),
        mechanism.dof()
    );

    let mut config = MechanismConfig::new(&mechanism);
    config.q = vec![vec![PI / 4.], vec![-PI / 4.], vec![PI / 2.]];
    config.alpha = vec![vec![1.], vec![0.], vec![-1.]];
    checked_forward_kinematics(&mechanism, &mut config)?;

    let mut jacobian = GeometricJacobian::with_point(&mechanism, 2, vector![l, 0., 0.])?;
    println!("joints path: {:?}", jacobian.joints_path());
    println!("jacobian: {}", jacobian.checked_jacobian(&mechanism, &config)?);

    let velocity = jacobian.checked_velocity(&mechanism, &config)?;
    println!("tip angular velocity: {}", velocity.angular);
    println!("tip linear velocity: {}", velocity.linear);

    Ok(())
}
