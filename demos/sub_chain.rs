use chain_jacobian::{
    builders::so101::{build_so101, SO101_JAW, SO101_WRIST},
    config::MechanismConfig,
    kinematics::checked_forward_kinematics,
    GeometricJacobian, JacobianError,
};
use tracing_subscriber::EnvFilter;

/// Extract the base-to-wrist chain of the SO-101 and evaluate the wrist
/// Jacobian on it. Then show that a Jacobian of the jaw is refused by the
/// shorter chain.
pub fn main() -> Result<(), JacobianError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let arm = build_so101();
    let wrist = GeometricJacobian::new(&arm, SO101_WRIST)?;
    let chain = wrist.checked_sub_mechanism(&arm)?;
    for joint in chain.joints() {
        println!("{}: {} dof", joint.name(), joint.dof());
    }

    let mut config = MechanismConfig::new(&chain);
    checked_forward_kinematics(&chain, &mut config)?;
    let mut on_chain = GeometricJacobian::new(&chain, SO101_WRIST)?;
    println!("wrist jacobian: {}", on_chain.checked_jacobian(&chain, &config)?);

    let mut jaw = GeometricJacobian::new(&arm, SO101_JAW)?;
    if let Err(e) = jaw.checked_jacobian(&chain, &config) {
        println!("jaw jacobian on the wrist chain: {}", e);
    }

    Ok(())
}
