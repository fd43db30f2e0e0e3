use types::Float;
pub extern crate nalgebra as na;

pub mod builders;
pub mod config;
pub mod error;
pub mod geometric_jacobian;
pub mod joint;
pub mod kinematics;
pub mod mechanism;
pub mod rigid_body;
pub mod spatial;
pub mod types;
pub mod util;

pub use error::JacobianError;
pub use geometric_jacobian::GeometricJacobian;

pub const PI: Float = std::f64::consts::PI as Float;
