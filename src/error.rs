//! Errors raised by the checked entry points of the crate.

/// Errors that can occur while building a mechanism or evaluating a Jacobian
/// against it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JacobianError {
    /// The joint path references a joint index the mechanism does not have.
    #[error(
        "joint path mismatch mechanism: path index {max_index} but mechanism has {joint_count} joints"
    )]
    TopologyMismatch { max_index: usize, joint_count: usize },

    /// The joints on the path add up to a different dof in the mechanism
    /// than in the one the Jacobian was built from.
    #[error("joint path dof mismatch mechanism: expected {expected}, got {actual}")]
    PathDofMismatch { expected: usize, actual: usize },

    /// A configuration array does not match the mechanism element count.
    #[error("{what} size mismatch: expected {expected}, got {actual}")]
    ConfigSizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No body carries the requested id.
    #[error("unknown body id: {0}")]
    UnknownBody(usize),

    /// The parallel arrays handed to the mechanism are inconsistent.
    #[error("invalid mechanism: {0}")]
    InvalidMechanism(String),

    /// A joint velocity vector does not match the Jacobian column count.
    #[error("velocity size mismatch: expected {expected}, got {actual}")]
    VelocitySizeMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = JacobianError::TopologyMismatch {
            max_index: 4,
            joint_count: 3,
        };
        assert_eq!(
            e.to_string(),
            "joint path mismatch mechanism: path index 4 but mechanism has 3 joints"
        );

        let e = JacobianError::ConfigSizeMismatch {
            what: "body_pos_w",
            expected: 3,
            actual: 2,
        };
        assert_eq!(e.to_string(), "body_pos_w size mismatch: expected 3, got 2");

        let e = JacobianError::PathDofMismatch {
            expected: 3,
            actual: 8,
        };
        assert_eq!(
            e.to_string(),
            "joint path dof mismatch mechanism: expected 3, got 8"
        );

        let e = JacobianError::UnknownBody(7);
        assert_eq!(e.to_string(), "unknown body id: 7");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<JacobianError>();
    }
}
