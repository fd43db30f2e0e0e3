/// A body of the mechanism. Only its identity matters for kinematics:
/// `id` is the user-facing identifier, the body's position in the
/// mechanism's body list is its index.
#[derive(Clone, PartialEq, Debug)]
pub struct RigidBody {
    pub id: usize,
    pub name: String,
}

impl RigidBody {
    pub fn new(id: usize, name: &str) -> Self {
        RigidBody {
            id,
            name: name.to_string(),
        }
    }
}
