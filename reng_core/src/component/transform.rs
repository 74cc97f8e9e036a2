use ultraviolet::Vec3;

use crate::transform::Transform;

/// Component which places its entity in the world.
///
/// Other components refer to it through
/// [`ComponentHandle`](reng_ecs::ComponentHandle).
///
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TransformComponent {
    transform: Transform,
}

impl TransformComponent {
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

impl From<Transform> for TransformComponent {
    fn from(transform: Transform) -> Self {
        Self::new(transform)
    }
}

impl From<Vec3> for TransformComponent {
    fn from(position: Vec3) -> Self {
        Self::new(Transform::new(position))
    }
}
