use std::sync::Arc;

use ultraviolet::Mat4;

use reng_ecs::{ComponentDatabase, ComponentHandle};

use super::TransformComponent;
use crate::asset::Material;
use crate::mesh::Mesh;

/// Mesh drawn with the material at place of the transform.
///
/// Meshes and materials may be shared between many renderables.
///
#[derive(Debug, Clone)]
pub struct RenderableComponent {
    transform: ComponentHandle<TransformComponent>,
    mesh: Arc<Mesh>,
    material: Arc<Material>,
}

impl RenderableComponent {
    pub fn new(
        transform: ComponentHandle<TransformComponent>,
        mesh: Arc<Mesh>,
        material: Arc<Material>,
    ) -> Self {
        Self {
            transform,
            mesh,
            material,
        }
    }

    pub fn transform(&self) -> ComponentHandle<TransformComponent> {
        self.transform
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Model matrix of the current state of the transform.
    pub fn model_matrix(&self, database: &ComponentDatabase) -> reng_ecs::Result<Mat4> {
        let transform = database.resolve(self.transform)?;
        Ok(*transform.transform().matrix())
    }
}
