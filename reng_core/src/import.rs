//! Contract of model importers.
//!
//! File formats themselves are parsed by external loaders which expose
//! loaded geometry through [`MeshSource`].

use std::path::PathBuf;

use crate::asset::AssetError;
use crate::mesh::{Mesh, VertexAttribute};

/// Textures of one material of the imported mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialTextures {
    pub diffuse: Option<PathBuf>,
    pub normal: Option<PathBuf>,
}

/// Mesh of the imported model.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub name: String,
    pub vertices: Vec<f32>,
    /// Count of floats in one vertex.
    pub stride: usize,
    pub attributes: Vec<VertexAttribute>,
    pub indices: Vec<u32>,
    pub materials: Vec<MaterialTextures>,
}

impl MeshNode {
    /// Returns `true` if node has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Builds mesh from geometry of this node.
    pub fn to_mesh(&self) -> Result<Mesh, AssetError> {
        let indices = (!self.indices.is_empty()).then(|| self.indices.clone());
        Mesh::new(
            self.vertices.clone(),
            self.stride,
            self.attributes.clone(),
            indices,
        )
    }
}

/// Loaded model which consists of enumerable mesh nodes.
pub trait MeshSource {
    /// Count of mesh nodes in the model.
    fn mesh_count(&self) -> usize;

    /// Mesh node by its index.
    fn mesh(&self, index: usize) -> Option<&MeshNode>;
}

/// Model which is already stored in memory.
#[derive(Debug, Clone, Default)]
pub struct MeshScene {
    nodes: Vec<MeshNode>,
}

impl MeshScene {
    pub fn new(nodes: Vec<MeshNode>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: MeshNode) {
        self.nodes.push(node)
    }
}

impl MeshSource for MeshScene {
    fn mesh_count(&self) -> usize {
        self.nodes.len()
    }

    fn mesh(&self, index: usize) -> Option<&MeshNode> {
        self.nodes.get(index)
    }
}
