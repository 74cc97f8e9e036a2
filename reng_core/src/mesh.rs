//! Geometry which can be drawn by the renderer.

use crate::asset::AssetError;

/// Layout of one attribute inside of the vertex.
///
/// Offset and count of components are measured in `f32`s.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub offset: usize,
    pub components: usize,
}

impl VertexAttribute {
    pub const fn new(offset: usize, components: usize) -> Self {
        Self { offset, components }
    }

    /// Vertex which consists only of 3D position.
    pub const POSITION: [Self; 1] = [Self::new(0, 3)];

    /// 3D position followed by 2D texture coordinates.
    pub const POSITION_UV: [Self; 2] = [Self::new(0, 3), Self::new(3, 2)];

    /// 3D position followed by 3D normal.
    pub const POSITION_NORMAL: [Self; 2] = [Self::new(0, 3), Self::new(3, 3)];

    fn end(&self) -> usize {
        self.offset + self.components
    }
}

/// Vertex and index buffers with description of vertex layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    stride: usize,
    attributes: Vec<VertexAttribute>,
    indices: Option<Vec<u32>>,
}

impl Mesh {
    /// Creates new mesh from interleaved vertex data.
    ///
    /// # Errors
    ///
    /// An error is returned if attributes do not fit into the vertex,
    /// vertex data is not a whole number of vertices
    /// or some index refers to nonexistent vertex.
    ///
    pub fn new(
        vertices: impl Into<Vec<f32>>,
        stride: usize,
        attributes: impl Into<Vec<VertexAttribute>>,
        indices: Option<Vec<u32>>,
    ) -> Result<Self, AssetError> {
        let vertices = vertices.into();
        let attributes = attributes.into();
        let invalid = |reason: String| Err(AssetError::InvalidMesh { reason });

        if stride == 0 {
            return invalid("vertex stride is zero".to_string());
        }
        if vertices.len() % stride != 0 {
            return invalid(format!(
                "{} floats is not a whole number of vertices with stride {}",
                vertices.len(),
                stride,
            ));
        }
        if let Some(attribute) = attributes.iter().find(|attribute| attribute.end() > stride) {
            return invalid(format!(
                "attribute {:?} does not fit into vertex with stride {}",
                attribute, stride,
            ));
        }
        let vertex_count = vertices.len() / stride;
        if let Some(index) = indices
            .iter()
            .flatten()
            .find(|&&index| index as usize >= vertex_count)
        {
            return invalid(format!(
                "index {} is out of {} vertices",
                index, vertex_count,
            ));
        }

        Ok(Self {
            vertices,
            stride,
            attributes,
            indices,
        })
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Count of floats in one vertex.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.stride
    }

    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Count of vertices which will be drawn.
    pub fn element_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }
}
