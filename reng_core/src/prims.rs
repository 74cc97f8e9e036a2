//! Geometry of primitive shapes.
//!
//! Vertex data is interleaved and stored as `f32`s, indices form triangles
//! with counter-clockwise winding.

pub const TRIANGLE_VERTICES: [f32; 9] = [
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    0.0, 1.0, 0.0,
];

pub const TRIANGLE_VERTEX_COUNT: usize = TRIANGLE_VERTICES.len() / 3;

/// Unit quad in XY plane: position followed by texture coordinates.
pub const QUAD_VERTICES_AND_UVS: [f32; 20] = [
    -1.0, -1.0, 0.0, 0.0, 0.0, //
    1.0, -1.0, 0.0, 1.0, 0.0, //
    1.0, 1.0, 0.0, 1.0, 1.0, //
    -1.0, 1.0, 0.0, 0.0, 1.0,
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

pub const CUBE_VERTICES: [f32; 24] = [
    // front
    -1.0, -1.0, 1.0, //
    1.0, -1.0, 1.0, //
    1.0, 1.0, 1.0, //
    -1.0, 1.0, 1.0, //
    // back
    -1.0, -1.0, -1.0, //
    1.0, -1.0, -1.0, //
    1.0, 1.0, -1.0, //
    -1.0, 1.0, -1.0,
];

pub const CUBE_VERTEX_COUNT: usize = CUBE_VERTICES.len() / 3;

/// RGBA color of each vertex of the cube.
pub const CUBE_COLORS: [f32; 32] = [
    // front
    1.0, 0.0, 0.0, 1.0, //
    0.0, 1.0, 0.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, //
    1.0, 1.0, 1.0, 1.0, //
    // back
    1.0, 0.0, 0.0, 1.0, //
    0.0, 1.0, 0.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, //
    1.0, 1.0, 1.0, 1.0,
];

pub const CUBE_INDICES: [u32; 36] = [
    // front
    0, 1, 2, 2, 3, 0, //
    // top
    3, 2, 6, 6, 7, 3, //
    // back
    7, 6, 5, 5, 4, 7, //
    // bottom
    4, 5, 1, 1, 0, 4, //
    // left
    4, 0, 3, 3, 7, 4, //
    // right
    1, 5, 6, 6, 2, 1,
];

pub const CUBE_INDEX_COUNT: usize = CUBE_INDICES.len();

const N: f32 = 0.577_350_26;

/// Cube vertices followed by normals which point away from the center.
///
/// Uses the same vertex order as [`CUBE_VERTICES`], so [`CUBE_INDICES`] apply.
///
pub const CUBE_VERTICES_AND_NORMALS: [f32; 48] = [
    // front
    -1.0, -1.0, 1.0, -N, -N, N, //
    1.0, -1.0, 1.0, N, -N, N, //
    1.0, 1.0, 1.0, N, N, N, //
    -1.0, 1.0, 1.0, -N, N, N, //
    // back
    -1.0, -1.0, -1.0, -N, -N, -N, //
    1.0, -1.0, -1.0, N, -N, -N, //
    1.0, 1.0, -1.0, N, N, -N, //
    -1.0, 1.0, -1.0, -N, N, -N,
];
