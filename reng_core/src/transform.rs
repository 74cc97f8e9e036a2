//! Placement of objects in the world.

use ultraviolet::{Mat4, Rotor3, Vec3, Vec4};

/// Global transformation of an object, stored as 4x4 matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Creates transform which only moves an object to the position.
    pub fn new(position: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(position))
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Creates transform from translation, rotation and uniform scale.
    pub fn from_trs(position: Vec3, rotation: Rotor3, scale: f32) -> Self {
        let rotation = rotation.into_matrix().into_homogeneous();
        let matrix = Mat4::from_translation(position) * rotation * Mat4::from_scale(scale);
        Self::from_matrix(matrix)
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    pub fn position(&self) -> Vec3 {
        self.matrix.cols[3].xyz()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.matrix.cols[3] = Vec4::new(position.x, position.y, position.z, 1.0);
    }

    pub fn right(&self) -> Vec3 {
        self.matrix.cols[0].xyz()
    }

    pub fn up(&self) -> Vec3 {
        self.matrix.cols[1].xyz()
    }

    pub fn forward(&self) -> Vec3 {
        self.matrix.cols[2].xyz()
    }

    /// Rotates an object so that its `-forward` axis points to the target.
    ///
    /// Position of the object is kept.
    ///
    pub fn look_at(&mut self, target: Vec3) {
        let view = Mat4::look_at(self.position(), target, Vec3::unit_y());
        self.matrix = view.inversed();
    }

    /// Rotates an object around its own vertical axis.
    pub fn rotate_y(&mut self, radians: f32) {
        self.matrix = self.matrix * Mat4::from_rotation_y(radians);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_matrix(Mat4::identity())
    }
}

impl From<Vec3> for Transform {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}
