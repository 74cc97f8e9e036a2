use ultraviolet::projection::perspective_gl as perspective;
use ultraviolet::Mat4;

use reng_ecs::{ComponentDatabase, ComponentHandle, DeltaTime, UpdateComponent};

use super::TransformComponent;

/// Perspective projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    pub fn projection(&self) -> Mat4 {
        perspective(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

/// Camera which views the world from its transform.
///
/// View and projection matrices are recomputed on every update.
///
#[derive(Debug, Clone)]
pub struct CameraComponent {
    transform: ComponentHandle<TransformComponent>,
    camera: Camera,
    view: Mat4,
    projection: Mat4,
}

impl CameraComponent {
    pub fn new(transform: ComponentHandle<TransformComponent>, camera: Camera) -> Self {
        Self {
            transform,
            camera,
            view: Mat4::identity(),
            projection: camera.projection(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl UpdateComponent for CameraComponent {
    fn update(&mut self, _delta_time: DeltaTime, database: &mut ComponentDatabase) {
        match database.resolve(self.transform) {
            Ok(transform) => self.view = transform.transform().matrix().inversed(),
            Err(error) => log::warn!("camera lost its transform: {}", error),
        }
        self.projection = self.camera.projection();
    }
}
