use reng_ecs::{ComponentDatabase, ComponentHandle, DeltaTime, UpdateComponent};

use super::TransformComponent;

/// Rotates the transform around its vertical axis every frame.
#[derive(Debug, Copy, Clone)]
pub struct SpinComponent {
    transform: ComponentHandle<TransformComponent>,
    degrees_per_second: f32,
}

impl SpinComponent {
    pub fn new(transform: ComponentHandle<TransformComponent>, degrees_per_second: f32) -> Self {
        Self {
            transform,
            degrees_per_second,
        }
    }

    pub fn transform(&self) -> ComponentHandle<TransformComponent> {
        self.transform
    }

    pub fn degrees_per_second(&self) -> f32 {
        self.degrees_per_second
    }
}

impl UpdateComponent for SpinComponent {
    fn update(&mut self, delta_time: DeltaTime, database: &mut ComponentDatabase) {
        let degrees = self.degrees_per_second * delta_time.as_secs_f32();
        match database.resolve_mut(self.transform) {
            Ok(transform) => transform.transform_mut().rotate_y(degrees.to_radians()),
            Err(error) => log::warn!("cannot spin transform: {}", error),
        }
    }
}
