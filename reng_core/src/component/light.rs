use palette::Srgb;
use ultraviolet::Vec3;

use reng_ecs::{ComponentDatabase, ComponentHandle};

use super::TransformComponent;

/// Directional light which shines along `-forward` of its transform.
#[derive(Debug, Copy, Clone)]
pub struct LightComponent {
    transform: ComponentHandle<TransformComponent>,
    color: Srgb,
    intensity: f32,
}

impl LightComponent {
    /// Creates white light of unit intensity.
    pub fn new(transform: ComponentHandle<TransformComponent>) -> Self {
        Self {
            transform,
            color: Srgb::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }

    pub fn with_color(mut self, color: Srgb, intensity: f32) -> Self {
        self.color = color;
        self.intensity = intensity;
        self
    }

    pub fn color(&self) -> Srgb {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Linear color scaled by intensity, as consumed by shaders.
    pub fn radiance(&self) -> Vec3 {
        let linear = self.color.into_linear();
        Vec3::new(linear.red, linear.green, linear.blue) * self.intensity
    }

    /// Direction in which the light shines.
    pub fn direction(&self, database: &ComponentDatabase) -> reng_ecs::Result<Vec3> {
        let transform = database.resolve(self.transform)?;
        Ok(-transform.transform().forward().normalized())
    }
}
