use reng_ecs::{ComponentDatabase, DeltaTime, UpdateComponent};

/// Animates per-vertex colors of a mesh over time.
#[derive(Debug, Clone, Default)]
pub struct VertexColorComponent {
    colors: Vec<f32>,
    accum_time: f64,
}

impl VertexColorComponent {
    /// Creates component which animates the color buffer.
    pub fn new(colors: impl Into<Vec<f32>>) -> Self {
        Self {
            colors: colors.into(),
            accum_time: 0.0,
        }
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Time passed since the animation started, in seconds.
    pub fn accum_time(&self) -> f64 {
        self.accum_time
    }
}

impl UpdateComponent for VertexColorComponent {
    fn update(&mut self, delta_time: DeltaTime, _database: &mut ComponentDatabase) {
        self.accum_time += delta_time.as_secs_f64();
        let accum_time = self.accum_time as f32;
        for (i, color) in self.colors.iter_mut().enumerate() {
            let mult = (1.0 + i as f32 / 3.0) / 3.0;
            let time = accum_time + mult;
            *color = (time - time.trunc()).sin();
        }
    }
}
