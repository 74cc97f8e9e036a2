//! Materials which describe how meshes are shaded.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{ProgramId, TextureId};

/// Names of sampler uniforms known to engine shaders.
pub mod location {
    pub const DIFFUSE_SAMPLER: &str = "diffuseSampler";
    pub const NORMAL_SAMPLER: &str = "normalSampler";
}

/// Texture units reserved for samplers known to engine shaders.
pub mod texture_unit {
    pub const DIFFUSE: u32 = 0;
    pub const NORMAL: u32 = 1;
}

/// Texture bound to the sampler of the material.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplerBinding {
    pub texture: TextureId,
    pub unit: u32,
}

/// Shader program with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    program: ProgramId,
    specular_power: f32,
    samplers: BTreeMap<String, SamplerBinding>,
}

impl Material {
    pub fn new(program: ProgramId) -> Self {
        Self {
            program,
            specular_power: 1.0,
            samplers: BTreeMap::new(),
        }
    }

    pub fn program(&self) -> ProgramId {
        self.program
    }

    pub fn specular_power(&self) -> f32 {
        self.specular_power
    }

    pub fn set_specular_power(&mut self, specular_power: f32) {
        self.specular_power = specular_power;
    }

    /// Binds texture to the sampler with given location.
    ///
    /// Replaces texture which was bound to this location before.
    ///
    pub fn set_sampler(&mut self, location: impl Into<String>, texture: TextureId, unit: u32) {
        self.samplers
            .insert(location.into(), SamplerBinding { texture, unit });
    }

    pub fn sampler(&self, location: &str) -> Option<SamplerBinding> {
        self.samplers.get(location).copied()
    }

    /// All sampler bindings ordered by location.
    pub fn samplers(&self) -> impl Iterator<Item = (&str, SamplerBinding)> {
        self.samplers
            .iter()
            .map(|(location, binding)| (location.as_str(), *binding))
    }
}

/// Files from which the material is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialDefinition {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    /// Diffuse texture, if any.
    pub texture: Option<PathBuf>,
}

impl MaterialDefinition {
    pub fn new(vertex_shader: impl Into<PathBuf>, fragment_shader: impl Into<PathBuf>) -> Self {
        Self {
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: impl Into<PathBuf>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}
