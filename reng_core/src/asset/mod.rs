//! Loading and caching of shaders, textures and materials.
//!
//! Every asset is created at most once per set of its load parameters.
//! Created assets are referred by [`slotmap`] keys.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

pub use factory::CachingFactory;
pub use material::{location, texture_unit, Material, MaterialDefinition, SamplerBinding};

mod factory;
mod material;

new_key_type! {
    /// Unique identifier of the compiled shader.
    pub struct ShaderId;

    /// Unique identifier of the linked shader program.
    pub struct ProgramId;

    /// Unique identifier of the loaded texture.
    pub struct TextureId;
}

/// Errors which occur when an asset cannot be loaded.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode image `{}`: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("shader `{}` has no source code", path.display())]
    EmptyShader { path: PathBuf },

    #[error("shader does not exist")]
    UnknownShader,

    #[error("expected {expected} shader, found {found} shader")]
    ShaderStageMismatch {
        expected: ShaderType,
        found: ShaderType,
    },

    #[error("cannot guess type of shader `{}`", path.display())]
    UnknownExtension { path: PathBuf },

    #[error("invalid mesh: {reason}")]
    InvalidMesh { reason: String },
}

/// Stage of the graphics pipeline which the shader belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    /// Guesses type of the shader by extension of its file.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "vert" | "vs" => Some(Self::Vertex),
            "frag" | "fs" => Some(Self::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Source code of the shader of some stage.
#[derive(Debug)]
pub struct Shader {
    pub path: PathBuf,
    pub ty: ShaderType,
    pub source: String,
}

/// Pair of shaders linked together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Program {
    pub vertex: ShaderId,
    pub fragment: ShaderId,
}

/// Texture loaded into memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
    pub unit: u32,
}

/// Result of asset loading.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Provides cached access to commonly used assets.
pub struct AssetManager {
    root: PathBuf,
    shaders: SlotMap<ShaderId, Shader>,
    programs: SlotMap<ProgramId, Program>,
    images: SlotMap<TextureId, RgbaImage>,
    shader_factory: CachingFactory<(PathBuf, ShaderType), ShaderId>,
    program_factory: CachingFactory<Program, ProgramId>,
    texture_factory: CachingFactory<(PathBuf, u32), Texture>,
    material_factory: CachingFactory<MaterialDefinition, Arc<Material>>,
}

impl AssetManager {
    /// Creates asset manager which resolves relative paths against the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            shaders: SlotMap::with_key(),
            programs: SlotMap::with_key(),
            images: SlotMap::with_key(),
            shader_factory: CachingFactory::new(),
            program_factory: CachingFactory::new(),
            texture_factory: CachingFactory::new(),
            material_factory: CachingFactory::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads source code of the shader from file.
    ///
    /// # Errors
    ///
    /// An error is returned if file cannot be read or it is empty.
    ///
    pub fn create_shader(&mut self, path: impl AsRef<Path>, ty: ShaderType) -> Result<ShaderId> {
        let path = self.root.join(path);
        let shaders = &mut self.shaders;
        self.shader_factory.get_or_create((path, ty), |(path, ty)| {
            let source = fs::read_to_string(path).map_err(|source| AssetError::Io {
                path: path.clone(),
                source,
            })?;
            if source.trim().is_empty() {
                return Err(AssetError::EmptyShader { path: path.clone() });
            }
            log::debug!("loaded {} shader `{}`", ty, path.display());
            Ok(shaders.insert(Shader {
                path: path.clone(),
                ty: *ty,
                source,
            }))
        })
    }

    /// Links vertex and fragment shaders into the program.
    ///
    /// # Errors
    ///
    /// An error is returned if some shader does not exist or belongs to the wrong stage.
    ///
    pub fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId> {
        let shaders = &self.shaders;
        let programs = &mut self.programs;
        let program = Program { vertex, fragment };
        self.program_factory.get_or_create(program, |program| {
            expect_stage(shaders, program.vertex, ShaderType::Vertex)?;
            expect_stage(shaders, program.fragment, ShaderType::Fragment)?;
            Ok(programs.insert(*program))
        })
    }

    /// Loads both shaders and links them into the program.
    pub fn load_program(
        &mut self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<ProgramId> {
        let vertex = self.create_shader(vertex_path, ShaderType::Vertex)?;
        let fragment = self.create_shader(fragment_path, ShaderType::Fragment)?;
        self.link_program(vertex, fragment)
    }

    /// Loads the shader guessing its type by file extension.
    pub fn load_shader(&mut self, path: impl AsRef<Path>) -> Result<ShaderId> {
        let path = path.as_ref();
        let ty = ShaderType::from_path(path).ok_or_else(|| AssetError::UnknownExtension {
            path: path.to_path_buf(),
        })?;
        self.create_shader(path, ty)
    }

    /// Loads and decodes the texture which will be bound to the texture unit.
    ///
    /// # Errors
    ///
    /// An error is returned if file cannot be read or decoded.
    ///
    pub fn load_texture(&mut self, path: impl AsRef<Path>, unit: u32) -> Result<Texture> {
        let path = self.root.join(path);
        let images = &mut self.images;
        self.texture_factory.get_or_create((path, unit), |(path, unit)| {
            let image = image::open(path)
                .map_err(|source| AssetError::Image {
                    path: path.clone(),
                    source,
                })?
                .into_rgba8();
            let (width, height) = image.dimensions();
            log::debug!(
                "loaded texture `{}` ({}x{})",
                path.display(),
                width,
                height,
            );
            Ok(Texture {
                id: images.insert(image),
                width,
                height,
                unit: *unit,
            })
        })
    }

    /// Creates new material which uses the program.
    pub fn create_material(&self, program: ProgramId) -> Arc<Material> {
        Arc::new(Material::new(program))
    }

    /// Loads the material with all its shaders and textures.
    ///
    /// Materials with equal definitions are shared.
    ///
    pub fn load_material(&mut self, definition: &MaterialDefinition) -> Result<Arc<Material>> {
        let mut factory = std::mem::take(&mut self.material_factory);
        let material = factory.get_or_create(definition.clone(), |definition| {
            let program =
                self.load_program(&definition.vertex_shader, &definition.fragment_shader)?;
            let mut material = Material::new(program);
            if let Some(path) = &definition.texture {
                let texture = self.load_texture(path, texture_unit::DIFFUSE)?;
                material.set_sampler(location::DIFFUSE_SAMPLER, texture.id, texture.unit);
            }
            Ok(Arc::new(material))
        });
        self.material_factory = factory;
        material
    }

    pub fn shader(&self, id: ShaderId) -> Option<&Shader> {
        self.shaders.get(id)
    }

    pub fn program(&self, id: ProgramId) -> Option<&Program> {
        self.programs.get(id)
    }

    /// Pixels of the loaded texture.
    pub fn texture_image(&self, id: TextureId) -> Option<&RgbaImage> {
        self.images.get(id)
    }

    /// Count of loaded shaders, programs and textures.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.shaders.len(), self.programs.len(), self.images.len())
    }
}

fn expect_stage(
    shaders: &SlotMap<ShaderId, Shader>,
    id: ShaderId,
    expected: ShaderType,
) -> Result<()> {
    let shader = shaders.get(id).ok_or(AssetError::UnknownShader)?;
    if shader.ty != expected {
        return Err(AssetError::ShaderStageMismatch {
            expected,
            found: shader.ty,
        });
    }
    Ok(())
}
