//! Utilities for engine initialization and its main loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ultraviolet::Vec3;

use reng_ecs::{ComponentDatabase, DeltaTime, Entity, EntityId, EntityRegistry, UpdateComponent};

use crate::asset::{location, texture_unit, AssetManager, Material};
use crate::component::{RenderableComponent, TransformComponent};
use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::import::{MaterialTextures, MeshSource};
use crate::transform::Transform;


/// General context of game engine.
///
/// Owns all entities with their components and drives their updates.
/// Unique instance can be created using [`init`] function.
///
pub struct Engine {
    config: Config,
    assets: AssetManager,
    entities: EntityRegistry,
    database: ComponentDatabase,
    frame: u64,
    elapsed: Duration,
}

impl Engine {
    /// Creates new engine which loads assets from the root of configuration.
    pub fn new(config: Config) -> Self {
        log::info!(
            "creating engine for `{}` v{} (validation {})",
            config.name(),
            config.version(),
            if config.enable_validation() { "on" } else { "off" },
        );
        Self {
            assets: AssetManager::new(config.asset_root()),
            config,
            entities: EntityRegistry::new(),
            database: ComponentDatabase::new(),
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assets(&self) -> &AssetManager {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetManager {
        &mut self.assets
    }

    pub fn database(&self) -> &ComponentDatabase {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut ComponentDatabase {
        &mut self.database
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Count of frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time passed since the first frame.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Registers type of components which will be updated every frame.
    ///
    /// Returns `false` if the type was already registered.
    ///
    pub fn register_update_component<T>(&mut self) -> bool
    where
        T: UpdateComponent,
    {
        self.database.register_update::<T>()
    }

    /// Creates new named entity.
    pub fn emplace_entity(&mut self, name: impl Into<String>) -> Entity<'_> {
        let id = self.entities.spawn(name);
        Entity::new(id, &mut self.database)
    }

    /// Retrieves facade of existing entity.
    pub fn entity(&mut self, id: EntityId) -> Option<Entity<'_>> {
        if !self.entities.contains(id) {
            return None;
        }
        Some(Entity::new(id, &mut self.database))
    }

    pub fn entity_name(&self, id: EntityId) -> Option<&str> {
        self.entities.name(id)
    }

    /// Destroys the entity together with all its components.
    ///
    /// Returns count of removed components or `None` if entity does not exist.
    ///
    /// # Errors
    ///
    /// An error is returned if components cannot be removed right now.
    /// Entity stays alive in this case.
    ///
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<Option<usize>> {
        if !self.entities.contains(id) {
            return Ok(None);
        }
        let removed = self.database.remove_entity(id)?;
        let name = self.entities.despawn(id).unwrap_or_default();
        log::debug!("destroyed entity {} `{}` with {} components", id, name, removed);
        Ok(Some(removed))
    }

    /// Runs one frame: updates all components of registered types.
    ///
    /// Returns count of update calls.
    ///
    pub fn tick(&mut self, delta_time: DeltaTime) -> Result<usize> {
        let updated = self.database.run_update(delta_time)?;
        self.frame += 1;
        self.elapsed += delta_time;
        Ok(updated)
    }

    /// Runs main loop with fixed frame time for the given count of frames.
    ///
    /// Runs forever if count of frames is `None`.
    /// Returns count of frames which were run.
    ///
    pub fn run(&mut self, frames: Option<u64>) -> Result<u64> {
        let frame_time = self.config.frame_time();
        let real_time = self.config.real_time();
        log::info!(
            "running {} frames of {:?}",
            frames.map_or_else(|| "infinite".to_string(), |frames| frames.to_string()),
            frame_time,
        );

        let mut stats = FrameStats::new();
        let mut count = 0;
        while frames.map_or(true, |frames| count < frames) {
            let frame_start = Instant::now();
            let updated = self.tick(frame_time)?;
            count += 1;

            let busy = frame_start.elapsed();
            stats.record(busy, updated);
            if real_time && busy < frame_time {
                std::thread::sleep(frame_time - busy);
            }
            if stats.frames as u32 * frame_time >= Duration::from_secs(1) {
                stats.report(self.frame);
                stats = FrameStats::new();
            }
        }
        if stats.frames > 0 {
            stats.report(self.frame);
        }
        Ok(count)
    }

    /// Adds an entity which renders every mesh of the model.
    ///
    /// Every material of every mesh gets its own copy of the material
    /// with textures of the model bound to it.
    /// Renderables are attached to child entities which share transform of the model.
    /// Returns identifier of the model entity.
    ///
    /// # Errors
    ///
    /// An error is returned if some mesh is invalid or its texture cannot be loaded.
    ///
    pub fn add_model(
        &mut self,
        name: &str,
        position: Vec3,
        source: &dyn MeshSource,
        material: &Material,
    ) -> Result<EntityId> {
        let id = self.entities.spawn(name);
        let transform = self
            .database
            .add_component(id, TransformComponent::new(Transform::new(position)))?;

        for index in 0..source.mesh_count() {
            let node = match source.mesh(index) {
                Some(node) if !node.is_empty() => node,
                _ => continue,
            };
            let mesh = Arc::new(node.to_mesh()?);

            let default = [MaterialTextures::default()];
            let textures = if node.materials.is_empty() {
                &default[..]
            } else {
                &node.materials[..]
            };
            for (number, textures) in textures.iter().enumerate() {
                let mut material = material.clone();
                if let Some(path) = &textures.diffuse {
                    let texture = self.assets.load_texture(path, texture_unit::DIFFUSE)?;
                    material.set_sampler(location::DIFFUSE_SAMPLER, texture.id, texture.unit);
                }
                if let Some(path) = &textures.normal {
                    let texture = self.assets.load_texture(path, texture_unit::NORMAL)?;
                    material.set_sampler(location::NORMAL_SAMPLER, texture.id, texture.unit);
                }

                let child = self
                    .entities
                    .spawn(format!("{}/{}#{}", name, node.name, number));
                let renderable = RenderableComponent::new(transform, mesh.clone(), Arc::new(material));
                self.database.add_component(child, renderable)?;
            }
        }
        log::debug!("added model `{}` as entity {}", name, id);
        Ok(id)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        log::info!(
            "dropping engine after {} frames with {} entities",
            self.frame,
            self.entities.len(),
        );
    }
}

/// Timing of frames since the last report.
struct FrameStats {
    frames: u64,
    updates: usize,
    busy: Duration,
    worst: Duration,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frames: 0,
            updates: 0,
            busy: Duration::ZERO,
            worst: Duration::ZERO,
        }
    }

    fn record(&mut self, busy: Duration, updates: usize) {
        self.frames += 1;
        self.updates += updates;
        self.busy += busy;
        self.worst = self.worst.max(busy);
    }

    fn report(&self, frame: u64) {
        let average = self.busy / self.frames as u32;
        log::info!(
            "frame {}: {} updates in {} frames, average {:?}, worst {:?}",
            frame,
            self.updates,
            self.frames,
            average,
            self.worst,
        );
    }
}

/// Creates a unique [`Engine`] instance.
/// If engine instance was created earlier, function call will return an error.
///
/// # Errors
///
/// An error is returned if engine instance have already been initialized.
///
pub fn init(config: Config) -> Result<Engine> {
    static FLAG: AtomicBool = AtomicBool::new(false);
    const UNINITIALIZED: bool = false;
    const INITIALIZED: bool = true;

    let initialized = FLAG
        .compare_exchange(
            UNINITIALIZED,
            INITIALIZED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_err();

    if initialized {
        return Err(EngineError::Initialized);
    }
    Ok(Engine::new(config))
}
