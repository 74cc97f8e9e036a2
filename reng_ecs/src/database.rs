//! Storage of component containers of all types.

use std::any::TypeId;
use std::collections::HashMap;

use crate::component::{
    component_name, AnyContainer, Component, ComponentContainer, ComponentHandle,
};
use crate::entity::EntityId;
use crate::error::{EcsError, Result};
use crate::update::{DeltaTime, UpdateComponent, Updater};

/// Database of all components of ECS.
///
/// Holds one container per component type, created on first use.
/// Also drives the per-frame update pass over registered component types.
///
#[derive(Default)]
pub struct ComponentDatabase {
    /// Map with typeid of components and their containers.
    containers: HashMap<TypeId, Box<dyn AnyContainer>>,
    /// Updateable component types in order of registration.
    updaters: Vec<Updater>,
    /// Type and name of components which container is checked out for update.
    busy: Option<(TypeId, &'static str)>,
    updating: bool,
}

impl ComponentDatabase {
    /// Creates new empty database.
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
            updaters: Vec::new(),
            busy: None,
            updating: false,
        }
    }

    /// Retrieves container of components of type `T`, creating it if needed.
    ///
    /// # Errors
    ///
    /// An error is returned if components of type `T` are being updated right now.
    ///
    pub fn get_or_create_container<T>(&mut self) -> Result<&mut ComponentContainer<T>>
    where
        T: Component,
    {
        self.ensure_available::<T>()?;
        let boxed = self.containers.entry(TypeId::of::<T>()).or_insert_with(|| {
            log::debug!("created container for `{}`", component_name::<T>());
            let container: Box<dyn AnyContainer> = Box::new(ComponentContainer::<T>::new());
            container
        });
        boxed
            .try_as_mut()
            .ok_or(EcsError::InvalidTypeRecovery {
                component: component_name::<T>(),
            })
    }

    /// Retrieves container of components of type `T`, if it was created.
    ///
    /// # Errors
    ///
    /// An error is returned if components of type `T` are being updated right now.
    ///
    pub fn container<T>(&self) -> Result<Option<&ComponentContainer<T>>>
    where
        T: Component,
    {
        self.ensure_available::<T>()?;
        Ok(self.stored())
    }

    /// Retrieves container of components of type `T`, if it was created.
    ///
    /// # Errors
    ///
    /// An error is returned if components of type `T` are being updated right now.
    ///
    pub fn container_mut<T>(&mut self) -> Result<Option<&mut ComponentContainer<T>>>
    where
        T: Component,
    {
        self.ensure_available::<T>()?;
        Ok(self.stored_mut())
    }

    /// Count of created containers.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Inserts component of type `T` and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if component of type `T` was already attached to the entity.
    ///
    pub fn add_component<T>(&mut self, entity: EntityId, component: T) -> Result<ComponentHandle<T>>
    where
        T: Component,
    {
        self.get_or_create_container()?.add(entity, component)
    }

    /// Checks if component of type `T` is attached to the entity.
    pub fn contains_component<T>(&self, entity: EntityId) -> Result<bool>
    where
        T: Component,
    {
        let contains = self
            .container::<T>()?
            .map_or(false, |container| container.contains(entity));
        Ok(contains)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get_component<T>(&self, entity: EntityId) -> Result<&T>
    where
        T: Component,
    {
        match self.container::<T>()? {
            Some(container) => container.get(entity),
            None => Err(Self::unknown::<T>(entity)),
        }
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_component_mut<T>(&mut self, entity: EntityId) -> Result<&mut T>
    where
        T: Component,
    {
        match self.container_mut::<T>()? {
            Some(container) => container.get_mut(entity),
            None => Err(Self::unknown::<T>(entity)),
        }
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn remove_component<T>(&mut self, entity: EntityId) -> Result<T>
    where
        T: Component,
    {
        match self.container_mut::<T>()? {
            Some(container) => container.remove(entity),
            None => Err(Self::unknown::<T>(entity)),
        }
    }

    /// Retrieves an immutable reference to component referred by the handle.
    pub fn resolve<T>(&self, handle: ComponentHandle<T>) -> Result<&T>
    where
        T: Component,
    {
        self.container::<T>()?
            .ok_or_else(Self::stale::<T>)?
            .resolve(handle)
    }

    /// Retrieves a mutable reference to component referred by the handle.
    pub fn resolve_mut<T>(&mut self, handle: ComponentHandle<T>) -> Result<&mut T>
    where
        T: Component,
    {
        self.container_mut::<T>()?
            .ok_or_else(Self::stale::<T>)?
            .resolve_mut(handle)
    }

    /// Removes all components attached to the entity.
    ///
    /// Returns count of removed components.
    ///
    /// # Errors
    ///
    /// An error is returned if called from an update of some component,
    /// because container of the updated type cannot be reached.
    /// Nothing is removed in this case.
    ///
    pub fn remove_entity(&mut self, entity: EntityId) -> Result<usize> {
        if let Some((_, component)) = self.busy {
            return Err(EcsError::ContainerBusy { component });
        }
        let removed = self
            .containers
            .values_mut()
            .map(|container| container.remove_entity(entity))
            .filter(|&removed| removed)
            .count();
        Ok(removed)
    }

    /// Registers type of components which will be updated every frame.
    ///
    /// Types are updated in order of registration.
    /// Returns `false` if the type was already registered.
    ///
    pub fn register_update<T>(&mut self) -> bool
    where
        T: UpdateComponent,
    {
        let updater = Updater::of::<T>();
        if self.is_update_registered::<T>() {
            log::warn!("update of `{}` was already registered", updater.name);
            return false;
        }
        log::debug!("registered update of `{}`", updater.name);
        self.updaters.push(updater);
        true
    }

    /// Returns `true` if type of components was registered for update.
    pub fn is_update_registered<T>(&self) -> bool
    where
        T: UpdateComponent,
    {
        let type_id = TypeId::of::<T>();
        self.updaters
            .iter()
            .any(|updater| updater.type_id == type_id)
    }

    /// Updates all components of registered types.
    ///
    /// Returns count of update calls.
    ///
    /// # Errors
    ///
    /// An error is returned if called from an update of some component.
    ///
    pub fn run_update(&mut self, delta_time: DeltaTime) -> Result<usize> {
        if self.updating {
            return Err(EcsError::ReentrantUpdate);
        }
        let mut pass = UpdatePass::start(self);

        let mut result = Ok(0);
        for index in 0..pass.database.updaters.len() {
            let updater = pass.database.updaters[index];
            match (updater.run)(&mut *pass.database, delta_time) {
                Ok(count) => {
                    log::trace!("updated {} of `{}`", count, updater.name);
                    result = result.map(|total| total + count);
                }
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
        result
    }

    /// Takes container of components of type `T` out of the database.
    pub(crate) fn check_out<T>(&mut self) -> Result<Option<Box<ComponentContainer<T>>>>
    where
        T: Component,
    {
        self.ensure_available::<T>()?;
        let type_id = TypeId::of::<T>();
        let boxed = match self.containers.remove(&type_id) {
            Some(boxed) => boxed,
            None => return Ok(None),
        };
        match boxed.try_into_typed::<T>() {
            Ok(container) => {
                self.busy = Some((type_id, component_name::<T>()));
                Ok(Some(container))
            }
            Err(boxed) => {
                self.containers.insert(type_id, boxed);
                Err(EcsError::InvalidTypeRecovery {
                    component: component_name::<T>(),
                })
            }
        }
    }

    /// Puts container taken by [`check_out`](Self::check_out) back.
    pub(crate) fn check_in<T>(&mut self, container: Box<ComponentContainer<T>>)
    where
        T: Component,
    {
        let type_id = TypeId::of::<T>();
        self.containers.insert(type_id, container);
        if self.is_busy(type_id) {
            self.busy = None;
        }
    }

    fn stored<T>(&self) -> Option<&ComponentContainer<T>>
    where
        T: Component,
    {
        let boxed = self.containers.get(&TypeId::of::<T>())?;
        boxed.try_as()
    }

    fn stored_mut<T>(&mut self) -> Option<&mut ComponentContainer<T>>
    where
        T: Component,
    {
        let boxed = self.containers.get_mut(&TypeId::of::<T>())?;
        boxed.try_as_mut()
    }

    fn is_busy(&self, type_id: TypeId) -> bool {
        matches!(self.busy, Some((busy, _)) if busy == type_id)
    }

    fn ensure_available<T>(&self) -> Result<()>
    where
        T: Component,
    {
        if self.is_busy(TypeId::of::<T>()) {
            return Err(EcsError::ContainerBusy {
                component: component_name::<T>(),
            });
        }
        Ok(())
    }

    fn unknown<T>(entity: EntityId) -> EcsError
    where
        T: Component,
    {
        EcsError::UnknownEntity {
            entity,
            component: component_name::<T>(),
        }
    }

    fn stale<T>() -> EcsError
    where
        T: Component,
    {
        EcsError::StaleHandle {
            component: component_name::<T>(),
        }
    }
}

/// Marks the database as running an update pass.
///
/// Mark is cleared on drop, also when some update panics.
///
struct UpdatePass<'db> {
    database: &'db mut ComponentDatabase,
}

impl<'db> UpdatePass<'db> {
    fn start(database: &'db mut ComponentDatabase) -> Self {
        database.updating = true;
        Self { database }
    }
}

impl Drop for UpdatePass<'_> {
    fn drop(&mut self) {
        self.database.updating = false;
    }
}
