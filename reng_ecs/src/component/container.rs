//! Packed storage for statically typed **components** of ECS.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};
use std::slice;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::SlotMap;

use super::{component_name, Component, ComponentHandle, ComponentKey};
use crate::entity::EntityId;
use crate::error::{EcsError, Result};

/// Identifier of the next created container.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Storage for statically typed components of ECS.
///
/// Components are stored densely in order of insertion.
/// Removal moves the last component into the freed slot,
/// so slot indices are not stable across removals: use [`ComponentHandle`]
/// or [`EntityId`] to refer to the component for a long time.
///
pub struct ComponentContainer<T>
where
    T: Component,
{
    /// Unique in the process, stamped into all handles of this container.
    id: u64,
    /// Components are actually stored here.
    components: Vec<T>,
    /// Owner of the component in the same slot.
    entities: Vec<EntityId>,
    /// Handle key of the component in the same slot.
    keys: Vec<ComponentKey>,
    entity_to_slot: HashMap<EntityId, usize>,
    key_to_slot: SlotMap<ComponentKey, usize>,
}

impl<T> ComponentContainer<T>
where
    T: Component,
{
    /// Creates an empty component container.
    pub fn new() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            components: Vec::new(),
            entities: Vec::new(),
            keys: Vec::new(),
            entity_to_slot: HashMap::new(),
            key_to_slot: SlotMap::with_key(),
        }
    }

    /// Inserts component and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if component was already attached to the entity.
    ///
    pub fn add(&mut self, entity: EntityId, component: T) -> Result<ComponentHandle<T>> {
        if self.contains(entity) {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: component_name::<T>(),
            });
        }
        let slot = self.components.len();
        let key = self.key_to_slot.insert(slot);
        self.components.push(component);
        self.entities.push(entity);
        self.keys.push(key);
        self.entity_to_slot.insert(entity, slot);
        Ok(ComponentHandle::new(self.id, key))
    }

    /// Removes component and detaches it from the entity.
    ///
    /// The last component is moved into the freed slot.
    /// Handle of the removed component becomes stale.
    ///
    /// # Errors
    ///
    /// An error is returned if no component is attached to the entity.
    ///
    pub fn remove(&mut self, entity: EntityId) -> Result<T> {
        let slot = self
            .entity_to_slot
            .remove(&entity)
            .ok_or_else(|| Self::unknown(entity))?;

        let key = self.keys.swap_remove(slot);
        self.key_to_slot.remove(key);
        self.entities.swap_remove(slot);
        let component = self.components.swap_remove(slot);

        if let Some(&moved) = self.entities.get(slot) {
            self.entity_to_slot.insert(moved, slot);
            self.key_to_slot[self.keys[slot]] = slot;
        }
        Ok(component)
    }

    /// Returns `true` if component was already attached to the entity.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entity_to_slot.contains_key(&entity)
    }

    /// Current slot of component attached to the entity.
    pub fn slot_of(&self, entity: EntityId) -> Option<usize> {
        self.entity_to_slot.get(&entity).copied()
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get(&self, entity: EntityId) -> Result<&T> {
        let slot = self.slot_of(entity).ok_or_else(|| Self::unknown(entity))?;
        Ok(&self.components[slot])
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut(&mut self, entity: EntityId) -> Result<&mut T> {
        let slot = self.slot_of(entity).ok_or_else(|| Self::unknown(entity))?;
        Ok(&mut self.components[slot])
    }

    /// Creates handle for component attached to the entity.
    pub fn handle_of(&self, entity: EntityId) -> Option<ComponentHandle<T>> {
        let slot = self.slot_of(entity)?;
        Some(ComponentHandle::new(self.id, self.keys[slot]))
    }

    /// Current slot of component referred by the handle.
    ///
    /// # Errors
    ///
    /// An error is returned if the handle was created by another container
    /// or its component was removed.
    ///
    pub fn handle_slot(&self, handle: ComponentHandle<T>) -> Result<usize> {
        if handle.container() != self.id {
            return Err(EcsError::ForeignHandle {
                component: component_name::<T>(),
            });
        }
        self.key_to_slot
            .get(handle.key())
            .copied()
            .ok_or(EcsError::StaleHandle {
                component: component_name::<T>(),
            })
    }

    /// Retrieves an immutable reference to component referred by the handle.
    pub fn resolve(&self, handle: ComponentHandle<T>) -> Result<&T> {
        let slot = self.handle_slot(handle)?;
        Ok(&self.components[slot])
    }

    /// Retrieves a mutable reference to component referred by the handle.
    pub fn resolve_mut(&mut self, handle: ComponentHandle<T>) -> Result<&mut T> {
        let slot = self.handle_slot(handle)?;
        Ok(&mut self.components[slot])
    }

    /// All components in their slot order.
    pub fn all(&self) -> &[T] {
        &self.components
    }

    /// All components in their slot order.
    pub fn all_mut(&mut self) -> &mut [T] {
        &mut self.components
    }

    /// Owners of components, parallel to [`all`](Self::all).
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entities
    }

    /// Owner of the component in the slot.
    pub fn entity_id(&self, slot: usize) -> Option<EntityId> {
        self.entities.get(slot).copied()
    }

    /// Count of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns immutable iterator over all components with their entities.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Returns mutable iterator over all components with their entities.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }

    fn unknown(entity: EntityId) -> EcsError {
        EcsError::UnknownEntity {
            entity,
            component: component_name::<T>(),
        }
    }
}

impl<T> Default for ComponentContainer<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a ComponentContainer<T>
where
    T: Component,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ComponentContainer<T>
where
    T: Component,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter_mut()
    }
}

impl<T> Index<EntityId> for ComponentContainer<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, entity: EntityId) -> &Self::Output {
        self.get(entity)
            .expect("there is no component attached to the entity")
    }
}

impl<T> IndexMut<EntityId> for ComponentContainer<T>
where
    T: Component,
{
    fn index_mut(&mut self, entity: EntityId) -> &mut Self::Output {
        self.get_mut(entity)
            .expect("there is no component attached to the entity")
    }
}
