//! Utilities for *entities* in ECS.

use std::collections::BTreeMap;
use std::fmt;

use crate::component::{Component, ComponentHandle};
use crate::database::ComponentDatabase;
use crate::error::Result;

/// Unique identifier of the *entity* of ECS.
///
/// Entity does not own any data: components attached to it
/// are owned by their containers.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates new entity identifier from raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value of this identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage for all entities of ECS.
///
/// Identifiers are never reused during the lifetime of the registry.
///
#[derive(Debug)]
pub struct EntityRegistry {
    next: u64,
    /// Names keyed by raw identifiers: they grow monotonically,
    /// so key order is order of creation.
    names: BTreeMap<u64, String>,
}

impl EntityRegistry {
    /// Creates an empty entity registry.
    pub fn new() -> Self {
        Self {
            next: 1,
            names: BTreeMap::new(),
        }
    }

    /// Creates new entity with given display name.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId::new(self.next);
        self.next += 1;
        self.names.insert(id.get(), name.into());
        id
    }

    /// Forgets the entity.
    ///
    /// Returns name of the entity, if it was alive.
    ///
    pub fn despawn(&mut self, id: EntityId) -> Option<String> {
        self.names.remove(&id.get())
    }

    /// Returns `true` if the entity is alive.
    pub fn contains(&self, id: EntityId) -> bool {
        self.names.contains_key(&id.get())
    }

    /// Display name of the entity, if it is alive.
    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.names.get(&id.get()).map(String::as_str)
    }

    /// Count of alive entities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns iterator over all alive entities in order of creation.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.names.keys().copied().map(EntityId::new)
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Facade which binds an entity to the database of its components.
///
/// Several facades can refer to the same entity:
/// they are equal if their identifiers are equal.
///
pub struct Entity<'db> {
    id: EntityId,
    database: &'db mut ComponentDatabase,
}

impl<'db> Entity<'db> {
    /// Binds the entity to the database.
    pub fn new(id: EntityId, database: &'db mut ComponentDatabase) -> Self {
        Self { id, database }
    }

    /// Identifier of the entity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attaches new component to the entity.
    ///
    /// Returned handle can be stored by other components to refer to this one.
    ///
    /// # Errors
    ///
    /// An error is returned if component of type `T` was already attached to the entity.
    ///
    pub fn emplace_component<T>(&mut self, component: T) -> Result<ComponentHandle<T>>
    where
        T: Component,
    {
        self.database.add_component(self.id, component)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn component<T>(&self) -> Result<&T>
    where
        T: Component,
    {
        self.database.get_component(self.id)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn component_mut<T>(&mut self) -> Result<&mut T>
    where
        T: Component,
    {
        self.database.get_component_mut(self.id)
    }

    /// Detaches component of type `T` from the entity and returns it.
    pub fn remove_component<T>(&mut self) -> Result<T>
    where
        T: Component,
    {
        self.database.remove_component(self.id)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if components of type `T` are being updated right now.
    ///
    pub fn has_component<T>(&self) -> Result<bool>
    where
        T: Component,
    {
        self.database.contains_component::<T>(self.id)
    }

    /// Database this entity is bound to.
    pub fn database(&mut self) -> &mut ComponentDatabase {
        self.database
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity<'_> {}

impl PartialEq<EntityId> for Entity<'_> {
    fn eq(&self, other: &EntityId) -> bool {
        self.id == *other
    }
}

impl fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Entity").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        let mut registry = EntityRegistry::new();
        let camera = registry.spawn("Camera");
        let light = registry.spawn("Light");

        assert_ne!(camera, light);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(light), Some("Light"));

        assert_eq!(registry.despawn(camera), Some("Camera".to_string()));
        assert_eq!(registry.despawn(camera), None);
        assert!(!registry.contains(camera));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![light]);

        let tri = registry.spawn("Spinning Tri");
        assert_ne!(tri, camera);
    }

    #[test]
    fn test_despawn_keeps_creation_order() {
        let mut registry = EntityRegistry::new();
        let ids: Vec<_> = (0..1000).map(|i| registry.spawn(format!("entity {}", i))).collect();

        for &id in ids.iter().skip(1).step_by(2) {
            assert!(registry.despawn(id).is_some());
        }
        let cube = registry.spawn("Cube");

        let expected: Vec<_> = ids.iter().copied().step_by(2).chain([cube]).collect();
        assert_eq!(registry.ids().collect::<Vec<_>>(), expected);
        assert_eq!(registry.len(), 501);
        assert_eq!(registry.name(ids[998]), Some("entity 998"));
        assert_eq!(registry.name(ids[999]), None);
    }

    #[test]
    fn test_facade_identity() {
        let mut first = ComponentDatabase::new();
        let mut second = ComponentDatabase::new();
        let id = EntityId::new(7);

        let a = Entity::new(id, &mut first);
        let b = Entity::new(id, &mut second);
        assert_eq!(a, b);
        assert_eq!(a, id);
        assert_ne!(a, EntityId::new(8));
    }

    #[test]
    fn test_emplace_component() {
        let mut database = ComponentDatabase::new();
        let mut entity = Entity::new(EntityId::new(1), &mut database);

        let handle = entity.emplace_component(42u32).unwrap();
        assert!(entity.has_component::<u32>().unwrap());
        assert!(!entity.has_component::<i64>().unwrap());
        assert!(entity.emplace_component(43u32).is_err());

        *entity.component_mut::<u32>().unwrap() += 1;
        assert_eq!(*entity.component::<u32>().unwrap(), 43);
        assert_eq!(*entity.database().resolve(handle).unwrap(), 43);

        assert_eq!(entity.remove_component::<u32>().unwrap(), 43);
        assert!(!entity.has_component::<u32>().unwrap());
    }
}
