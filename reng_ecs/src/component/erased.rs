//! Type-erased access to component containers.

use std::any::{Any, TypeId};

use super::{component_name, Component, ComponentContainer};
use crate::entity::EntityId;

/// Container of components which type was erased.
///
/// Allows to store containers of different component types in one collection.
/// Concrete container is recovered by [`try_as`](dyn AnyContainer::try_as)
/// which checks the type of stored components.
///
pub trait AnyContainer: Any + Send + Sync {
    /// Type of stored components.
    fn component_type(&self) -> TypeId;

    /// Short name of stored components type.
    fn component_name(&self) -> &'static str;

    /// Count of stored components.
    fn len(&self) -> usize;

    /// Returns `true` if there are no stored components.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if component was attached to the entity.
    fn contains(&self, entity: EntityId) -> bool;

    /// Removes component attached to the entity, if any.
    ///
    /// Returns `true` if component was removed.
    ///
    fn remove_entity(&mut self, entity: EntityId) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> AnyContainer for ComponentContainer<T>
where
    T: Component,
{
    fn component_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn component_name(&self) -> &'static str {
        component_name::<T>()
    }

    fn len(&self) -> usize {
        ComponentContainer::len(self)
    }

    fn contains(&self, entity: EntityId) -> bool {
        ComponentContainer::contains(self, entity)
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.remove(entity).is_ok()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn AnyContainer {
    /// Returns `true` if this container stores components of type `T`.
    pub fn is<T>(&self) -> bool
    where
        T: Component,
    {
        self.component_type() == TypeId::of::<T>()
    }

    /// Recovers concrete container of components of type `T`.
    ///
    /// Returns `None` if this container stores components of other type.
    ///
    pub fn try_as<T>(&self) -> Option<&ComponentContainer<T>>
    where
        T: Component,
    {
        self.as_any().downcast_ref()
    }

    /// Recovers concrete container of components of type `T`.
    ///
    /// Returns `None` if this container stores components of other type.
    ///
    pub fn try_as_mut<T>(&mut self) -> Option<&mut ComponentContainer<T>>
    where
        T: Component,
    {
        self.as_any_mut().downcast_mut()
    }

    /// Recovers owned concrete container of components of type `T`.
    ///
    /// Gives the container back if it stores components of other type.
    ///
    pub fn try_into_typed<T>(self: Box<Self>) -> Result<Box<ComponentContainer<T>>, Box<Self>>
    where
        T: Component,
    {
        if self.is::<T>() {
            self.into_any()
                .downcast()
                .map_err(|_| unreachable!("type of components was checked"))
        } else {
            Err(self)
        }
    }
}
