//! Utilities for *components* in ECS.

use std::any::{type_name, Any};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use slotmap::new_key_type;

pub use container::*;
pub use erased::*;

mod container;
mod erased;
mod tests;

/// Objects of this trait represent *component* of ECS.
///
/// Each entity can own at most one component of each type.
///
pub trait Component: Any + Send + Sync {}

impl<T> Component for T where T: Any + Send + Sync {}

/// Short name of the component type, used in errors and logs.
pub(crate) fn component_name<T>() -> &'static str
where
    T: Component,
{
    let name = type_name::<T>();
    match name.find('<') {
        Some(generics) => name[..generics].rsplit("::").next().unwrap_or(name),
        None => name.rsplit("::").next().unwrap_or(name),
    }
}

new_key_type! {
    /// Unique identifier of the *component* of ECS.
    pub(crate) struct ComponentKey;
}

/// Generation-tagged reference to the component stored in [`ComponentContainer`].
///
/// Handle stays valid when its component is moved inside of the container
/// and becomes stale after the component was removed.
/// Handle remembers its container and is rejected by any other one.
///
pub struct ComponentHandle<T>
where
    T: Component,
{
    container: u64,
    key: ComponentKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ComponentHandle<T>
where
    T: Component,
{
    pub(crate) fn new(container: u64, key: ComponentKey) -> Self {
        Self {
            container,
            key,
            _marker: PhantomData,
        }
    }

    pub(crate) fn key(self) -> ComponentKey {
        self.key
    }

    pub(crate) fn container(self) -> u64 {
        self.container
    }
}

impl<T> Copy for ComponentHandle<T> where T: Component {}

impl<T> Clone for ComponentHandle<T>
where
    T: Component,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for ComponentHandle<T>
where
    T: Component,
{
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container && self.key == other.key
    }
}

impl<T> Eq for ComponentHandle<T> where T: Component {}

impl<T> Hash for ComponentHandle<T>
where
    T: Component,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container.hash(state);
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for ComponentHandle<T>
where
    T: Component,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ComponentHandle")
            .field(&component_name::<T>())
            .field(&self.container)
            .field(&self.key)
            .finish()
    }
}
