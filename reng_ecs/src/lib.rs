//! Entity Component System (ECS) utilities for game engine.

pub use component::{AnyContainer, Component, ComponentContainer, ComponentHandle};
pub use database::ComponentDatabase;
pub use entity::{Entity, EntityId, EntityRegistry};
pub use error::{EcsError, Result};
pub use update::{DeltaTime, UpdateComponent};

mod component;
mod database;
mod entity;
mod error;
mod update;

#[cfg(test)]
mod tests;
