//! Utilities for ECS error handling.

use thiserror::Error;

use crate::entity::EntityId;

/// Result of any fallible ECS operation.
pub type Result<T> = std::result::Result<T, EcsError>;

/// Errors of component storage and update dispatch.
///
/// Operation which returned an error leaves storage unchanged.
///
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    #[error("component `{component}` was already attached to the entity {entity}")]
    DuplicateComponent {
        entity: EntityId,
        component: &'static str,
    },

    #[error("there is no component `{component}` attached to the entity {entity}")]
    UnknownEntity {
        entity: EntityId,
        component: &'static str,
    },

    #[error("handle of component `{component}` refers to removed component")]
    StaleHandle { component: &'static str },

    #[error("handle of component `{component}` was created by another container")]
    ForeignHandle { component: &'static str },

    #[error("components `{component}` are being updated right now")]
    ContainerBusy { component: &'static str },

    #[error("update pass is already running")]
    ReentrantUpdate,

    #[error("container does not store components `{component}`")]
    InvalidTypeRecovery { component: &'static str },
}
