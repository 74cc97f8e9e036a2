//! Utilities for game engine error handling.

use thiserror::Error;

use reng_ecs::EcsError;

use crate::asset::AssetError;

/// Result of any operation of the engine which can return an error.
pub type Result<T> = std::result::Result<T, EngineError>;

/// General error type of game engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot create more than one engine instance")]
    Initialized,

    #[error("component storage error: {0}")]
    Ecs(#[from] EcsError),

    #[error("bad asset load: {0}")]
    Asset(#[from] AssetError),
}
