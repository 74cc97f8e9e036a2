//! API for small real-time 3D engine built on top of entity-component storage.

pub use reng_ecs as ecs;

pub use engine::{init, Engine};

pub mod asset;
pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod mesh;
pub mod prims;
pub mod transform;
