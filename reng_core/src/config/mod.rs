//! Configuration utilities for game engine and your game.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use semver::Version;

/// This struct represents general configuration of game engine.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    enable_validation: bool,
    asset_root: PathBuf,
    frame_time: Duration,
    max_frames: Option<u64>,
    real_time: bool,
}

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version = ENGINE_VERSION_STR
        .parse()
        .expect("package version must follow semver");
}

/// Duration of one frame when running at 60 frames per second.
pub const DEFAULT_FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

impl Config {
    /// Creates new configuration with given name, version and validation usage.
    pub fn new(name: String, version: Version, enable_validation: bool) -> Self {
        Self {
            name,
            version,
            enable_validation,
            asset_root: PathBuf::from("assets"),
            frame_time: DEFAULT_FRAME_TIME,
            max_frames: None,
            real_time: true,
        }
    }

    /// Sets directory against which relative asset paths are resolved.
    pub fn with_asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    /// Sets fixed duration of one frame of main loop.
    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Sets count of frames after which main loop stops.
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Sets if main loop should wait for the frame time to pass.
    pub fn with_real_time(mut self, real_time: bool) -> Self {
        self.real_time = real_time;
        self
    }

    /// Name of your game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// If game will use validation (useful for debugging).
    pub fn enable_validation(&self) -> bool {
        self.enable_validation
    }

    /// Root directory of game assets.
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Fixed duration of one frame.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Count of frames to run, `None` means forever.
    pub fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }

    /// If main loop is paced by the wall clock.
    pub fn real_time(&self) -> bool {
        self.real_time
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            "Hello World".to_string(),
            Version::new(0, 0, 0),
            cfg!(debug_assertions),
        )
    }
}
