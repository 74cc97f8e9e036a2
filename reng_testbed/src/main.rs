//! Test scene of the small real-time 3D engine

use std::error::Error;
use std::path::Path;

use reng_core::config::{Config, Version};

mod logger;
mod scene;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");

/// Count of frames to run if it was not passed as the first argument.
const DEFAULT_FRAMES: u64 = 300;

/// Entry point of the test scene
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let _handle = logger::init()?;
    log::info!("logger initialized successfully");

    let frames = std::env::args()
        .nth(1)
        .map(|frames| frames.parse::<u64>())
        .transpose()?
        .unwrap_or(DEFAULT_FRAMES);

    let version: Version = APP_VERSION_STR.parse()?;
    let enable_validation = cfg!(debug_assertions);
    let config = Config::new(APP_NAME.to_string(), version, enable_validation)
        .with_asset_root(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
        .with_max_frames(Some(frames));

    let mut engine = reng_core::init(config)?;
    scene::build(&mut engine)?;
    log::info!("scene contains {} entities", engine.entities().len());

    let max_frames = engine.config().max_frames();
    let count = engine.run(max_frames)?;
    log::info!(
        "finished {} frames, simulated {:?}",
        count,
        engine.elapsed(),
    );
    Ok(())
}
