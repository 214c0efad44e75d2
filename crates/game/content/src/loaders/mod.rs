//! Content loaders for reading game data from files.
//!
//! World databases are authored in RON, runtime tuning in TOML. Loaders
//! produce the same [`WorldData`](crate::WorldData) the built-in
//! campaign builds in code, and run the same validation.

pub mod config;
pub mod world;

pub use config::ConfigLoader;
pub use world::{WorldCatalog, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
