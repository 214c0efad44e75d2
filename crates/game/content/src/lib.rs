//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and turns it into the
//! [`WorldData`] database the engine queries:
//! - the built-in "Rescue the Princess" campaign (compiled in)
//! - world databases authored in RON
//! - runtime tuning authored in TOML
//!
//! Content is consumed read-only through `game-core`'s `WorldOracle`
//! and never appears in session state. All loaders run the same
//! cross-reference validation as the built-in campaign.

pub mod campaign;
pub mod world_data;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use campaign::rescue_the_princess;
pub use world_data::WorldData;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, WorldCatalog, WorldLoader};
