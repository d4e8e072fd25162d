//! Per-frame hierarchical tile selection for a streaming 3D tileset renderer.
//!
//! Given a bounded-volume hierarchy of [`Tile`]s with geometric error and content-availability
//! state, [`Tileset::select_tiles`] decides each frame which tiles to render, which to request
//! for loading, and which are structural-only. Tile content fetching/decoding, GPU upload, the
//! render pass, frustum/occlusion math, and LRU eviction policy are all external collaborators
//! the caller supplies through the [`geometry::TileGeometry`] and [`cache::CacheHandle`] traits.

mod arena;
mod cache;
mod config;
mod context;
mod error;
mod geometry;
mod logging;
mod priority;
mod scratch;
mod stats;
mod tile;
mod tileset;
mod traversal;
mod visibility;

#[cfg(test)]
mod tests;

pub use arena::{TileArena, TileId};
pub use cache::{CacheHandle, NullCache};
pub use config::{TraversalOptions, DESCENDANT_SELECTION_DEPTH};
pub use context::TraversalOutputs;
pub use error::TraversalError;
pub use geometry::{BoundingVolume, ContentVisibility, FrameState, TileGeometry};
pub use stats::TraversalStats;
pub use tile::{Refine, Tile};
pub use tileset::Tileset;
