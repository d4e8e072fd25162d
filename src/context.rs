//! Shared per-call context threaded through the traversal stages.
//!
//! Every stage (`visibility`, `priority`, `traversal::base/empty/select`) needs the same handful
//! of collaborators — the geometry/cache traits, the current options, the frame, and the output
//! buffers — so they're bundled here instead of growing an ever-longer parameter list on every
//! function, the way the teacher bundles per-call collaborators into a single struct in
//! `content/tilesets.rs` (`process_tile(source, client, camera, tileset, tile)`).

use crate::arena::TileId;
use crate::cache::CacheHandle;
use crate::config::TraversalOptions;
use crate::geometry::{FrameState, TileGeometry};
use crate::stats::TraversalStats;

/// The three output lists plus the mixed-content flag (spec §6 "Produced outputs").
#[derive(Debug, Default)]
pub struct TraversalOutputs {
    pub selected_tiles: Vec<TileId>,
    pub selected_tiles_to_style: Vec<TileId>,
    pub requested_tiles: Vec<TileId>,
    pub empty_tiles: Vec<TileId>,
    pub has_mixed_content: bool,
}

impl TraversalOutputs {
    pub(crate) fn clear_for_new_frame(&mut self) {
        self.selected_tiles.clear();
        self.selected_tiles_to_style.clear();
        self.requested_tiles.clear();
        self.empty_tiles.clear();
        self.has_mixed_content = false;
    }
}

/// Context for a single `select_tiles` call. Borrowed mutably by every traversal stage; never
/// stored.
pub(crate) struct Ctx<'a> {
    pub geometry: &'a dyn TileGeometry,
    pub frame: &'a dyn FrameState,
    pub cache: &'a dyn CacheHandle,
    pub options: &'a TraversalOptions,
    pub stats: &'a mut TraversalStats,
    pub out: &'a mut TraversalOutputs,
    /// Visibility-memoization epoch for this call (spec §4.B); distinct from `frame_number`
    /// because a host may call `select_tiles` more than once against the same frame number in
    /// degenerate cases (e.g. tests), and visibility must still be recomputed each call.
    pub epoch: u64,
    pub frame_number: u64,
    /// Running min/max of requested-tile priority, used only for the asymmetric bookkeeping
    /// described in spec §9's open question; not otherwise consumed by the engine.
    pub min_priority: f64,
    pub max_priority: f64,
}
