//! §4.I orchestrator. [`Tileset`] is the engine's state: the arena, the tunables, the output
//! buffers, the statistics, and the scratch stacks reused frame to frame.

use crate::arena::{TileArena, TileId};
use crate::cache::CacheHandle;
use crate::config::TraversalOptions;
use crate::context::{Ctx, TraversalOutputs};
use crate::error::TraversalError;
use crate::geometry::{FrameState, TileGeometry};
use crate::logging;
use crate::scratch::ScratchStack;
use crate::stats::TraversalStats;
use crate::traversal;

/// Owns a tile arena and drives one `select_tiles` call per rendered frame.
pub struct Tileset {
    arena: TileArena,
    root: TileId,
    pub options: TraversalOptions,
    stats: TraversalStats,
    outputs: TraversalOutputs,
    cache: Box<dyn CacheHandle>,
    epoch: u64,
    /// §4.D/F base/skip traversal stack.
    base_scratch: ScratchStack,
    /// §4.E empty-subtree probe stack (separate from `base_scratch` since a probe call nests
    /// inside a single base-traversal pop).
    empty_scratch: ScratchStack,
    /// §4.H descendant-fallback stack, depth-tagged.
    descendant_scratch: ScratchStack<(TileId, u32)>,
    /// §4.G selection-pass main stack.
    select_scratch: ScratchStack,
    /// §4.G selection-pass ancestor stack, run alongside `select_scratch`.
    ancestor_scratch: ScratchStack<TileId>,
}

impl Tileset {
    /// Validates `arena` (no dangling references, no cycles, no reparented children) and wraps
    /// it as a ready-to-traverse tileset (spec §7 "the one genuinely fallible surface").
    pub fn new(
        arena: TileArena,
        root: TileId,
        options: TraversalOptions,
        cache: Box<dyn CacheHandle>,
    ) -> Result<Self, TraversalError> {
        if arena.is_empty() {
            return Err(TraversalError::EmptyTileset);
        }
        arena.validate(root)?;
        Ok(Self {
            arena,
            root,
            options,
            stats: TraversalStats::default(),
            outputs: TraversalOutputs::default(),
            cache,
            epoch: 0,
            base_scratch: ScratchStack::default(),
            empty_scratch: ScratchStack::default(),
            descendant_scratch: ScratchStack::default(),
            select_scratch: ScratchStack::default(),
            ancestor_scratch: ScratchStack::default(),
        })
    }

    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    pub fn outputs(&self) -> &TraversalOutputs {
        &self.outputs
    }

    pub fn root(&self) -> TileId {
        self.root
    }

    pub fn arena(&self) -> &TileArena {
        &self.arena
    }

    /// Spec §4.I orchestrator. Returns `true` if a traversal ran (root visible and not already
    /// within budget); `false` means the previous frame's (or an empty) selection stands.
    pub fn select_tiles(&mut self, frame: &dyn FrameState, geometry: &dyn TileGeometry) -> bool {
        let frame_number = frame.frame_number();
        let _span = logging::frame_span(frame_number).entered();

        self.outputs.requested_tiles.clear();
        if self.options.debug_freeze_frame {
            return false;
        }
        self.outputs.clear_for_new_frame();
        self.stats.reset();
        self.epoch += 1;

        let mut ctx = Ctx {
            geometry,
            frame,
            cache: self.cache.as_ref(),
            options: &self.options,
            stats: &mut self.stats,
            out: &mut self.outputs,
            epoch: self.epoch,
            frame_number,
            min_priority: f64::MAX,
            max_priority: f64::MIN,
        };

        traversal::update_tile(&mut self.arena, self.root, &mut ctx);
        if !self.arena.get(self.root).is_visible() {
            return false;
        }

        let root_sse = {
            let root_tile = self.arena.get(self.root);
            geometry.screen_space_error(root_tile, frame, true)
        };
        if root_sse <= self.options.maximum_screen_space_error {
            return false;
        }

        let max_sse = self.options.maximum_screen_space_error;
        if !self.options.skip_level_of_detail {
            traversal::base::execute_traversal(
                &mut self.arena,
                self.root,
                max_sse,
                max_sse,
                &mut ctx,
                &mut self.base_scratch,
                &mut self.empty_scratch,
                &mut self.descendant_scratch,
            );
        } else if self.options.immediately_load_desired_level_of_detail {
            traversal::base::execute_traversal(
                &mut self.arena,
                self.root,
                f64::INFINITY,
                max_sse,
                &mut ctx,
                &mut self.base_scratch,
                &mut self.empty_scratch,
                &mut self.descendant_scratch,
            );
            traversal::select::traverse_and_select(
                &mut self.arena,
                self.root,
                &mut ctx,
                &mut self.select_scratch,
                &mut self.ancestor_scratch,
            );
        } else {
            let base_sse = self.options.base_screen_space_error.max(max_sse);
            traversal::base::execute_traversal(
                &mut self.arena,
                self.root,
                base_sse,
                max_sse,
                &mut ctx,
                &mut self.base_scratch,
                &mut self.empty_scratch,
                &mut self.descendant_scratch,
            );
            traversal::select::traverse_and_select(
                &mut self.arena,
                self.root,
                &mut ctx,
                &mut self.select_scratch,
                &mut self.ancestor_scratch,
            );
        }

        self.base_scratch.trim();
        self.empty_scratch.trim();
        self.descendant_scratch.trim();
        self.select_scratch.trim();
        self.ancestor_scratch.trim();
        true
    }
}
