//! The traversal stages (spec §4.D/E/F/G/H). Split by concern the way the teacher splits
//! `content/tilesets.rs`'s single long file into cooperating free functions that all close over
//! a handful of shared collaborators — here expressed as [`crate::context::Ctx`] instead of a
//! long parameter list.

pub(crate) mod base;
pub(crate) mod empty;
pub(crate) mod select;

use crate::arena::{TileArena, TileId};
use crate::context::Ctx;
use crate::priority;
use crate::visibility;

/// §4.A per-node refresh, shared by the base/skip traversal and the empty-subtree probe.
///
/// Refreshes the three per-frame geometric quantities (spec §3 "Geometric") from the host
/// *before* visibility, not after: §4.B's early-SSE and children-union cull policies read
/// `screen_space_error` as part of deciding this frame's visibility, so it must already be
/// current by the time `visibility::update_visibility` runs, not left holding last frame's
/// value (or the zero default, on a tile's first visit).
pub(crate) fn update_tile(arena: &mut TileArena, id: TileId, ctx: &mut Ctx) {
    arena.get_mut(id).reset_scratch_for_visit();

    let (distance_to_camera, center_z_depth, screen_space_error) = {
        let tile = arena.get(id);
        (
            ctx.geometry.distance_to_tile(tile, ctx.frame),
            ctx.geometry.distance_to_tile_center(tile, ctx.frame),
            ctx.geometry.screen_space_error(tile, ctx.frame, false),
        )
    };
    {
        let tile = arena.get_mut(id);
        tile.distance_to_camera = distance_to_camera;
        tile.center_z_depth = center_z_depth;
        tile.screen_space_error = screen_space_error;
    }

    visibility::update_visibility(arena, id, ctx);

    let priority_distance = priority::priority_distance(arena.get(id));
    {
        let tile = arena.get_mut(id);
        tile.priority_distance = priority_distance;
        tile.priority_distance_holder = Some(id);
    }
    ctx.geometry.update_expiration(arena.get_mut(id), ctx.frame);
}

/// §4.A "`update_tile_ancestor_content_links`".
pub(crate) fn update_tile_ancestor_content_links(arena: &mut TileArena, id: TileId, ctx: &Ctx) {
    let parent = arena.get(id).parent;
    let (ancestor_with_content, ancestor_with_content_available) = match parent {
        None => (None, None),
        Some(p) => {
            let parent_tile = arena.get(p);
            let has_content = !parent_tile.content_unloaded
                || parent_tile.requested_frame == Some(ctx.frame_number);
            let awc = if has_content {
                Some(p)
            } else {
                parent_tile.ancestor_with_content
            };
            let awca = if parent_tile.content_available {
                Some(p)
            } else {
                parent_tile.ancestor_with_content_available
            };
            (awc, awca)
        }
    };
    let tile = arena.get_mut(id);
    tile.ancestor_with_content = ancestor_with_content;
    tile.ancestor_with_content_available = ancestor_with_content_available;
}

/// Has children; an unexpired external-tileset root; and an SSE still coarser than `max_sse`.
///
/// `max_sse` is threaded through from [`base::execute_traversal`]'s caller rather than read
/// straight from options: every dispatch mode in the orchestrator (§4.I) happens to pass
/// `tileset.maximum_screen_space_error` here, but the traversal functions themselves stay
/// agnostic to that and just compare against whatever budget they were handed.
pub(crate) fn can_traverse(arena: &TileArena, id: TileId, max_sse: f64) -> bool {
    let tile = arena.get(id);
    if tile.children.is_empty() {
        return false;
    }
    if tile.has_tileset_content && tile.content_expired {
        return false;
    }
    tile.screen_space_error > max_sse
}

pub(crate) fn visit_tile(arena: &mut TileArena, id: TileId, ctx: &mut Ctx) {
    ctx.stats.visited += 1;
    arena.get_mut(id).visited_frame = Some(ctx.frame_number);
}

/// Once-per-frame idempotent LRU touch (spec §4.D "`touchTile`").
pub(crate) fn touch_tile(arena: &mut TileArena, id: TileId, ctx: &Ctx) {
    let already_touched = arena.get(id).touched_frame == Some(ctx.frame_number);
    if already_touched {
        return;
    }
    arena.get_mut(id).touched_frame = Some(ctx.frame_number);
    ctx.cache.touch(id);
}

/// Requests content if needed, and updates the min/max priority bookkeeping (spec §9 open
/// question: the max branch deliberately reads through `priority_distance_holder` while the min
/// branch reads the tile's own raw `priority_distance` — preserved as found, not reconciled).
pub(crate) fn load_tile(arena: &mut TileArena, id: TileId, ctx: &mut Ctx) {
    let (should_request, already_requested) = {
        let tile = arena.get(id);
        (
            tile.has_unloaded_content() || tile.content_expired,
            tile.requested_frame == Some(ctx.frame_number),
        )
    };
    if !should_request || already_requested {
        return;
    }
    arena.get_mut(id).requested_frame = Some(ctx.frame_number);

    let min_dist = arena.get(id).priority_distance;
    let max_dist = match arena.get(id).priority_distance_holder {
        Some(holder) => arena.get(holder).priority_distance,
        None => min_dist,
    };
    if min_dist < ctx.min_priority {
        ctx.min_priority = min_dist;
    }
    if max_dist > ctx.max_priority {
        ctx.max_priority = max_dist;
    }

    ctx.out.requested_tiles.push(id);
}
