//! §4.B visibility refresh: the host answers the raw frustum/request-volume question once per
//! tile per frame; this module layers the three traversal-level optimizations on top.

use crate::arena::{TileArena, TileId};
use crate::context::Ctx;
use crate::tile::Refine;

/// Memoized entry point (spec §4.B "`update_visibility`"). Safe to call redundantly from any
/// traversal stage — only the first call in a given `select_tiles` invocation does any work.
pub(crate) fn update_visibility(arena: &mut TileArena, id: TileId, ctx: &mut Ctx) {
    if arena.get(id).updated_visibility_frame == Some(ctx.epoch) {
        return;
    }
    update_tile_visibility(arena, id, ctx);
    arena.get_mut(id).updated_visibility_frame = Some(ctx.epoch);
}

/// The layered policy (spec §4.B "`update_tile_visibility`"). Each layer may only narrow
/// visibility (turn a visible tile invisible), never widen it.
fn update_tile_visibility(arena: &mut TileArena, id: TileId, ctx: &mut Ctx) {
    let (visible, in_request_volume) = {
        let tile = arena.get(id);
        ctx.geometry.update_visibility(tile, ctx.frame)
    };
    {
        let tile = arena.get_mut(id);
        tile.visible = visible;
        tile.in_request_volume = in_request_volume;
    }
    if !arena.get(id).is_visible() {
        return;
    }

    // Child-bounds optimization: an external-tileset placeholder has no geometry of its own,
    // so it's only as visible as the root of the tileset it points to.
    let (has_tileset_content, only_child) = {
        let tile = arena.get(id);
        (
            tile.has_tileset_content,
            tile.children.first().copied(),
        )
    };
    if has_tileset_content {
        if let Some(child) = only_child {
            update_visibility(arena, child, ctx);
            let (v, r) = {
                let child = arena.get(child);
                (child.visible, child.in_request_volume)
            };
            let tile = arena.get_mut(id);
            tile.visible = v;
            tile.in_request_volume = r;
        }
        if !arena.get(id).is_visible() {
            return;
        }
    }

    // Early SSE check: an ADD child whose volume already meets budget doesn't need to draw
    // itself, only to let its own children refine further if they want to.
    let (has_parent, refine, sse) = {
        let tile = arena.get(id);
        (tile.parent.is_some(), tile.refine, tile.screen_space_error)
    };
    if has_parent && !has_tileset_content && refine == Refine::Add {
        if sse <= ctx.options.maximum_screen_space_error {
            arena.get_mut(id).visible = false;
            return;
        }
    }

    // Children-union cull: a REPLACE tile whose every child is invisible contributes nothing
    // extra over rendering none of them, so cull the parent too (spec §4.B `USE_OPTIMIZATION`).
    let (is_replace, has_children) = {
        let tile = arena.get(id);
        (tile.refine == Refine::Replace, !tile.children.is_empty())
    };
    if is_replace && has_children && !has_tileset_content && ctx.options.cull_with_children_bounds {
        let children = arena.children_of(id);
        let mut any_visible = false;
        for child in children {
            update_visibility(arena, child, ctx);
            if arena.get(child).is_visible() {
                any_visible = true;
                break;
            }
        }
        if !any_visible {
            arena.get_mut(id).visible = false;
            ctx.stats.culled_with_children_union += 1;
        }
    }
}
