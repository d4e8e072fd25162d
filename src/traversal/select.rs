//! Selection entry points (spec "Selection entry"), the descendant fallback (§4.H), and the
//! preorder selection pass (§4.G) used by the skip-LOD modes.

use crate::arena::{TileArena, TileId};
use crate::config::DESCENDANT_SELECTION_DEPTH;
use crate::context::Ctx;
use crate::geometry::ContentVisibility;
use crate::logging::warn_once_on_stencil_overflow;
use crate::scratch::ScratchStack;
use crate::tile::ContentClass;
use crate::traversal::{can_traverse, touch_tile, update_tile};

/// Spec "Selection entry — `select_desired_tile`".
pub(crate) fn select_desired_tile(
    arena: &mut TileArena,
    id: TileId,
    ctx: &mut Ctx,
    descendant_stack: &mut ScratchStack<(TileId, u32)>,
) {
    if !ctx.options.skip_level_of_detail {
        if arena.get(id).content_available {
            select_tile(arena, id, ctx);
        }
        return;
    }

    let loaded = if arena.get(id).content_available {
        Some(id)
    } else {
        arena.get(id).ancestor_with_content_available
    };

    match loaded {
        Some(loaded_id) => arena.get_mut(loaded_id).should_select = true,
        None => select_descendants(arena, id, ctx, descendant_stack),
    }
}

/// Spec "`select_tile`": the final frustum check against content bounds, plus re-style
/// bookkeeping, plus the actual emission into `selected_tiles`.
pub(crate) fn select_tile(arena: &mut TileArena, id: TileId, ctx: &mut Ctx) {
    let visibility = {
        let tile = arena.get(id);
        ctx.geometry.content_visibility(tile, ctx.frame)
    };
    if visibility == ContentVisibility::Outside {
        return;
    }

    let needs_restyle = {
        let tile = arena.get(id);
        tile.feature_properties_dirty
            || match tile.selected_frame {
                Some(f) => ctx.frame_number > f + 1,
                None => true,
            }
    };

    let tile = arena.get_mut(id);
    if tile.feature_properties_dirty {
        tile.feature_properties_dirty = false;
        tile.last_style_time = 0.0;
    }
    if needs_restyle {
        ctx.out.selected_tiles_to_style.push(id);
    }
    tile.selected_frame = Some(ctx.frame_number);
    ctx.out.selected_tiles.push(id);
}

/// Spec §4.H "`select_descendants`": bounded descent that fills a hole when neither the desired
/// tile nor any ancestor is loaded, by selecting the nearest loaded descendants instead.
pub(crate) fn select_descendants(
    arena: &mut TileArena,
    root: TileId,
    ctx: &mut Ctx,
    stack: &mut ScratchStack<(TileId, u32)>,
) {
    stack.clear();
    for child in arena.children_of(root) {
        stack.push((child, 1));
    }

    while let Some((id, depth)) = stack.pop() {
        crate::visibility::update_visibility(arena, id, ctx);
        if !arena.get(id).is_visible() {
            continue;
        }

        if arena.get(id).content_available {
            update_tile(arena, id, ctx);
            touch_tile(arena, id, ctx);
            select_tile(arena, id, ctx);
        } else if depth < DESCENDANT_SELECTION_DEPTH {
            for child in arena.children_of(id) {
                stack.push((child, depth + 1));
            }
        }
    }
}

/// Spec §4.G "`traverse_and_select`" — skip-LOD modes only. Preorder DFS with a parallel
/// ancestor stack so deeper selected tiles are emitted before the selected ancestor they'll be
/// stencil-composited over.
pub(crate) fn traverse_and_select(
    arena: &mut TileArena,
    root: TileId,
    ctx: &mut Ctx,
    stack: &mut ScratchStack,
    ancestor_stack: &mut ScratchStack<TileId>,
) {
    stack.clear();
    stack.push(root);
    ancestor_stack.clear();
    let mut last_ancestor: Option<TileId> = None;

    while !stack.is_empty() || !ancestor_stack.is_empty() {
        if let Some(&top) = ancestor_stack.last() {
            if arena.get(top).stack_length == stack.len() {
                ancestor_stack.pop();
                if Some(top) != last_ancestor {
                    arena.get_mut(top).final_resolution = false;
                }
                select_tile(arena, top, ctx);
                continue;
            }
        }

        let id = match stack.pop() {
            Some(id) => id,
            None => continue,
        };

        let should_select = arena.get(id).should_select;
        let max_sse = ctx.options.maximum_screen_space_error;
        let traverse = can_traverse(arena, id, max_sse);

        if should_select {
            match arena.get(id).content_class() {
                ContentClass::Add => select_tile(arena, id, ctx),
                ContentClass::Replace => {
                    let selection_depth = ancestor_stack.len() as u32;
                    arena.get_mut(id).selection_depth = selection_depth;
                    if selection_depth > 0 {
                        ctx.out.has_mixed_content = true;
                    }
                    warn_once_on_stencil_overflow(selection_depth);
                    last_ancestor = Some(id);
                    if !traverse {
                        select_tile(arena, id, ctx);
                    } else {
                        arena.get_mut(id).stack_length = stack.len();
                        ancestor_stack.push(id);
                    }
                }
                ContentClass::Empty => {}
            }
        }

        if traverse {
            for child in arena.children_of(id) {
                if arena.get(child).is_visible() {
                    stack.push(child);
                }
            }
        }
    }
}
