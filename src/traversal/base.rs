//! §4.D base traversal / §4.F skip traversal — one iterative depth-first walk that serves both,
//! parameterized by the `base_sse`/`max_sse` budgets the orchestrator (§4.I) picks per mode.

use crate::arena::{TileArena, TileId};
use crate::context::Ctx;
use crate::priority;
use crate::scratch::ScratchStack;
use crate::tile::{ContentClass, Refine};
use crate::traversal::{
    can_traverse, load_tile, touch_tile, update_tile, update_tile_ancestor_content_links,
    visit_tile,
};
use crate::traversal::empty::execute_empty_traversal;
use crate::traversal::select::select_desired_tile;

/// Runs one full base/skip traversal rooted at `root`, reusing `stack` across frames.
pub(crate) fn execute_traversal(
    arena: &mut TileArena,
    root: TileId,
    base_sse: f64,
    max_sse: f64,
    ctx: &mut Ctx,
    stack: &mut ScratchStack,
    empty_stack: &mut ScratchStack,
    descendant_stack: &mut ScratchStack<(TileId, u32)>,
) {
    stack.clear();
    stack.push(root);

    while let Some(id) = stack.pop() {
        update_tile_ancestor_content_links(arena, id, ctx);
        let base_traversal = in_base_traversal(arena, id, ctx, base_sse);
        let parent_refines = match arena.get(id).parent {
            None => true,
            Some(p) => arena.get(p).refines,
        };

        let refines = if can_traverse(arena, id, max_sse) {
            let children_refine = update_and_push_children(arena, id, ctx, stack, empty_stack);
            children_refine && parent_refines
        } else {
            false
        };
        let stopped_refining = !refines && parent_refines;

        match arena.get(id).content_class() {
            ContentClass::Empty => {
                ctx.out.empty_tiles.push(id);
                load_tile(arena, id, ctx);
                if stopped_refining {
                    select_desired_tile(arena, id, ctx, descendant_stack);
                }
            }
            ContentClass::Add => {
                select_desired_tile(arena, id, ctx, descendant_stack);
                load_tile(arena, id, ctx);
            }
            ContentClass::Replace => {
                if base_traversal {
                    load_tile(arena, id, ctx);
                    if stopped_refining {
                        select_desired_tile(arena, id, ctx, descendant_stack);
                    }
                } else if stopped_refining {
                    select_desired_tile(arena, id, ctx, descendant_stack);
                    load_tile(arena, id, ctx);
                } else if reached_skipping_threshold(arena, id, ctx) {
                    load_tile(arena, id, ctx);
                }
            }
        }

        visit_tile(arena, id, ctx);
        touch_tile(arena, id, ctx);
        arena.get_mut(id).refines = refines;
    }
}

/// Spec §4.D "`in_base_traversal`".
pub(crate) fn in_base_traversal(arena: &TileArena, id: TileId, ctx: &Ctx, base_sse: f64) -> bool {
    if !ctx.options.skip_level_of_detail {
        return true;
    }
    if ctx.options.immediately_load_desired_level_of_detail {
        return false;
    }
    let tile = arena.get(id);
    if tile.ancestor_with_content.is_none() {
        return true;
    }
    // Exact zero is the sentinel for "leaf SSE not yet computed," not a value to epsilon-compare
    // away; the system this traversal is modeled on relies on it being exact.
    if tile.screen_space_error == 0.0 {
        return tile
            .parent
            .map(|p| arena.get(p).screen_space_error > base_sse)
            .unwrap_or(false);
    }
    tile.screen_space_error > base_sse
}

/// Spec §4.D "`reached_skipping_threshold`" — skip-LOD, non-immediate mode only.
pub(crate) fn reached_skipping_threshold(arena: &TileArena, id: TileId, ctx: &Ctx) -> bool {
    if !ctx.options.skip_level_of_detail || ctx.options.immediately_load_desired_level_of_detail {
        return false;
    }
    let tile = arena.get(id);
    match tile.ancestor_with_content {
        None => false,
        Some(ancestor_id) => {
            let ancestor = arena.get(ancestor_id);
            tile.screen_space_error
                < ancestor.screen_space_error / ctx.options.skip_screen_space_error_factor
                && tile.depth > ancestor.depth + ctx.options.skip_levels
        }
    }
}

/// Spec §4.D "`update_and_push_children`". Returns whether `id`'s children collectively let it
/// refine this frame.
fn update_and_push_children(
    arena: &mut TileArena,
    id: TileId,
    ctx: &mut Ctx,
    stack: &mut ScratchStack,
    empty_stack: &mut ScratchStack,
) -> bool {
    let children = arena.children_of(id);
    for &child in &children {
        update_tile(arena, child, ctx);
    }

    // Farther children are pushed first so nearer ones pop (and are visited/drawn) first.
    let mut sorted = children.clone();
    sorted.sort_by(|&a, &b| {
        let ta = arena.get(a);
        let tb = arena.get(b);
        tb.distance_to_camera
            .partial_cmp(&ta.distance_to_camera)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                tb.center_z_depth
                    .partial_cmp(&ta.center_z_depth)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    let parent = arena.get(id);
    let check_refines =
        !ctx.options.skip_level_of_detail && parent.refine == Refine::Replace && !parent.has_empty_content;

    let mut any_children_visible = false;
    let mut refines = true;

    for &child in &sorted {
        let (visible, in_request_volume, has_empty_content, content_available) = {
            let t = arena.get(child);
            (
                t.is_visible(),
                t.in_request_volume,
                t.has_empty_content,
                t.content_available,
            )
        };

        if visible {
            any_children_visible = true;
            stack.push(child);
        } else if check_refines || ctx.options.load_siblings {
            load_tile(arena, child, ctx);
            touch_tile(arena, child, ctx);
        }

        if check_refines {
            let child_refines = in_request_volume
                && if has_empty_content {
                    execute_empty_traversal(arena, child, ctx, empty_stack)
                } else {
                    content_available
                };
            if !child_refines {
                refines = false;
            }
        }
    }

    if !any_children_visible {
        refines = false;
    }

    priority::propagate_priority(arena, id, &children);

    refines
}
