//! §4.E empty-subtree probe: a visibility-ignoring descent through structural (empty/external
//! tileset) tiles, used to decide whether a REPLACE parent may claim to refine across them.

use crate::arena::{TileArena, TileId};
use crate::context::Ctx;
use crate::scratch::ScratchStack;
use crate::traversal::{can_traverse, load_tile, touch_tile, update_tile};

/// Returns whether every descendant reachable through empty content is either loaded or itself
/// still traversable (i.e. the subtree would leave no hole if the parent refined past it).
///
/// `stack` is the engine's dedicated empty-probe scratch stack (spec §3/§9: three traversal
/// stacks owned by the orchestrator, reused and trimmed frame to frame); this probe can recurse
/// into itself across sibling calls within one `update_and_push_children`, so it gets its own
/// stack rather than sharing the base/select traversal's.
pub(crate) fn execute_empty_traversal(
    arena: &mut TileArena,
    root: TileId,
    ctx: &mut Ctx,
    stack: &mut ScratchStack,
) -> bool {
    let mut all_descendants_loaded = true;
    stack.clear();
    stack.push(root);

    while let Some(id) = stack.pop() {
        let max_sse = ctx.options.maximum_screen_space_error;
        let traverse = arena.get(id).has_empty_content && can_traverse(arena, id, max_sse);
        if !traverse && !arena.get(id).content_available {
            all_descendants_loaded = false;
        }

        update_tile(arena, id, ctx);
        if !arena.get(id).is_visible() {
            load_tile(arena, id, ctx);
            touch_tile(arena, id, ctx);
        }

        if traverse {
            for child in arena.children_of(id) {
                stack.push(child);
            }
        }
    }

    all_descendants_loaded
}
