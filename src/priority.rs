//! §4.C priority computation and sibling/ancestor propagation.

use crate::arena::{TileArena, TileId};
use crate::tile::Tile;

/// `priority(tile) = clamp(center_z_depth - bounding_radius, 0, center_z_depth)`.
///
/// The closest point of the bounding sphere along the camera's forward axis, clamped to `>= 0`
/// so tiles straddling or behind the camera (negative `center_z_depth`) get priority 0 — load
/// first, since "behind the camera" is not a signal that a tile is unimportant, only that the
/// simple distance heuristic breaks down there.
pub fn priority_distance(tile: &Tile) -> f64 {
    let cz = tile.center_z_depth;
    let raw = cz - tile.bounding_radius;
    raw.max(0.0).min(cz.max(0.0))
}

/// Propagates the minimum-priority child's distance up to the subtree's `priority_distance_holder`
/// chain (spec §4.C "Sibling propagation"), called once per `update_and_push_children` with the
/// full sibling list (each child's `priority_distance` must already be set).
pub(crate) fn propagate_priority(arena: &mut TileArena, parent: TileId, children: &[TileId]) {
    if children.is_empty() {
        return;
    }

    let mut min_child = children[0];
    let mut min_dist = arena.get(min_child).priority_distance;
    for &c in &children[1..] {
        let d = arena.get(c).priority_distance;
        if d < min_dist {
            min_dist = d;
            min_child = c;
        }
    }

    let parent_tile = arena.get(parent);
    // Reuse the chain if the parent was itself the minimum child of its own siblings (or is
    // root, which has no siblings to compare against) so the best priority keeps climbing
    // toward the root; otherwise the parent becomes a fresh holder for this family.
    let holder = if parent_tile.was_min_child || parent_tile.parent.is_none() {
        parent_tile.priority_distance_holder.unwrap_or(parent)
    } else {
        parent
    };

    arena.get_mut(holder).priority_distance = min_dist;
    arena.get_mut(min_child).was_min_child = true;
    for &c in children {
        arena.get_mut(c).priority_distance_holder = Some(holder);
    }
}
