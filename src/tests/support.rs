//! Shared fixtures for the traversal test suite: a scripted [`TileGeometry`] plus small tree
//! builders. Every test tree is built directly with [`TileArena`]/[`Tile`] rather than through a
//! tileset-JSON loader (that parsing lives outside this crate's scope, per spec §1) and every
//! geometric quantity the engine consumes (`distance_to_camera`, `center_z_depth`,
//! `screen_space_error`) is set directly on the `Tile` before calling `select_tiles`, matching the
//! division of labor spec §6 assumes of a real host.

use std::cell::RefCell;
use std::collections::HashMap;

use cgmath::Point3;

use crate::geometry::{BoundingVolume, ContentVisibility, FrameState};
use crate::tile::{Refine, Tile};
use crate::TileGeometry;

pub(crate) struct Frame(pub u64);

impl FrameState for Frame {
    fn frame_number(&self) -> u64 {
        self.0
    }
}

pub(crate) fn frame(n: u64) -> Frame {
    Frame(n)
}

/// A distinct point bounding volume, keyed by `x` so [`ScriptedGeometry`] overrides can address
/// individual tiles (the engine's [`TileGeometry`] trait identifies tiles by reference, not by a
/// stored id, so tests recover identity from a field already on the tile).
pub(crate) fn point(x: f64) -> BoundingVolume {
    BoundingVolume::point(Point3::new(x, 0.0, 0.0))
}

fn key(tile: &Tile) -> i64 {
    (tile.bounding_volume.center().x * 1_000.0).round() as i64
}

/// A leaf tile (no children yet) with a nonzero geometric error so it isn't mistaken for the
/// zero-SSE leaf sentinel unless a test sets `screen_space_error` to exactly `0.0` on purpose.
pub(crate) fn leaf(refine: Refine, bv: BoundingVolume) -> Tile {
    Tile::new(refine, bv, 8.0)
}

/// Marks `tile` content-available (loaded), as most selection scenarios need.
pub(crate) fn loaded(mut tile: Tile) -> Tile {
    tile.content_available = true;
    tile.content_unloaded = false;
    tile
}

/// Scripted [`TileGeometry`]: every tile is visible and fully in-frustum by default; tests poke
/// holes via the override maps, keyed by [`key`] (i.e. by the tile's `point(x)` identity).
#[derive(Default)]
pub(crate) struct ScriptedGeometry {
    pub invisible: RefCell<HashMap<i64, bool>>,
    pub outside_content: RefCell<HashMap<i64, bool>>,
}

impl ScriptedGeometry {
    pub(crate) fn hide(&self, bv: &BoundingVolume) {
        self.invisible
            .borrow_mut()
            .insert((bv.center().x * 1_000.0).round() as i64, true);
    }

    pub(crate) fn hide_content(&self, bv: &BoundingVolume) {
        self.outside_content
            .borrow_mut()
            .insert((bv.center().x * 1_000.0).round() as i64, true);
    }
}

impl TileGeometry for ScriptedGeometry {
    fn update_visibility(&self, tile: &Tile, _frame: &dyn FrameState) -> (bool, bool) {
        let hidden = self.invisible.borrow().get(&key(tile)).copied().unwrap_or(false);
        (!hidden, true)
    }

    fn content_visibility(&self, tile: &Tile, _frame: &dyn FrameState) -> ContentVisibility {
        let hidden = self
            .outside_content
            .borrow()
            .get(&key(tile))
            .copied()
            .unwrap_or(false);
        if hidden {
            ContentVisibility::Outside
        } else {
            ContentVisibility::Inside
        }
    }

    fn screen_space_error(
        &self,
        tile: &Tile,
        _frame: &dyn FrameState,
        _use_parent_geometric_error: bool,
    ) -> f64 {
        tile.screen_space_error
    }

    fn distance_to_tile(&self, tile: &Tile, _frame: &dyn FrameState) -> f64 {
        tile.distance_to_camera
    }

    fn distance_to_tile_center(&self, tile: &Tile, _frame: &dyn FrameState) -> f64 {
        tile.center_z_depth
    }

    fn update_expiration(&self, _tile: &mut Tile, _frame: &dyn FrameState) {}
}

pub(crate) fn always_visible_geometry() -> ScriptedGeometry {
    ScriptedGeometry::default()
}
