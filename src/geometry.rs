//! The external-collaborator seam: the engine stores bounding volumes but never intersects them
//! against a frustum, and never computes screen-space error itself — per spec §1 that is all
//! "out of scope," owned by the host renderer. This module defines the data carrier
//! ([`BoundingVolume`]) and the trait ([`TileGeometry`]) the host implements.

use cgmath::{InnerSpace, Point3, Vector3};

/// A Cesium-style 12-number oriented bounding box: a center plus three half-axis vectors.
///
/// Only the two accessors this crate's own priority computation needs are kept here
/// (`center`, `to_bounding_sphere`); frustum intersection, AABB conversion, and closest-point
/// queries are culling math owned by the host and were not ported from the teacher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    center: Point3<f64>,
    half_axes: [Vector3<f64>; 3],
}

impl BoundingVolume {
    pub fn new(center: Point3<f64>, half_axes: [Vector3<f64>; 3]) -> Self {
        Self { center, half_axes }
    }

    /// A bounding volume with zero extent, useful for tests that don't exercise geometry.
    pub fn point(center: Point3<f64>) -> Self {
        Self::new(center, [Vector3::new(0.0, 0.0, 0.0); 3])
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Returns `(center, radius)` for a covering sphere of the OBB.
    #[inline]
    pub fn to_bounding_sphere(&self) -> (Point3<f64>, f64) {
        let r2 = self.half_axes[0].magnitude2()
            + self.half_axes[1].magnitude2()
            + self.half_axes[2].magnitude2();
        (self.center, r2.sqrt().max(0.0))
    }
}

/// Per-frame camera/viewport state the engine threads opaquely through to the host's geometry
/// queries. The engine only ever reads `frame_number` itself.
pub trait FrameState {
    fn frame_number(&self) -> u64;
}

/// Result of testing a tile's *content* bounds against the frustum at selection time (spec
/// §4 "selectTile"), distinct from the coarser per-tile `visible` flag used during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentVisibility {
    Inside,
    Outside,
    Intersecting,
}

/// The host-implemented geometric predicates consumed by this engine (spec §6 "Consumed from
/// tile objects"). Every method is a pure query against the current frame; none of them may
/// mutate traversal state — the engine is the only thing allowed to touch `Tile` scratch fields.
pub trait TileGeometry {
    /// Recomputes `visible`/`in_request_volume` for this tile against the current frustum and
    /// request-volume constraint. The engine calls this at most once per tile per frame and
    /// layers its own optimizations on top (see [`crate::visibility`]).
    fn update_visibility(&self, tile: &crate::tile::Tile, frame: &dyn FrameState) -> (bool, bool);

    /// Final frustum check against the tile's *content* bounds, used only at selection time.
    fn content_visibility(
        &self,
        tile: &crate::tile::Tile,
        frame: &dyn FrameState,
    ) -> ContentVisibility;

    /// Screen-space error for this tile's geometric error against the current viewport/camera.
    /// `use_parent_geometric_error` requests the SSE the tile *would* have if measured with its
    /// parent's geometric error (used by some visibility optimizations); implementors that don't
    /// distinguish the two may ignore the flag.
    fn screen_space_error(
        &self,
        tile: &crate::tile::Tile,
        frame: &dyn FrameState,
        use_parent_geometric_error: bool,
    ) -> f64;

    /// Distance from the camera to the closest point of the tile's bounding volume.
    fn distance_to_tile(&self, tile: &crate::tile::Tile, frame: &dyn FrameState) -> f64;

    /// Signed camera-space depth of the bounding volume's center.
    fn distance_to_tile_center(&self, tile: &crate::tile::Tile, frame: &dyn FrameState) -> f64;

    /// Refreshes `content_expired` (and any host-side expiration bookkeeping) for this tile.
    fn update_expiration(&self, tile: &mut crate::tile::Tile, frame: &dyn FrameState);
}
