//! The per-tile data model (spec §3: "Tile").

use crate::arena::TileId;
use crate::geometry::BoundingVolume;

/// How a tile's children relate to it once both are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refine {
    /// Children are drawn *in addition to* the parent.
    Add,
    /// Children *replace* the parent; the parent may only be dropped once every child (or its
    /// empty subtree) is ready.
    Replace,
}

/// The content-kind dispatch used by the base/skip traversal (spec §4.D step 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentClass {
    /// Structural-only: either genuinely empty or an external-tileset placeholder.
    Empty,
    Add,
    Replace,
}

/// A node in the bounded-volume hierarchy.
///
/// Structural fields are set once at tree-build time. Geometric fields are refreshed by the
/// host-supplied [`crate::geometry::TileGeometry`] once per frame. Scratch fields are reset at
/// the start of every visit and exist purely to carry state between traversal stages within a
/// single [`crate::tileset::Tileset::select_tiles`] call (plus the handful of "touched this
/// frame" stamps that are meaningful across frames).
#[derive(Debug, Clone)]
pub struct Tile {
    // --- structural -----------------------------------------------------------------------
    pub parent: Option<TileId>,
    pub children: Vec<TileId>,
    pub depth: u32,
    pub refine: Refine,
    pub has_empty_content: bool,
    /// True for a tile that is itself the placeholder root of an externally-loaded tileset.
    pub has_tileset_content: bool,
    pub bounding_volume: BoundingVolume,
    pub geometric_error: f64,
    /// Cached once from `bounding_volume` at construction; the priority computation (§4.C) only
    /// ever needs the scalar, not the full bounding-volume math the engine otherwise delegates.
    pub bounding_radius: f64,

    // --- availability -----------------------------------------------------------------------
    pub content_unloaded: bool,
    pub content_available: bool,
    pub content_expired: bool,

    // --- geometric, refreshed per frame by the host --------------------------------------
    pub distance_to_camera: f64,
    pub center_z_depth: f64,
    pub screen_space_error: f64,

    // --- per-frame scratch (reset on each visit) -----------------------------------------
    pub visible: bool,
    pub in_request_volume: bool,
    pub updated_visibility_frame: Option<u64>,

    pub priority_distance: f64,
    pub priority_distance_holder: Option<TileId>,

    pub was_min_child: bool,
    pub refines: bool,
    pub final_resolution: bool,
    pub should_select: bool,

    pub selection_depth: u32,
    pub stack_length: usize,

    pub ancestor_with_content: Option<TileId>,
    pub ancestor_with_content_available: Option<TileId>,

    pub visited_frame: Option<u64>,
    pub touched_frame: Option<u64>,
    pub selected_frame: Option<u64>,
    pub requested_frame: Option<u64>,

    pub feature_properties_dirty: bool,
    pub last_style_time: f64,
}

impl Tile {
    /// Builds a leaf/unattached tile. `parent`/`children`/`depth` are filled in by
    /// [`crate::arena::TileArena::attach_child`].
    pub fn new(refine: Refine, bounding_volume: BoundingVolume, geometric_error: f64) -> Self {
        let bounding_radius = bounding_volume.to_bounding_sphere().1;
        Self {
            parent: None,
            children: Vec::new(),
            depth: 0,
            refine,
            has_empty_content: false,
            has_tileset_content: false,
            bounding_volume,
            geometric_error,
            bounding_radius,

            content_unloaded: true,
            content_available: false,
            content_expired: false,

            distance_to_camera: 0.0,
            center_z_depth: 0.0,
            screen_space_error: 0.0,

            visible: false,
            in_request_volume: false,
            updated_visibility_frame: None,

            priority_distance: 0.0,
            priority_distance_holder: None,

            was_min_child: false,
            refines: false,
            final_resolution: true,
            should_select: false,

            selection_depth: 0,
            stack_length: 0,

            ancestor_with_content: None,
            ancestor_with_content_available: None,

            visited_frame: None,
            touched_frame: None,
            selected_frame: None,
            requested_frame: None,

            feature_properties_dirty: false,
            last_style_time: 0.0,
        }
    }

    /// Marks this tile as structural-only (empty content, or an external-tileset placeholder).
    pub fn with_empty_content(mut self, has_tileset_content: bool) -> Self {
        self.has_empty_content = true;
        self.has_tileset_content = has_tileset_content;
        self
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible && self.in_request_volume
    }

    #[inline]
    pub fn has_unloaded_content(&self) -> bool {
        self.content_unloaded && !self.has_empty_content
    }

    pub(crate) fn content_class(&self) -> ContentClass {
        if self.has_empty_content || self.has_tileset_content {
            ContentClass::Empty
        } else {
            match self.refine {
                Refine::Add => ContentClass::Add,
                Refine::Replace => ContentClass::Replace,
            }
        }
    }

    /// Resets the per-frame scratch block (spec §4.A "Reset the per-frame scratch block").
    pub(crate) fn reset_scratch_for_visit(&mut self) {
        self.was_min_child = false;
        self.should_select = false;
        self.final_resolution = true;
    }
}
