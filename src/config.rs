//! Tunables for the traversal engine (spec §6 "Configuration enumeration").

use serde::{Deserialize, Serialize};

/// Bound on how far [`crate::traversal::select::select_descendants`] (§4.H) is allowed to
/// descend below the tile whose desired LOD hasn't loaded yet.
pub const DESCENDANT_SELECTION_DEPTH: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    /// Refinement stop criterion for `can_traverse`.
    pub maximum_screen_space_error: f64,
    /// Budget separating base-traversal tiles from skip tiles.
    pub base_screen_space_error: f64,
    /// Enables skip-LOD traversal (modes F/G).
    pub skip_level_of_detail: bool,
    /// Skip-only; disables base traversal entirely.
    pub immediately_load_desired_level_of_detail: bool,
    /// Skip threshold ratio: a tile must be at least this many times finer than its loaded
    /// ancestor to be eligible to skip intermediate levels.
    pub skip_screen_space_error_factor: f64,
    /// Minimum depth gap below a loaded ancestor before skipping is allowed.
    pub skip_levels: u32,
    /// Force-load invisible siblings regardless of refine mode.
    pub load_siblings: bool,
    /// Short-circuits `select_tiles` entirely, leaving the previous frame's selection in place.
    pub debug_freeze_frame: bool,
    /// Enables the children-union visibility cull (spec §4.B `USE_OPTIMIZATION`): a REPLACE
    /// tile with no visible child is culled even if its own bounds are visible.
    pub cull_with_children_bounds: bool,
}

impl TraversalOptions {
    /// Parses tunables from a JSON document, the way a host loads `abetterworld.json` at
    /// startup; missing fields fall back to [`TraversalOptions::default`] via `#[serde(default)]`.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for TraversalOptions {
    /// Cesium-3D-Tiles-compatible defaults; the distilled spec is silent on exact constants, so
    /// this expansion follows the system it was distilled from.
    fn default() -> Self {
        Self {
            maximum_screen_space_error: 16.0,
            base_screen_space_error: 16.0,
            skip_level_of_detail: false,
            immediately_load_desired_level_of_detail: false,
            skip_screen_space_error_factor: 2.0,
            skip_levels: 1,
            load_siblings: false,
            debug_freeze_frame: false,
            cull_with_children_bounds: true,
        }
    }
}
