//! Span/event conventions for frame-level tracing (spec expansion, §2 ambient modules).
//!
//! Mirrors the teacher's habit of `log::warn!`-ing on out-of-band geometric conditions (an
//! uninvertible OBB basis in `content/volumes.rs`) rather than failing: this crate has exactly
//! one such diagnostic, the stencil-depth overflow warning in [`crate::traversal::select`].

use std::sync::Once;

/// The documented stencil budget for `selection_depth` (3 bits, spec §4.G).
pub const STENCIL_DEPTH_BUDGET: u32 = 7;

static STENCIL_OVERFLOW_WARNED: Once = Once::new();

/// Logs once per process that a selected tile's `selection_depth` exceeded the renderer's
/// documented stencil budget. Purely a log side effect — does not alter `selection_depth` or any
/// other traversal output (see REDESIGN FLAGS in the design notes: this is new, but logging-only).
pub(crate) fn warn_once_on_stencil_overflow(selection_depth: u32) {
    if selection_depth <= STENCIL_DEPTH_BUDGET {
        return;
    }
    STENCIL_OVERFLOW_WARNED.call_once(|| {
        log::warn!(
            "selection_depth {selection_depth} exceeded the documented stencil budget \
             ({STENCIL_DEPTH_BUDGET}); host renderer may see stencil wraparound"
        );
    });
}

/// A per-call tracing span, opened by [`crate::tileset::Tileset::select_tiles`] for the duration
/// of one traversal, the way the teacher opens a span per `World::update` tick.
pub(crate) fn frame_span(frame_number: u64) -> tracing::Span {
    tracing::debug_span!("select_tiles", frame_number)
}
