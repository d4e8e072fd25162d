use crate::arena::TileArena;
use crate::cache::NullCache;
use crate::config::TraversalOptions;
use crate::context::{Ctx, TraversalOutputs};
use crate::stats::TraversalStats;
use crate::tests::support::{frame, leaf, loaded, point, ScriptedGeometry};
use crate::tile::Refine;
use crate::visibility::update_visibility;

macro_rules! ctx {
    ($options:expr, $stats:expr, $out:expr, $cache:expr, $geometry:expr, $frame:expr, $epoch:expr) => {
        Ctx {
            geometry: &$geometry,
            frame: &$frame,
            cache: &$cache,
            options: &$options,
            stats: &mut $stats,
            out: &mut $out,
            epoch: $epoch,
            frame_number: $frame.0,
            min_priority: f64::MAX,
            max_priority: f64::MIN,
        }
    };
}

#[test]
fn add_child_already_within_budget_is_culled() {
    let mut arena = TileArena::new();
    let root = arena.insert(leaf(Refine::Replace, point(0.0)));
    let child = arena.insert(leaf(Refine::Add, point(1.0)));
    arena.attach_child(root, child).unwrap();
    arena.get_mut(child).screen_space_error = 4.0;

    let options = TraversalOptions {
        maximum_screen_space_error: 16.0,
        ..Default::default()
    };
    let mut stats = TraversalStats::default();
    let mut out = TraversalOutputs::default();
    let cache = NullCache;
    let geometry = ScriptedGeometry::default();
    let f = frame(1);
    let mut ctx = ctx!(options, stats, out, cache, geometry, f, 1);

    update_visibility(&mut arena, child, &mut ctx);
    assert!(!arena.get(child).is_visible());
}

#[test]
fn add_root_already_within_budget_stays_visible() {
    // The early-SSE cull only fires when a parent exists; a visible root must remain visible
    // regardless of its own SSE, since the orchestrator itself decides when the whole tree is
    // within budget.
    let mut arena = TileArena::new();
    let root = arena.insert(leaf(Refine::Add, point(0.0)));
    arena.get_mut(root).screen_space_error = 4.0;

    let options = TraversalOptions {
        maximum_screen_space_error: 16.0,
        ..Default::default()
    };
    let mut stats = TraversalStats::default();
    let mut out = TraversalOutputs::default();
    let cache = NullCache;
    let geometry = ScriptedGeometry::default();
    let f = frame(1);
    let mut ctx = ctx!(options, stats, out, cache, geometry, f, 1);

    update_visibility(&mut arena, root, &mut ctx);
    assert!(arena.get(root).is_visible());
}

#[test]
fn replace_tile_with_all_children_invisible_is_culled_with_children_union() {
    let mut arena = TileArena::new();
    let root = arena.insert(leaf(Refine::Replace, point(0.0)));
    let a = arena.insert(leaf(Refine::Replace, point(1.0)));
    let b = arena.insert(leaf(Refine::Replace, point(2.0)));
    arena.attach_child(root, a).unwrap();
    arena.attach_child(root, b).unwrap();

    let options = TraversalOptions::default();
    let mut stats = TraversalStats::default();
    let mut out = TraversalOutputs::default();
    let cache = NullCache;
    let geometry = ScriptedGeometry::default();
    geometry.hide(&arena.get(a).bounding_volume);
    geometry.hide(&arena.get(b).bounding_volume);
    let f = frame(1);
    let mut ctx = ctx!(options, stats, out, cache, geometry, f, 1);

    update_visibility(&mut arena, root, &mut ctx);
    assert!(!arena.get(root).is_visible());
    assert_eq!(ctx.stats.culled_with_children_union, 1);
}

#[test]
fn replace_tile_with_one_visible_child_is_not_culled() {
    let mut arena = TileArena::new();
    let root = arena.insert(leaf(Refine::Replace, point(0.0)));
    let a = arena.insert(leaf(Refine::Replace, point(1.0)));
    let b = arena.insert(leaf(Refine::Replace, point(2.0)));
    arena.attach_child(root, a).unwrap();
    arena.attach_child(root, b).unwrap();

    let options = TraversalOptions::default();
    let mut stats = TraversalStats::default();
    let mut out = TraversalOutputs::default();
    let cache = NullCache;
    let geometry = ScriptedGeometry::default();
    geometry.hide(&arena.get(a).bounding_volume);
    let f = frame(1);
    let mut ctx = ctx!(options, stats, out, cache, geometry, f, 1);

    update_visibility(&mut arena, root, &mut ctx);
    assert!(arena.get(root).is_visible());
}

#[test]
fn external_tileset_root_adopts_its_single_childs_visibility() {
    let mut arena = TileArena::new();
    let placeholder = arena.insert(loaded(leaf(Refine::Add, point(0.0)).with_empty_content(true)));
    let inner_root = arena.insert(leaf(Refine::Replace, point(1.0)));
    arena.attach_child(placeholder, inner_root).unwrap();

    let options = TraversalOptions::default();
    let mut stats = TraversalStats::default();
    let mut out = TraversalOutputs::default();
    let cache = NullCache;
    let geometry = ScriptedGeometry::default();
    geometry.hide(&arena.get(inner_root).bounding_volume);
    let f = frame(1);
    let mut ctx = ctx!(options, stats, out, cache, geometry, f, 1);

    update_visibility(&mut arena, placeholder, &mut ctx);
    assert!(!arena.get(placeholder).is_visible());
}

#[test]
fn visibility_is_memoized_within_one_epoch() {
    let mut arena = TileArena::new();
    let root = arena.insert(leaf(Refine::Replace, point(0.0)));

    let options = TraversalOptions::default();
    let mut stats = TraversalStats::default();
    let mut out = TraversalOutputs::default();
    let cache = NullCache;
    let geometry = ScriptedGeometry::default();
    let f = frame(1);
    let mut ctx = ctx!(options, stats, out, cache, geometry, f, 7);

    update_visibility(&mut arena, root, &mut ctx);
    assert_eq!(arena.get(root).updated_visibility_frame, Some(7));

    // Hide it after the first call, at the same epoch: a second call must be a no-op.
    geometry.hide(&arena.get(root).bounding_volume);
    update_visibility(&mut arena, root, &mut ctx);
    assert!(arena.get(root).is_visible());
}
