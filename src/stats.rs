//! Per-frame counters (spec §6 "Statistics side effects").

use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStats {
    pub visited: u64,
    pub culled_with_children_union: u64,
}

impl TraversalStats {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TraversalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "visited={} culled_with_children_union={}",
            self.visited, self.culled_with_children_union
        )
    }
}
