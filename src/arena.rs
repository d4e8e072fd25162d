//! Stable-index storage for a tile tree.
//!
//! Tiles outlive frames and are never removed mid-traversal, so a flat `Vec<Tile>` addressed by
//! a small `Copy` handle is enough; all non-owning back-references (`parent`,
//! `ancestor_with_content`, `priority_distance_holder`, ...) are just another `TileId`.

use crate::error::TraversalError;
use crate::tile::Tile;

/// A stable handle into a [`TileArena`]. Indices are never reused once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u32);

impl TileId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every [`Tile`] in a tileset and hands out stable [`TileId`]s.
#[derive(Debug, Default)]
pub struct TileArena {
    tiles: Vec<Tile>,
}

impl TileArena {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Inserts a tile and returns its handle. The caller is responsible for wiring
    /// `parent`/`children` afterward with [`TileArena::attach_child`].
    pub fn insert(&mut self, tile: Tile) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(tile);
        id
    }

    /// Records `child` as a child of `parent` and sets `child.parent`. Returns an error if
    /// `child` already has a different parent (would create a shared-ownership cycle risk) or
    /// if either id is out of range.
    pub fn attach_child(&mut self, parent: TileId, child: TileId) -> Result<(), TraversalError> {
        if parent.index() >= self.tiles.len() || child.index() >= self.tiles.len() {
            return Err(TraversalError::DanglingReference { id: child.0 });
        }
        if let Some(existing) = self.tiles[child.index()].parent {
            if existing != parent {
                return Err(TraversalError::ReparentedChild { id: child.0 });
            }
        }
        self.tiles[child.index()].parent = Some(parent);
        self.tiles[child.index()].depth = self.tiles[parent.index()].depth + 1;
        if !self.tiles[parent.index()].children.contains(&child) {
            self.tiles[parent.index()].children.push(child);
        }
        Ok(())
    }

    /// Structural validation: every child's recorded parent must point back to its actual
    /// parent, and the tree must be acyclic. Run once after building a tree from untrusted data.
    pub fn validate(&self, root: TileId) -> Result<(), TraversalError> {
        if root.index() >= self.tiles.len() {
            return Err(TraversalError::DanglingReference { id: root.0 });
        }
        let mut visited = vec![false; self.tiles.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if visited[id.index()] {
                return Err(TraversalError::Cycle { id: id.0 });
            }
            visited[id.index()] = true;
            for &child in &self.tiles[id.index()].children {
                if child.index() >= self.tiles.len() {
                    return Err(TraversalError::DanglingReference { id: child.0 });
                }
                if self.tiles[child.index()].parent != Some(id) {
                    return Err(TraversalError::InconsistentParent { id: child.0 });
                }
                stack.push(child);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Children of `id`, cloned into a small vec so callers may mutate other tiles while
    /// iterating (the arena can't hand out a live borrow of `children` alongside `&mut self`).
    pub fn children_of(&self, id: TileId) -> Vec<TileId> {
        self.tiles[id.index()].children.clone()
    }
}
