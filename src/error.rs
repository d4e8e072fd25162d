use thiserror::Error;

/// Construction-time errors for building a [`crate::arena::TileArena`] from untrusted data.
///
/// `select_tiles` itself never returns a `Result` — per the traversal's error-handling design,
/// a frame either selects something or selects nothing; there is no partial-output failure mode
/// once a tileset is known to be structurally valid.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("tile id {id} is out of range for this arena")]
    DanglingReference { id: u32 },

    #[error("tile id {id} was attached to two different parents")]
    ReparentedChild { id: u32 },

    #[error("cycle detected while validating the tile tree at tile id {id}")]
    Cycle { id: u32 },

    #[error("tile id {id}'s recorded parent does not list it as a child")]
    InconsistentParent { id: u32 },

    #[error("tileset has no root tile")]
    EmptyTileset,
}
