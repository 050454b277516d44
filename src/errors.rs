use generational_arena::Index;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Invalid or unknown hierarchy node: {0:?}")]
    InvalidNode(Index),

    #[error("Cannot attach node {child:?} below its own descendant {parent:?}")]
    CircularParentage { parent: Index, child: Index },

    #[error("Position {position} is out of bounds for a parent with {len} children")]
    PositionOutOfBounds { position: usize, len: usize },
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
