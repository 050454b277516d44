//! Grid-level errors

use thiserror::Error;

use crate::errors::HierarchyError;

/// Coarse classification of a [`GridError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was absent.
    NullArgument,
    /// The target's fixed state forbids the operation.
    State,
    /// A key collides with an existing binding.
    DuplicateKey,
    /// The referenced unit is not a valid target for this Grid.
    InvalidArgument,
    /// Settings could not be loaded or are invalid.
    Config,
    /// The hierarchy rejected an edit that validation should have prevented.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{argument} should not be null")]
    NullArgument { argument: &'static str },

    #[error("Column key has already been set to '{current}', cannot change it to '{requested}'")]
    KeyAlreadySet { current: String, requested: String },

    #[error("Duplicate key for columns: '{0}'")]
    DuplicateKey(String),

    #[error("The column with key '{0}' is not part of this Grid")]
    NotPartOfGrid(String),

    #[error("The column with key '{0}' has already been merged")]
    AlreadyMerged(String),

    #[error("The column with key '{0}' is listed more than once")]
    DuplicateMergeMember(String),

    #[error("At least {required} columns are required for a merge, got {given}")]
    MergeArity { required: usize, given: usize },

    #[error("config error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

impl GridError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullArgument { .. } => ErrorKind::NullArgument,
            Self::KeyAlreadySet { .. } => ErrorKind::State,
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::NotPartOfGrid(_)
            | Self::AlreadyMerged(_)
            | Self::DuplicateMergeMember(_)
            | Self::MergeArity { .. } => ErrorKind::InvalidArgument,
            Self::Config { .. } => ErrorKind::Config,
            Self::Hierarchy(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
