//! Domain layer: column handles, key registry and errors
//!
//! This layer knows nothing about tree placement; the Grid wires it to the hierarchy.

pub mod entities;
pub mod error;
pub mod registry;

pub(crate) use entities::{KeySlot, UnitData};
pub use entities::{Attachment, Column, ColumnBase, ColumnGroup, GridId, ValueProvider};
pub use error::{ErrorKind, GridError, GridResult};
pub use registry::KeyRegistry;
