//! Column tree of a tabular grid.
//!
//! A [`Grid`] holds an ordered set of leaf [`Column`]s that can be merged
//! into nested [`ColumnGroup`]s. Units are addressable by optional, write-once
//! keys; removing the last member of a group dissolves it.
//!
//! ```
//! use colgrid::Grid;
//!
//! let mut grid: Grid<(u32, String)> = Grid::new();
//! let id = grid.add_column(|row| row.0);
//! let name = grid.add_column(|row| row.1.clone());
//! grid.set_key(&name, "name")?;
//!
//! let group = grid.merge_columns([&id, &name])?;
//! assert_eq!(grid.top_level_columns().len(), 1);
//! assert_eq!(grid.child_columns(&group).len(), 2);
//!
//! grid.remove_column_by_key(Some("name"))?;
//! assert!(grid.column_by_key("name").is_none());
//! # Ok::<(), colgrid::GridError>(())
//! ```

pub mod application;
pub mod arena;
pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use application::Grid;
pub use config::GridSettings;
pub use domain::{
    Attachment, Column, ColumnBase, ColumnGroup, ErrorKind, GridError, GridId, GridResult,
    KeyRegistry, ValueProvider,
};
pub use tree_traits::TreeNodeConvert;
