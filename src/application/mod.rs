//! Application layer: the Grid facade and its mutation engines
//!
//! The Grid owns the hierarchy and the key registry; merge and removal are
//! implemented as services on top of it.

pub mod grid;
pub mod services;

pub use grid::Grid;
