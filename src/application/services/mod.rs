//! Grid services
//!
//! Each service extends [`Grid`](crate::application::Grid) with one family of
//! tree mutations. Validation completes before the first edit, so a failed
//! call leaves the Grid untouched.

mod merge;
mod removal;
