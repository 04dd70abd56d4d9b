//! Block-level world access

pub mod block;
pub mod query;
pub mod grid;

pub use block::{BlockSample, BlockState, StateValue};
pub use query::WorldQuery;
pub use grid::BlockGrid;
