//! Table model: the cell grid and range addressing.

pub mod grid;
pub mod range;

pub use grid::Grid;
pub use range::{parse_range, Range, Rect, UNBOUNDED};
