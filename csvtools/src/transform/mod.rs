//! Transformation module.
//!
//! - DSL: range-addressed transform and filter stages
//! - Mapping: value substitution from a lookup table
//! - Projection: column selection and reordering
//! - Format: per-column templates
//! - Merge: cell-wise min/max across tables
//! - Pipeline: the per-file processing pipeline

pub mod dsl;
pub mod format;
pub mod mapping;
pub mod merge;
pub mod pipeline;
pub mod projection;

pub use dsl::*;
pub use format::CustomFormatter;
pub use mapping::MappingTable;
pub use merge::{merge_files, merge_tables, write_csv, MergeMode};
pub use pipeline::*;
pub use projection::{ColumnProjector, ColumnSpec};
