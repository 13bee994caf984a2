//! DSL (Domain Specific Language) for range-addressed cell stages
//!
//! This module provides:
//! - `template`: single-placeholder text templates
//! - `operations`: the transform and filter vocabulary
//! - `stage`: stage descriptors (rect + operation) parsed from spec text
//! - `executor`: run stages over a grid
//!
//! ## Example
//!
//! ```rust,ignore
//! use csvtools::transform::dsl::{apply_filters, FilterStage};
//! use csvtools::{AggregateCache, Grid};
//!
//! let mut grid = Grid::from_strs(vec![vec!["3"], vec!["1"]]);
//! let stage: FilterStage = "::cmin:**{}**".parse()?;
//! apply_filters(&mut grid, &[stage], &mut AggregateCache::new());
//! assert_eq!(grid.get(1, 0), Some("**1**"));
//! ```

pub mod executor;
pub mod operations;
pub mod stage;
pub mod template;

// Re-exports for convenience
pub use executor::{apply_filters, apply_transforms, StageStats};
pub use operations::{operations_description, parse_number, FilterCondition, TransformOp};
pub use stage::{FilterStage, TransformStage};
pub use template::{format_number, Template, TemplateArg};
