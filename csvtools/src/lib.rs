//! # csvtools - column-aligned rendering of delimited tables
//!
//! csvtools reads delimited text files, runs a configurable pipeline of
//! range-addressed stages over the cells and renders the result as an aligned
//! plain-text table, comma-separated text or a LaTeX tabular body.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Transform  │────▶│   Render    │
//! │ (ISO/UTF8)  │     │ (auto-enc)  │     │ (map, DSL)  │     │ (aligned)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use csvtools::{OutputType, Pipeline, PipelineOptions};
//!
//! let options = PipelineOptions {
//!     header: true,
//!     output_type: OutputType::Latex,
//!     filters: vec!["1-:1-:cmin:\\textbf{{{}}}".into()],
//!     ..Default::default()
//! };
//! let pipeline = Pipeline::from_options(&options)?;
//! print!("{}", pipeline.process_file("results.csv")?.output);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`logs`] - Verbosity-filtered stderr logging
//! - [`parser`] - Delimited text reading with encoding detection
//! - [`table`] - Cell grid and range addressing
//! - [`transform`] - Mapping, projection, stages, formatting, merge and pipeline
//! - [`cache`] - Memoized row/column aggregates
//! - [`render`] - Output dialects and the table writer

// Core modules
pub mod error;
pub mod logs;

// Parsing
pub mod parser;

// Table model
pub mod table;

// Transformation
pub mod transform;

// Caching
pub mod cache;

// Output
pub mod render;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CellError, CsvError, FormatError, PipelineError, PipelineResult, ProjectionError, RangeError,
    SpecError,
};

// =============================================================================
// Re-exports - Table model
// =============================================================================

pub use table::{parse_range, Grid, Range, Rect, UNBOUNDED};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, detect_encoding, parse_bytes, parse_records, read_file, ReadOptions};

// =============================================================================
// Re-exports - DSL
// =============================================================================

pub use transform::dsl::{
    apply_filters, apply_transforms, operations_description, FilterCondition, FilterStage,
    StageStats, Template, TemplateArg, TransformOp, TransformStage,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    merge_files, merge_tables, parse_row_suffix, write_csv, ColumnProjector, ColumnSpec,
    CustomFormatter, FileReport, MappingTable, MergeMode, Pipeline, PipelineOptions, RunSummary,
};

// =============================================================================
// Re-exports - Cache and rendering
// =============================================================================

pub use cache::AggregateCache;
pub use render::{Dialect, OutputType, TableWriter};
