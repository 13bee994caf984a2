//! Error types for the csvtools pipeline.
//!
//! Two layers coexist and are kept apart on purpose:
//!
//! - Fail-fast errors ([`RangeError`], [`SpecError`], [`ProjectionError`],
//!   [`FormatError`], [`CsvError`]) propagate with `?` and end up in
//!   [`PipelineError`], aborting the current file or the whole run.
//! - [`CellError`] is raised while evaluating a transform or filter against a
//!   single cell. It is caught by the cell pipeline, which leaves the cell as
//!   it was. There is no conversion from `CellError` into `PipelineError`.

use thiserror::Error;

// =============================================================================
// Range Errors
// =============================================================================

/// Errors while parsing a textual range such as `"2-5"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A bound is not a non-negative integer, or the bounds are reversed.
    #[error("Invalid range '{spec}': {reason}")]
    InvalidRange { spec: String, reason: String },
}

impl RangeError {
    pub fn invalid(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        RangeError::InvalidRange {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Spec Errors
// =============================================================================

/// Errors in the text of column, format, filter and transform specs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// Range part of a spec is malformed.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A colon-delimited field is missing.
    #[error("Spec '{spec}' is missing its {field} field")]
    MissingField { spec: String, field: &'static str },

    /// Operation name is not part of the vocabulary.
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// Filter condition is not part of the vocabulary.
    #[error("Unknown filter condition '{0}'")]
    UnknownCondition(String),

    /// Numeric parameter could not be parsed.
    #[error("Invalid number '{value}' in '{spec}'")]
    InvalidNumber { spec: String, value: String },

    /// Column selector of a custom format spec is not an index.
    #[error("Invalid column selector '{0}'")]
    InvalidColumn(String),
}

// =============================================================================
// Projection Errors
// =============================================================================

/// Errors while projecting columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// A resolved column bound does not exist in the table.
    #[error("Column {bound} is out of bounds for a table of width {width}")]
    ColumnOutOfBounds { bound: usize, width: usize },
}

// =============================================================================
// Format Errors
// =============================================================================

/// Errors while parsing or applying a text template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Template text is not well formed.
    #[error("Malformed template '{template}': {reason}")]
    Malformed { template: String, reason: String },

    /// Placeholder type does not fit the argument.
    #[error("Format type '{kind}' cannot be applied to text '{value}'")]
    Mismatch { kind: char, value: String },
}

// =============================================================================
// Cell Errors (fail-soft)
// =============================================================================

/// A failure evaluating one stage against one cell.
///
/// Only the cell pipeline produces these, and it always swallows them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    /// Cell content is not a number.
    #[error("Not a number: '{value}'")]
    NumericParse { value: String },

    /// Addressed cell does not exist.
    #[error("Cell ({row}, {col}) does not exist")]
    OutOfBounds { row: usize, col: usize },

    /// Template could not be applied.
    #[error(transparent)]
    Template(#[from] FormatError),
}

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading delimited input.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be read.
    #[error("Invalid CSV: {0}")]
    Record(#[from] csv::Error),

    /// Delimiter is not a single-byte character.
    #[error("Delimiter '{0}' is not a single-byte character")]
    Delimiter(char),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors for processing a file.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type RangeResult<T> = Result<T, RangeError>;

pub type CellResult<T> = Result<T, CellError>;

pub type CsvResult<T> = Result<T, CsvError>;

pub type PipelineResult<T> = Result<T, PipelineError>;
