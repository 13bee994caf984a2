//! Range addressing.
//!
//! Ranges are written `"a-b"`, `"a-"`, `"-b"`, `"a"` or `""` and resolve to
//! inclusive bounds.

use crate::error::{RangeError, RangeResult};

/// Upper bound used when a range has no natural maximum (row ranges,
/// stage column ranges).
pub const UNBOUNDED: usize = usize::MAX;

/// Inclusive `start..=end` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Range covering every index.
    pub fn all() -> Self {
        Self::new(0, UNBOUNDED)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Clamp the end bound to the last valid index of something `len` long.
    ///
    /// Returns `None` when nothing remains.
    pub fn clamp_to(&self, len: usize) -> Option<Self> {
        if len == 0 || self.start >= len {
            return None;
        }
        Some(Self::new(self.start, self.end.min(len - 1)))
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.end == UNBOUNDED {
            write!(f, "{}-", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parse a textual range into inclusive bounds.
///
/// An empty spec covers `(0, max)`. With a `-`, an empty left side means
/// `min` and an empty right side means `max`.
pub fn parse_range(spec: &str, min: usize, max: usize) -> RangeResult<Range> {
    if spec.is_empty() {
        return Ok(Range::new(0, max));
    }

    match spec.split_once('-') {
        Some((left, right)) => {
            let start = if left.is_empty() {
                min
            } else {
                parse_bound(spec, left)?
            };
            let end = if right.is_empty() {
                max
            } else {
                parse_bound(spec, right)?
            };
            Ok(Range::new(start, end))
        }
        None => {
            let index = parse_bound(spec, spec)?;
            Ok(Range::new(index, index))
        }
    }
}

fn parse_bound(spec: &str, token: &str) -> RangeResult<usize> {
    // `usize::from_str` accepts a leading '+', bounds must be bare digits
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::invalid(
            spec,
            format!("'{}' is not a non-negative integer", token),
        ));
    }
    token
        .parse::<usize>()
        .map_err(|e| RangeError::invalid(spec, format!("'{}': {}", token, e)))
}

/// A rectangular region: row range × column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub rows: Range,
    pub cols: Range,
}

impl Rect {
    pub fn new(rows: Range, cols: Range) -> Self {
        Self { rows, cols }
    }

    /// Rect covering every cell.
    pub fn all() -> Self {
        Self::new(Range::all(), Range::all())
    }

    /// Parse row and column range texts, both unbounded at the top.
    pub fn parse(rows: &str, cols: &str) -> RangeResult<Self> {
        Ok(Self::new(
            parse_range(rows, 0, UNBOUNDED)?,
            parse_range(cols, 0, UNBOUNDED)?,
        ))
    }

    pub fn is_in_range(&self, row: usize, col: usize) -> bool {
        self.rows.contains(row) && self.cols.contains(col)
    }
}
