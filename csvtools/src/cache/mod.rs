//! Aggregate cache - memoized row/column extrema
//!
//! Filters such as `cmin` compare every cell of a rect against the same
//! extremum. The cache computes each distinct `(kind, scope, start, end)`
//! aggregate once and hands out the stored value afterwards. One cache lives
//! for the processing of one file.

use std::collections::HashMap;

use crate::error::{CellError, CellResult};
use crate::table::{Grid, Range};
use crate::transform::dsl::operations::parse_number;

/// Which extremum, and along which axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    ColumnMin,
    ColumnMax,
    RowMin,
    RowMax,
}

impl AggregateKind {
    fn is_min(self) -> bool {
        matches!(self, AggregateKind::ColumnMin | AggregateKind::RowMin)
    }
}

/// Cache key: kind, scope index (column or row), inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregateKey {
    pub kind: AggregateKind,
    pub scope: usize,
    pub start: usize,
    pub end: usize,
}

/// Memoized min/max aggregates over numeric cells.
#[derive(Debug, Default)]
pub struct AggregateCache {
    entries: HashMap<AggregateKey, f64>,
    scans: usize,
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum of column `col` over rows `row_start..=row_end`.
    pub fn column_min(
        &mut self,
        grid: &Grid,
        col: usize,
        row_start: usize,
        row_end: usize,
    ) -> CellResult<f64> {
        self.get(grid, AggregateKind::ColumnMin, col, row_start, row_end)
    }

    /// Maximum of column `col` over rows `row_start..=row_end`.
    pub fn column_max(
        &mut self,
        grid: &Grid,
        col: usize,
        row_start: usize,
        row_end: usize,
    ) -> CellResult<f64> {
        self.get(grid, AggregateKind::ColumnMax, col, row_start, row_end)
    }

    /// Minimum of row `row` over columns `col_start..=col_end`.
    pub fn row_min(
        &mut self,
        grid: &Grid,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) -> CellResult<f64> {
        self.get(grid, AggregateKind::RowMin, row, col_start, col_end)
    }

    /// Maximum of row `row` over columns `col_start..=col_end`.
    pub fn row_max(
        &mut self,
        grid: &Grid,
        row: usize,
        col_start: usize,
        col_end: usize,
    ) -> CellResult<f64> {
        self.get(grid, AggregateKind::RowMax, row, col_start, col_end)
    }

    /// Number of aggregates actually computed (cache misses that succeeded
    /// or failed).
    pub fn scans(&self) -> usize {
        self.scans
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(
        &mut self,
        grid: &Grid,
        kind: AggregateKind,
        scope: usize,
        start: usize,
        end: usize,
    ) -> CellResult<f64> {
        let key = AggregateKey {
            kind,
            scope,
            start,
            end,
        };
        if let Some(value) = self.entries.get(&key) {
            return Ok(*value);
        }

        self.scans += 1;
        let value = scan(grid, &key)?;
        self.entries.insert(key, value);
        Ok(value)
    }
}

/// Fold the addressed cells with min or max.
///
/// Row scans clamp the column end to the row length. Column scans only clamp
/// the row end to the table height, so a column missing from a row fails.
fn scan(grid: &Grid, key: &AggregateKey) -> CellResult<f64> {
    let bounds = Range::new(key.start, key.end);
    let values: Vec<f64> = match key.kind {
        AggregateKind::ColumnMin | AggregateKind::ColumnMax => {
            let col = key.scope;
            match bounds.clamp_to(grid.height()) {
                None => Vec::new(),
                Some(rows) => (rows.start..=rows.end)
                    .map(|row| {
                        grid.get(row, col)
                            .ok_or(CellError::OutOfBounds { row, col })
                            .and_then(parse_number)
                    })
                    .collect::<CellResult<_>>()?,
            }
        }
        AggregateKind::RowMin | AggregateKind::RowMax => {
            let row = key.scope;
            let cells = grid.row(row).ok_or(CellError::OutOfBounds {
                row,
                col: key.start,
            })?;
            match bounds.clamp_to(cells.len()) {
                None => Vec::new(),
                Some(cols) => cells[cols.start..=cols.end]
                    .iter()
                    .map(|cell| parse_number(cell))
                    .collect::<CellResult<_>>()?,
            }
        }
    };

    Ok(if key.kind.is_min() {
        values.into_iter().fold(f64::INFINITY, f64::min)
    } else {
        values.into_iter().fold(f64::NEG_INFINITY, f64::max)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::UNBOUNDED;

    fn sample() -> Grid {
        Grid::from_strs(vec![
            vec!["5", "2", "9"],
            vec!["1", "7", "3"],
            vec!["4", "8", "6"],
        ])
    }

    #[test]
    fn test_column_extrema() {
        let grid = sample();
        let mut cache = AggregateCache::new();
        assert_eq!(cache.column_min(&grid, 0, 0, UNBOUNDED).unwrap(), 1.0);
        assert_eq!(cache.column_max(&grid, 1, 0, UNBOUNDED).unwrap(), 8.0);
        assert_eq!(cache.column_max(&grid, 1, 0, 1).unwrap(), 7.0);
    }

    #[test]
    fn test_row_extrema_clamped() {
        let grid = sample();
        let mut cache = AggregateCache::new();
        assert_eq!(cache.row_min(&grid, 0, 0, UNBOUNDED).unwrap(), 2.0);
        assert_eq!(cache.row_max(&grid, 1, 0, 100).unwrap(), 7.0);
        assert_eq!(cache.row_max(&grid, 1, 2, 2).unwrap(), 3.0);
    }

    #[test]
    fn test_memoized_by_key() {
        let grid = sample();
        let mut cache = AggregateCache::new();
        cache.column_min(&grid, 0, 0, UNBOUNDED).unwrap();
        cache.column_min(&grid, 0, 0, UNBOUNDED).unwrap();
        assert_eq!(cache.scans(), 1);

        // different bounds or kind is a different entry
        cache.column_min(&grid, 0, 1, UNBOUNDED).unwrap();
        cache.column_max(&grid, 0, 0, UNBOUNDED).unwrap();
        assert_eq!(cache.scans(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_non_numeric_fails_and_is_not_cached() {
        let grid = Grid::from_strs(vec![vec!["1"], vec!["n/a"]]);
        let mut cache = AggregateCache::new();
        assert!(matches!(
            cache.column_min(&grid, 0, 0, UNBOUNDED),
            Err(CellError::NumericParse { .. })
        ));
        assert!(cache.is_empty());
        // a scope avoiding the bad cell works
        assert_eq!(cache.column_min(&grid, 0, 0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_column_out_of_bounds() {
        let grid = sample();
        let mut cache = AggregateCache::new();
        assert!(matches!(
            cache.column_max(&grid, 5, 0, UNBOUNDED),
            Err(CellError::OutOfBounds { row: 0, col: 5 })
        ));
    }

    #[test]
    fn test_empty_scope_folds_to_infinity() {
        let grid = sample();
        let mut cache = AggregateCache::new();
        assert_eq!(cache.column_min(&grid, 0, 10, UNBOUNDED).unwrap(), f64::INFINITY);
        assert_eq!(cache.row_max(&grid, 0, 10, 20).unwrap(), f64::NEG_INFINITY);
    }
}
