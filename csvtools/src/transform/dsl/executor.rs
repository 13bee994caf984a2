//! DSL Executor
//!
//! Runs transform and filter stages over a grid. Each cell is visited once
//! and every stage whose rect covers it is applied in declaration order, on
//! the value left by the previous stage.
//!
//! A stage that fails on a cell (non-numeric text, template mismatch) leaves
//! that cell unchanged; the failure is only counted.

use super::stage::{FilterStage, TransformStage};
use crate::cache::AggregateCache;
use crate::table::Grid;

/// Counters for one stage run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    /// Cells rewritten
    pub applied: usize,
    /// Cell evaluations that failed and were skipped
    pub skipped: usize,
}

impl StageStats {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!("{} cells rewritten, {} skipped", self.applied, self.skipped)
    }
}

/// Apply transform stages to every covered cell.
pub fn apply_transforms(grid: &mut Grid, stages: &[TransformStage]) -> StageStats {
    let mut stats = StageStats::default();
    if stages.is_empty() {
        return stats;
    }

    grid.for_each_cell_mut(|row, col, cell| {
        for stage in stages.iter().filter(|s| s.rect.is_in_range(row, col)) {
            match stage.apply(cell) {
                Ok(value) => {
                    *cell = value;
                    stats.applied += 1;
                }
                Err(_) => stats.skipped += 1,
            }
        }
    });

    stats
}

/// Apply filter stages to every covered cell.
///
/// Relative conditions read their extrema through `cache`, scanned over the
/// grid as it was before any filter ran. Rewrites only touch the live grid.
pub fn apply_filters(
    grid: &mut Grid,
    stages: &[FilterStage],
    cache: &mut AggregateCache,
) -> StageStats {
    let mut stats = StageStats::default();
    if stages.is_empty() {
        return stats;
    }

    let snapshot = grid.clone();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            for stage in stages.iter().filter(|s| s.rect.is_in_range(row, col)) {
                let Some(current) = grid.get(row, col) else {
                    continue;
                };
                match stage.apply(current, row, col, &snapshot, cache) {
                    Ok(Some(value)) => {
                        grid.set(row, col, value);
                        stats.applied += 1;
                    }
                    Ok(None) => {}
                    Err(_) => stats.skipped += 1,
                }
            }
        }
    }

    stats
}
