//! Cell-wise merging of same-shaped tables.
//!
//! The first table is the base. Every other table is folded into it cell by
//! cell with a lexicographic string `min` or `max`. Cells are only compared
//! where both tables have them.

use std::io::Write;
use std::path::Path;

use crate::error::{CsvError, CsvResult, PipelineResult};
use crate::parser::{read_file, ReadOptions};

/// How two cells are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MergeMode {
    #[default]
    Min,
    Max,
}

impl MergeMode {
    fn pick(self, current: &mut String, candidate: &str) {
        let replace = match self {
            MergeMode::Min => candidate < current.as_str(),
            MergeMode::Max => candidate > current.as_str(),
        };
        if replace {
            *current = candidate.to_string();
        }
    }
}

/// Fold `others` into `base`.
pub fn merge_tables(
    mut base: Vec<Vec<String>>,
    others: &[Vec<Vec<String>>],
    mode: MergeMode,
) -> Vec<Vec<String>> {
    for other in others {
        for (base_row, row) in base.iter_mut().zip(other) {
            for (current, candidate) in base_row.iter_mut().zip(row) {
                mode.pick(current, candidate);
            }
        }
    }
    base
}

/// Load and merge files. Returns an empty table when `paths` is empty.
pub fn merge_files<P: AsRef<Path>>(
    paths: &[P],
    options: &ReadOptions,
    mode: MergeMode,
) -> PipelineResult<Vec<Vec<String>>> {
    let mut tables = paths
        .iter()
        .map(|p| read_file(p, options))
        .collect::<CsvResult<Vec<_>>>()?;
    if tables.is_empty() {
        return Ok(Vec::new());
    }
    let base = tables.remove(0);
    Ok(merge_tables(base, &tables, mode))
}

/// Write records as plain comma-separated values.
pub fn write_csv<W: Write>(records: &[Vec<String>], out: W) -> CsvResult<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush().map_err(|e| CsvError::Io {
        path: "<output>".to_string(),
        source: e,
    })
}
