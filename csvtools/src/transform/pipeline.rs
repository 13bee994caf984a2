//! High-level pipeline API: records in, rendered text out.
//!
//! Per file the stages run in a fixed order:
//!
//! ```text
//! normalize → transpose → mapping → column order → transforms → filters
//!           → custom format → render
//! ```
//!
//! Specs are parsed once, when the [`Pipeline`] is built. The aggregate cache
//! is created fresh for every file.
//!
//! # Example
//!
//! ```rust,ignore
//! use csvtools::{Pipeline, PipelineOptions};
//!
//! let options = PipelineOptions {
//!     filters: vec!["1-:1-:cmax:**{}**".into()],
//!     ..Default::default()
//! };
//! let pipeline = Pipeline::from_options(&options)?;
//! print!("{}", pipeline.process_file("scores.csv")?.output);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::dsl::{apply_filters, apply_transforms, FilterStage, StageStats, TransformStage};
use super::format::CustomFormatter;
use super::mapping::MappingTable;
use super::projection::ColumnProjector;
use crate::cache::AggregateCache;
use crate::error::{PipelineResult, SpecError};
use crate::logs::{log_info, log_info_indent, log_notice, log_success, log_warning};
use crate::parser::{read_file, ReadOptions};
use crate::render::{OutputType, TableWriter};
use crate::table::Grid;

/// Options for the print pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Input field delimiter
    pub delimiter: char,

    /// Treat the first row as a header (draw a rule under it)
    pub header: bool,

    /// Trim whitespace around input fields
    pub trim: bool,

    /// Swap rows and columns before any range-addressed stage
    pub transpose: bool,

    /// Two-column file of value substitutions
    pub mapping: Option<PathBuf>,

    /// Output dialect
    pub output_type: OutputType,

    /// Column order specs (`id`, `a-b`, ...)
    pub column_order: Vec<String>,

    /// Custom format specs (`<col>:<template>`)
    pub custom_format: Vec<String>,

    /// Filter specs (`<rows>:<cols>:<condition>:<template>`)
    pub filters: Vec<String>,

    /// Transform specs (`<rows>:<cols>:<operation>`)
    pub transforms: Vec<String>,

    /// Alternative line suffixes by row index
    pub row_suffixes: BTreeMap<usize, String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: false,
            trim: true,
            transpose: false,
            mapping: None,
            output_type: OutputType::Table,
            column_order: Vec::new(),
            custom_format: Vec::new(),
            filters: Vec::new(),
            transforms: Vec::new(),
            row_suffixes: BTreeMap::new(),
        }
    }
}

impl PipelineOptions {
    /// Parse options from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load options from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            delimiter: self.delimiter,
            trim: self.trim,
        }
    }
}

/// Parse `"<row>:<suffix>"`.
pub fn parse_row_suffix(spec: &str) -> Result<(usize, String), SpecError> {
    let (row, suffix) = spec.split_once(':').ok_or_else(|| SpecError::MissingField {
        spec: spec.to_string(),
        field: "suffix",
    })?;
    let row = row.parse::<usize>().map_err(|_| SpecError::InvalidNumber {
        spec: spec.to_string(),
        value: row.to_string(),
    })?;
    Ok((row, suffix.to_string()))
}

/// Result of processing one table
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Rendered text
    pub output: String,
    /// Final grid
    pub grid: Grid,
    /// Cells replaced by the mapping table
    pub mapped: usize,
    /// Transform stage counters
    pub transforms: StageStats,
    /// Filter stage counters
    pub filters: StageStats,
    /// Aggregates computed by the filter stage
    pub aggregate_scans: usize,
}

/// Outcome of a multi-file run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// The configured per-file pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    read_options: ReadOptions,
    transpose: bool,
    mapping: Option<MappingTable>,
    projector: ColumnProjector,
    transforms: Vec<TransformStage>,
    filters: Vec<FilterStage>,
    formatter: CustomFormatter,
    writer: TableWriter,
}

impl Pipeline {
    /// Parse every spec and load the mapping file.
    ///
    /// Any malformed spec fails here, before a single file is read.
    pub fn from_options(options: &PipelineOptions) -> PipelineResult<Self> {
        let mapping = match &options.mapping {
            Some(path) => {
                let table = MappingTable::from_path(path)?;
                if table.is_empty() {
                    log_warning(format!("{}: no key,value records", path.display()));
                }
                log_info(format!("Loaded {} mappings from {}", table.len(), path.display()));
                Some(table)
            }
            None => None,
        };

        let transforms = options
            .transforms
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<TransformStage>, _>>()?;
        let filters = options
            .filters
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<FilterStage>, _>>()?;

        let mut writer = TableWriter::new(options.output_type.into()).with_header(options.header);
        for (row, suffix) in &options.row_suffixes {
            writer = writer.with_row_suffix(*row, suffix.clone());
        }

        Ok(Self {
            read_options: options.read_options(),
            transpose: options.transpose,
            mapping,
            projector: ColumnProjector::parse(&options.column_order)?,
            transforms,
            filters,
            formatter: CustomFormatter::parse(&options.custom_format)?,
            writer,
        })
    }

    /// Run every stage over already-read records.
    pub fn process_records(&self, records: Vec<Vec<String>>) -> PipelineResult<FileReport> {
        let mut grid = Grid::from_records(records);
        log_info_indent(format!("{} rows x {} columns", grid.height(), grid.width()), 1);

        if self.transpose {
            grid = grid.transpose();
        }

        let mapped = match &self.mapping {
            Some(table) => table.apply(&mut grid),
            None => 0,
        };

        let mut grid = self.projector.apply(grid)?;

        let transforms = apply_transforms(&mut grid, &self.transforms);

        let mut cache = AggregateCache::new();
        let filters = apply_filters(&mut grid, &self.filters, &mut cache);

        self.formatter.apply(&mut grid)?;

        if mapped > 0 {
            log_info_indent(format!("mapping: {} cells replaced", mapped), 1);
        }
        if !self.transforms.is_empty() {
            log_info_indent(format!("transforms: {}", transforms.summary()), 1);
        }
        if !self.filters.is_empty() {
            log_info_indent(
                format!("filters: {} ({} aggregates)", filters.summary(), cache.scans()),
                1,
            );
        }

        Ok(FileReport {
            output: self.writer.render(&grid),
            grid,
            mapped,
            transforms,
            filters,
            aggregate_scans: cache.scans(),
        })
    }

    /// Read and process one file.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> PipelineResult<FileReport> {
        let path = path.as_ref();
        log_info(format!("📄 Processing: {}", path.display()));
        let records = read_file(path, &self.read_options)?;
        self.process_records(records)
    }

    /// Process files one after another, writing each rendering to `out`.
    ///
    /// A failing file is reported and skipped; the others still run.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        paths: &[P],
        mut out: W,
    ) -> PipelineResult<RunSummary> {
        let mut summary = RunSummary::default();
        for path in paths {
            match self.process_file(path) {
                Ok(report) => {
                    out.write_all(report.output.as_bytes())?;
                    summary.processed += 1;
                }
                Err(e) => {
                    log_notice(format!("Error: {}: {}", path.as_ref().display(), e));
                    summary.failed += 1;
                }
            }
        }
        out.flush()?;
        log_success(format!(
            "{} file(s) processed, {} failed",
            summary.processed, summary.failed
        ));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, ProjectionError};

    fn records(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn pipeline(options: PipelineOptions) -> Pipeline {
        Pipeline::from_options(&options).unwrap()
    }

    #[test]
    fn test_default_options() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.delimiter, ',');
        assert!(opts.trim);
        assert!(!opts.header);
        assert_eq!(opts.output_type, OutputType::Table);
    }

    #[test]
    fn test_options_from_json() {
        let opts = PipelineOptions::from_json(
            r#"{"output_type": "latex", "filters": ["::true:{}"], "header": true}"#,
        )
        .unwrap();
        assert_eq!(opts.output_type, OutputType::Latex);
        assert!(opts.header);
        assert!(opts.trim);
        assert_eq!(opts.filters.len(), 1);

        let back = PipelineOptions::from_json(&opts.to_json().unwrap()).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn test_end_to_end_table() {
        let report = pipeline(PipelineOptions::default())
            .process_records(records(&[&["1", "22"], &["333", "4"]]))
            .unwrap();
        assert_eq!(report.output, "|   1 | 22 |\n| 333 |  4 |\n");
    }

    #[test]
    fn test_end_to_end_csv() {
        let report = pipeline(PipelineOptions {
            output_type: OutputType::Csv,
            ..Default::default()
        })
        .process_records(records(&[&["1", "22"], &["333", "4"]]))
        .unwrap();
        assert_eq!(report.output, "  1, 22\n333,  4\n");
    }

    #[test]
    fn test_ranges_see_transposed_table() {
        let report = pipeline(PipelineOptions {
            transpose: true,
            filters: vec!["0::true:<{}>".into()],
            output_type: OutputType::Csv,
            ..Default::default()
        })
        .process_records(records(&[&["a", "b"], &["c", "d"]]))
        .unwrap();
        assert_eq!(report.output, "<a>, <c>\n  b,   d\n");
    }

    #[test]
    fn test_stage_order() {
        // mapping → order → transform → filter → format
        let mut mapping = MappingTable::new();
        mapping.insert("two", "2");
        let mut p = pipeline(PipelineOptions {
            column_order: vec!["1".into(), "id".into()],
            transforms: vec!["::scale 10".into()],
            filters: vec![":0:cmax:{}!".into()],
            custom_format: vec!["1:#{}".into()],
            output_type: OutputType::Csv,
            ..Default::default()
        });
        p.mapping = Some(mapping);

        let report = p
            .process_records(records(&[&["x", "1"], &["y", "two"]]))
            .unwrap();
        assert_eq!(report.grid.rows()[0], vec!["10", "#0"]);
        assert_eq!(report.grid.rows()[1], vec!["20!", "#10"]);
        assert_eq!(report.mapped, 1);
        assert_eq!(report.aggregate_scans, 1);
    }

    #[test]
    fn test_projection_out_of_bounds_aborts() {
        let err = pipeline(PipelineOptions {
            column_order: vec!["0-5".into()],
            ..Default::default()
        })
        .process_records(records(&[&["a", "b"]]))
        .unwrap_err();
        assert!(matches!(err, PipelineError::Projection(_)));
    }

    #[test]
    fn test_column_order_on_empty_file_fails() {
        let err = pipeline(PipelineOptions {
            column_order: vec!["7".into()],
            ..Default::default()
        })
        .process_records(Vec::new())
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Projection(ProjectionError::ColumnOutOfBounds { bound: 7, width: 0 })
        ));
    }

    #[test]
    fn test_bad_specs_fail_at_build() {
        let bad = [
            PipelineOptions {
                filters: vec!["1-:cmin".into()],
                ..Default::default()
            },
            PipelineOptions {
                transforms: vec!["::rotate 90".into()],
                ..Default::default()
            },
            PipelineOptions {
                column_order: vec!["a-b".into()],
                ..Default::default()
            },
            PipelineOptions {
                custom_format: vec!["0:{".into()],
                ..Default::default()
            },
        ];
        for options in bad {
            assert!(Pipeline::from_options(&options).is_err());
        }
    }

    #[test]
    fn test_row_suffix_parse() {
        assert_eq!(parse_row_suffix("0:\\\\ \\hline").unwrap(), (0, "\\\\ \\hline".to_string()));
        assert!(parse_row_suffix("x:y").is_err());
        assert!(parse_row_suffix("3").is_err());
    }

    #[test]
    fn test_run_over_files() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "a, b").unwrap();
        let missing = good.path().with_extension("missing");

        let p = pipeline(PipelineOptions {
            output_type: OutputType::Csv,
            ..Default::default()
        });
        let mut out = Vec::new();
        let summary = p
            .run(&[good.path().to_path_buf(), missing], &mut out)
            .unwrap();
        assert_eq!(summary, RunSummary { processed: 1, failed: 1 });
        assert_eq!(String::from_utf8(out).unwrap(), "a, b\n");
    }

    #[test]
    fn test_mapping_file_loaded_once() {
        let mut map = tempfile::NamedTempFile::new().unwrap();
        writeln!(map, "n/a,-").unwrap();
        let p = pipeline(PipelineOptions {
            mapping: Some(map.path().to_path_buf()),
            output_type: OutputType::Csv,
            ..Default::default()
        });
        let report = p.process_records(records(&[&["n/a", "1"]])).unwrap();
        assert_eq!(report.output, "-, 1\n");
    }
}
