//! Column-aligned table rendering.
//!
//! Every cell is right-justified with spaces to the widest entry of its
//! column. A dialect only changes the framing of each line:
//!
//! ```text
//! table   "| " + cells joined by " | " + " |"
//! csv     ""   + cells joined by ", "  + ""
//! latex   ""   + cells joined by " & " + "\\"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

use crate::table::Grid;

/// Fill character of the header rule.
pub const HEADER_FILL: char = '-';

/// Output dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Table,
    Csv,
    Latex,
}

/// Line framing for one output dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub line_prefix: String,
    pub line_suffix: String,
    pub entry_separator: String,
    /// Whether a header rule may be drawn under the first row
    pub header_rule: bool,
}

impl Dialect {
    pub fn table() -> Self {
        Self {
            line_prefix: "| ".to_string(),
            line_suffix: " |".to_string(),
            entry_separator: " | ".to_string(),
            header_rule: true,
        }
    }

    pub fn csv() -> Self {
        Self {
            line_prefix: String::new(),
            line_suffix: String::new(),
            entry_separator: ", ".to_string(),
            header_rule: true,
        }
    }

    pub fn latex() -> Self {
        Self {
            line_prefix: String::new(),
            line_suffix: "\\\\".to_string(),
            entry_separator: " & ".to_string(),
            header_rule: false,
        }
    }
}

impl From<OutputType> for Dialect {
    fn from(output: OutputType) -> Self {
        match output {
            OutputType::Table => Dialect::table(),
            OutputType::Csv => Dialect::csv(),
            OutputType::Latex => Dialect::latex(),
        }
    }
}

/// Display width of every column's widest entry.
pub fn longest_entries(grid: &Grid) -> Vec<usize> {
    let mut widths = vec![0; grid.width()];
    for row in grid.rows() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    widths
}

fn pad_left(out: &mut String, cell: &str, width: usize) {
    let pad = width.saturating_sub(cell.width());
    out.push_str(&" ".repeat(pad));
    out.push_str(cell);
}

/// Renders a grid in a dialect.
#[derive(Debug, Clone)]
pub struct TableWriter {
    dialect: Dialect,
    first_line_header: bool,
    alt_suffixes: HashMap<usize, String>,
}

impl TableWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            first_line_header: false,
            alt_suffixes: HashMap::new(),
        }
    }

    /// Draw a rule under the first row (if the dialect has one).
    pub fn with_header(mut self, header: bool) -> Self {
        self.first_line_header = header;
        self
    }

    /// Use `suffix` instead of the dialect suffix on row `row`.
    pub fn with_row_suffix(mut self, row: usize, suffix: impl Into<String>) -> Self {
        self.alt_suffixes.insert(row, suffix.into());
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Render the whole grid, one `\n`-terminated line per row.
    pub fn render(&self, grid: &Grid) -> String {
        let widths = longest_entries(grid);
        let mut out = String::new();

        for (i, row) in grid.rows().iter().enumerate() {
            let suffix = self
                .alt_suffixes
                .get(&i)
                .unwrap_or(&self.dialect.line_suffix);

            out.push_str(&self.dialect.line_prefix);
            for (j, (cell, width)) in row.iter().zip(&widths).enumerate() {
                if j > 0 {
                    out.push_str(&self.dialect.entry_separator);
                }
                pad_left(&mut out, cell, *width);
            }
            out.push_str(suffix);
            out.push('\n');

            if i == 0 && self.first_line_header && self.dialect.header_rule {
                out.push_str(&self.dialect.line_prefix);
                for (j, width) in widths.iter().enumerate() {
                    if j > 0 {
                        out.push_str(&self.dialect.entry_separator);
                    }
                    out.push_str(&HEADER_FILL.to_string().repeat(*width));
                }
                out.push_str(suffix);
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_strs(vec![vec!["1", "22"], vec!["333", "4"]])
    }

    #[test]
    fn test_table_dialect() {
        let out = TableWriter::new(Dialect::table()).render(&sample());
        assert_eq!(out, "|   1 | 22 |\n| 333 |  4 |\n");
    }

    #[test]
    fn test_csv_dialect() {
        let out = TableWriter::new(OutputType::Csv.into()).render(&sample());
        assert_eq!(out, "  1, 22\n333,  4\n");
    }

    #[test]
    fn test_latex_dialect() {
        let out = TableWriter::new(OutputType::Latex.into())
            .with_header(true)
            .render(&sample());
        assert_eq!(out, "  1 & 22\\\\\n333 &  4\\\\\n");
    }

    #[test]
    fn test_header_rule() {
        let grid = Grid::from_strs(vec![vec!["id", "name"], vec!["1", "x"]]);
        let out = TableWriter::new(Dialect::table()).with_header(true).render(&grid);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["| id | name |", "| -- | ---- |", "|  1 |    x |"]);
    }

    #[test]
    fn test_every_cell_has_column_width() {
        let grid = Grid::from_strs(vec![vec!["a", "bbbb"], vec!["ccc", ""], vec!["", "d"]]);
        let widths = longest_entries(&grid);
        assert_eq!(widths, vec![3, 4]);
        let out = TableWriter::new(Dialect::csv()).render(&grid);
        for line in out.lines() {
            let cells: Vec<&str> = line.split(", ").collect();
            assert_eq!(cells[0].len(), 3);
            assert_eq!(cells[1].len(), 4);
        }
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        let grid = Grid::from_strs(vec![vec!["日本"], vec!["abc"]]);
        let out = TableWriter::new(Dialect::csv()).render(&grid);
        assert_eq!(out, "日本\n abc\n");
    }

    #[test]
    fn test_row_suffix_override() {
        let out = TableWriter::new(Dialect::latex())
            .with_row_suffix(1, "\\\\ \\hline")
            .render(&sample());
        assert_eq!(out, "  1 & 22\\\\\n333 &  4\\\\ \\hline\n");
    }

    #[test]
    fn test_empty_grid_renders_nothing() {
        let out = TableWriter::new(Dialect::table()).render(&Grid::default());
        assert!(out.is_empty());
    }
}
