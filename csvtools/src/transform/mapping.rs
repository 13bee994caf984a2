//! Value mapping from a two-column lookup file.

use std::collections::HashMap;
use std::path::Path;

use crate::error::CsvResult;
use crate::parser::{read_file, ReadOptions};
use crate::table::Grid;

/// Exact-match `key -> value` substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<String, String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records. Only records with exactly two fields are used;
    /// on duplicate keys the last record wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let entries = records
            .into_iter()
            .filter(|r| r.len() == 2)
            .map(|mut r| {
                let value = r.pop().unwrap_or_default();
                let key = r.pop().unwrap_or_default();
                (key, value)
            })
            .collect();
        Self { entries }
    }

    /// Load a comma-separated mapping file, fields taken verbatim.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CsvResult<Self> {
        let options = ReadOptions {
            delimiter: ',',
            trim: false,
        };
        Ok(Self::from_records(read_file(path, &options)?))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every cell that equals a key. Each cell is looked up once.
    ///
    /// Returns the number of replaced cells.
    pub fn apply(&self, grid: &mut Grid) -> usize {
        let mut replaced = 0;
        grid.for_each_cell_mut(|_, _, cell| {
            if let Some(value) = self.entries.get(cell.as_str()) {
                *cell = value.clone();
                replaced += 1;
            }
        });
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn records(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_only_two_field_records() {
        let table = MappingTable::from_records(records(&[
            &["a", "1"],
            &["b"],
            &["c", "3", "extra"],
            &["a", "2"],
        ]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some("2"));
    }

    #[test]
    fn test_apply_exact_match() {
        let mut table = MappingTable::new();
        table.insert("yes", "✓");
        let mut grid = Grid::from_strs(vec![vec!["yes", "Yes", " yes"]]);
        assert_eq!(table.apply(&mut grid), 1);
        assert_eq!(grid.rows()[0], vec!["✓", "Yes", " yes"]);
    }

    #[test]
    fn test_single_lookup_per_pass() {
        let mut table = MappingTable::new();
        table.insert("a", "b");
        table.insert("b", "c");
        let mut grid = Grid::from_strs(vec![vec!["a", "b"]]);
        table.apply(&mut grid);
        assert_eq!(grid.rows()[0], vec!["b", "c"]);
        // a second pass cascades
        table.apply(&mut grid);
        assert_eq!(grid.rows()[0], vec!["c", "c"]);
    }

    #[test]
    fn test_from_path_keeps_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x, y").unwrap();
        writeln!(file, "lonely").unwrap();
        let table = MappingTable::from_path(file.path()).unwrap();
        assert_eq!(table.get("x"), Some(" y"));
        assert_eq!(table.len(), 1);
    }
}
