//! The rectangular cell store.

/// A rectangular table of string cells.
///
/// Every row has exactly [`Grid::width`] cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// Build a grid from ragged records, padding short rows with empty cells.
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let width = records.iter().map(Vec::len).max().unwrap_or(0);
        let rows = records
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { rows, width }
    }

    /// Convenience constructor for string slices.
    pub fn from_strs<R, S>(records: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_records(
            records
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Replace a cell. Coordinates outside the grid are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Vec<String>> {
        self.rows.iter_mut()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Visit every cell mutably with its coordinates.
    pub fn for_each_cell_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, usize, &mut String),
    {
        for (y, row) in self.rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                f(y, x, cell);
            }
        }
    }

    /// Swap rows and columns: cell `(x, y)` of the result is `(y, x)` here.
    pub fn transpose(self) -> Self {
        let height = self.rows.len();
        let mut columns: Vec<Vec<String>> = (0..self.width)
            .map(|_| Vec::with_capacity(height))
            .collect();
        for row in self.rows {
            for (x, cell) in row.into_iter().enumerate() {
                columns[x].push(cell);
            }
        }
        Self {
            rows: columns,
            width: height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_pads_to_widest_row() {
        let grid = Grid::from_strs(vec![vec!["a"], vec!["b", "c", "d"], vec![]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(grid.rows().iter().all(|r| r.len() == 3));
        assert_eq!(grid.get(0, 1), Some(""));
        assert_eq!(grid.get(0, 2), Some(""));
        assert_eq!(grid.get(2, 0), Some(""));
        assert_eq!(grid.get(1, 2), Some("d"));
    }

    #[test]
    fn test_empty_input() {
        let grid = Grid::from_records(Vec::new());
        assert_eq!(grid.width(), 0);
        assert!(grid.is_empty());
        assert!(grid.transpose().is_empty());
    }

    #[test]
    fn test_transpose_dimensions() {
        let grid = Grid::from_strs(vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
        let t = grid.transpose();
        assert_eq!(t.height(), 3);
        assert_eq!(t.width(), 2);
        assert_eq!(t.get(0, 1), Some("4"));
        assert_eq!(t.get(2, 0), Some("3"));
    }

    #[test]
    fn test_transpose_is_involution() {
        let grid = Grid::from_strs(vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]]);
        let back = grid.clone().transpose().transpose();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_for_each_cell_mut_coordinates() {
        let mut grid = Grid::from_strs(vec![vec!["", ""], vec!["", ""]]);
        grid.for_each_cell_mut(|y, x, cell| *cell = format!("{}{}", y, x));
        assert_eq!(grid.get(1, 0), Some("10"));
        assert_eq!(grid.get(0, 1), Some("01"));
    }
}
