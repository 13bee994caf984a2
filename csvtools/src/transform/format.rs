//! Custom per-column formatting.
//!
//! Specs are `"<col>:<template>"`; an empty `<col>` applies the template to
//! every column. Unlike filter templates, these are parsed eagerly and any
//! failure aborts the file.

use std::collections::BTreeMap;

use crate::error::{FormatError, PipelineResult, SpecError};
use crate::table::Grid;
use crate::transform::dsl::{Template, TemplateArg};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFormatter {
    global: Option<Template>,
    columns: BTreeMap<usize, Template>,
}

impl CustomFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<S: AsRef<str>>(specs: &[S]) -> PipelineResult<Self> {
        let mut formatter = Self::new();
        for spec in specs {
            formatter.add(spec.as_ref())?;
        }
        Ok(formatter)
    }

    /// Add one `"<col>:<template>"` spec. Later specs replace earlier ones
    /// for the same selector.
    pub fn add(&mut self, spec: &str) -> PipelineResult<()> {
        let (selector, template) = spec.split_once(':').ok_or_else(|| SpecError::MissingField {
            spec: spec.to_string(),
            field: "template",
        })?;
        let template = Template::parse(template)?;

        if selector.is_empty() {
            self.global = Some(template);
        } else {
            let col = selector
                .parse::<usize>()
                .map_err(|_| SpecError::InvalidColumn(selector.to_string()))?;
            self.columns.insert(col, template);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.columns.is_empty()
    }

    /// Template for a column: the column's own, else the global one.
    pub fn template_for(&self, col: usize) -> Option<&Template> {
        self.columns.get(&col).or(self.global.as_ref())
    }

    /// Rewrite every cell of every selected column.
    pub fn apply(&self, grid: &mut Grid) -> Result<(), FormatError> {
        if self.is_empty() {
            return Ok(());
        }
        for row in grid.rows_mut() {
            for (col, cell) in row.iter_mut().enumerate() {
                if let Some(template) = self.template_for(col) {
                    *cell = template.render(TemplateArg::Text(cell.as_str()))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn test_column_and_global() {
        let formatter = CustomFormatter::parse(&[":<{}>", "1:[{}]"]).unwrap();
        let mut grid = Grid::from_strs(vec![vec!["a", "b", "c"]]);
        formatter.apply(&mut grid).unwrap();
        assert_eq!(grid.rows()[0], vec!["<a>", "[b]", "<c>"]);
    }

    #[test]
    fn test_single_column_only() {
        let formatter = CustomFormatter::parse(&["0:{:>3}"]).unwrap();
        let mut grid = Grid::from_strs(vec![vec!["7", "8"]]);
        formatter.apply(&mut grid).unwrap();
        assert_eq!(grid.rows()[0], vec!["  7", "8"]);
    }

    #[test]
    fn test_template_with_colons() {
        let formatter = CustomFormatter::parse(&["0:t: {}"]).unwrap();
        let mut grid = Grid::from_strs(vec![vec!["1"]]);
        formatter.apply(&mut grid).unwrap();
        assert_eq!(grid.get(0, 0), Some("t: 1"));
    }

    #[test]
    fn test_malformed_template_fails_fast() {
        let err = CustomFormatter::parse(&["0:{"]).unwrap_err();
        assert!(matches!(err, PipelineError::Format(_)));

        assert!(matches!(
            CustomFormatter::parse(&["no colon"]),
            Err(PipelineError::Spec(SpecError::MissingField { .. }))
        ));
        assert!(matches!(
            CustomFormatter::parse(&["x:{}"]),
            Err(PipelineError::Spec(SpecError::InvalidColumn(_)))
        ));
    }

    #[test]
    fn test_mismatch_propagates() {
        let formatter = CustomFormatter::parse(&["0:{:.1f}"]).unwrap();
        let mut grid = Grid::from_strs(vec![vec!["1.25"]]);
        assert!(formatter.apply(&mut grid).is_err());
    }
}
