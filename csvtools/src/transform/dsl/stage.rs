//! Stage descriptors: a rect plus an operation.
//!
//! Parsed from `"<rows>:<cols>:<operation>"` (transforms) and
//! `"<rows>:<cols>:<condition>:<template>"` (filters). The template is the
//! remainder after the third colon and may itself contain colons.

use std::str::FromStr;

use super::operations::{FilterCondition, TransformOp};
use super::template::Template;
use crate::cache::AggregateCache;
use crate::error::{CellResult, FormatError, SpecError};
use crate::table::{Grid, Rect};

fn required<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    spec: &str,
    field: &'static str,
) -> Result<&'a str, SpecError> {
    parts.next().ok_or_else(|| SpecError::MissingField {
        spec: spec.to_string(),
        field,
    })
}

/// A transform applied to every cell of a rect.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStage {
    pub rect: Rect,
    pub op: TransformOp,
}

impl TransformStage {
    pub fn new(rect: Rect, op: TransformOp) -> Self {
        Self { rect, op }
    }

    pub fn apply(&self, value: &str) -> CellResult<String> {
        self.op.apply(value)
    }
}

impl FromStr for TransformStage {
    type Err = SpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parts = spec.splitn(3, ':');
        let rows = required(&mut parts, spec, "row range")?;
        let cols = required(&mut parts, spec, "column range")?;
        let op = required(&mut parts, spec, "operation")?;
        Ok(Self::new(Rect::parse(rows, cols)?, op.parse()?))
    }
}

/// A conditional reformat applied to every cell of a rect.
///
/// The template is parsed up front, but a malformed template only surfaces
/// when a cell is evaluated.
#[derive(Debug, Clone)]
pub struct FilterStage {
    pub rect: Rect,
    pub condition: FilterCondition,
    pub template_text: String,
    template: Result<Template, FormatError>,
}

impl FilterStage {
    pub fn new(rect: Rect, condition: FilterCondition, template: impl Into<String>) -> Self {
        let template_text = template.into();
        let template = Template::parse(&template_text);
        Self {
            rect,
            condition,
            template_text,
            template,
        }
    }

    /// Evaluate against the cell at `(row, col)`.
    ///
    /// Returns the reformatted value when the condition holds.
    pub fn apply(
        &self,
        value: &str,
        row: usize,
        col: usize,
        grid: &Grid,
        cache: &mut AggregateCache,
    ) -> CellResult<Option<String>> {
        let arg = match self
            .condition
            .evaluate(value, row, col, &self.rect, grid, cache)?
        {
            Some(arg) => arg,
            None => return Ok(None),
        };
        let template = self.template.as_ref().map_err(Clone::clone)?;
        Ok(Some(template.render(arg)?))
    }
}

impl FromStr for FilterStage {
    type Err = SpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parts = spec.splitn(4, ':');
        let rows = required(&mut parts, spec, "row range")?;
        let cols = required(&mut parts, spec, "column range")?;
        let condition = required(&mut parts, spec, "condition")?;
        let template = required(&mut parts, spec, "template")?;
        Ok(Self::new(
            Rect::parse(rows, cols)?,
            condition.parse()?,
            template,
        ))
    }
}
