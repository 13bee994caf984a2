//! DSL operations applied to cells.
//!
//! The vocabulary is fixed: transforms are `scale <factor>`, filters are
//! `true`, `float`, `cmin`, `cmax`, `rmin`, `rmax` (the last four with an
//! optional factor).

use std::str::FromStr;

use super::template::{format_number, TemplateArg};
use crate::cache::AggregateCache;
use crate::error::{CellError, CellResult, SpecError};
use crate::table::{Grid, Rect};

/// Parse a cell as a floating point number.
pub fn parse_number(value: &str) -> CellResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CellError::NumericParse {
            value: value.to_string(),
        })
}

fn parse_factor(spec: &str, token: &str) -> Result<f64, SpecError> {
    token.parse::<f64>().map_err(|_| SpecError::InvalidNumber {
        spec: spec.to_string(),
        value: token.to_string(),
    })
}

/// Split `"name arg"` into the name and an optional single argument.
fn split_words(spec: &str) -> Result<(&str, Option<&str>), SpecError> {
    let mut words = spec.split_whitespace();
    let name = words.next().unwrap_or("");
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(SpecError::InvalidNumber {
            spec: spec.to_string(),
            value: extra.to_string(),
        });
    }
    Ok((name, arg))
}

// =============================================================================
// Transform operations
// =============================================================================

/// Value transforms.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    /// Multiply the numeric value by `factor`
    Scale { factor: f64 },
}

impl TransformOp {
    /// Apply to a cell value, returning the new value.
    pub fn apply(&self, value: &str) -> CellResult<String> {
        match self {
            TransformOp::Scale { factor } => {
                let n = parse_number(value)?;
                Ok(format_number(n * factor))
            }
        }
    }
}

impl FromStr for TransformOp {
    type Err = SpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match split_words(spec)? {
            ("scale", Some(factor)) => Ok(TransformOp::Scale {
                factor: parse_factor(spec, factor)?,
            }),
            ("scale", None) => Err(SpecError::MissingField {
                spec: spec.to_string(),
                field: "factor",
            }),
            (name, _) => Err(SpecError::UnknownOperation(name.to_string())),
        }
    }
}

// =============================================================================
// Filter conditions
// =============================================================================

/// Filter conditions.
///
/// Without a factor the min/max conditions test equality with the extremum.
/// With a factor they become thresholds: `value * f <= min` and
/// `value >= max * f` (the factor lands on different sides).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    AlwaysTrue,
    Float,
    ColumnMin { factor: Option<f64> },
    ColumnMax { factor: Option<f64> },
    RowMin { factor: Option<f64> },
    RowMax { factor: Option<f64> },
}

impl FilterCondition {
    /// Evaluate the condition for the cell at `(row, col)`.
    ///
    /// Returns the template argument when the condition holds, `None` when it
    /// does not.
    pub fn evaluate<'a>(
        &self,
        value: &'a str,
        row: usize,
        col: usize,
        rect: &Rect,
        grid: &Grid,
        cache: &mut AggregateCache,
    ) -> CellResult<Option<TemplateArg<'a>>> {
        let holds = match self {
            FilterCondition::AlwaysTrue => return Ok(Some(TemplateArg::Text(value))),
            FilterCondition::Float => return Ok(Some(TemplateArg::Number(parse_number(value)?))),
            FilterCondition::ColumnMin { factor } => {
                let n = parse_number(value)?;
                let min = cache.column_min(grid, col, rect.rows.start, rect.rows.end)?;
                match factor {
                    None => n == min,
                    Some(f) => n * f <= min,
                }
            }
            FilterCondition::ColumnMax { factor } => {
                let n = parse_number(value)?;
                let max = cache.column_max(grid, col, rect.rows.start, rect.rows.end)?;
                match factor {
                    None => n == max,
                    Some(f) => n >= max * f,
                }
            }
            FilterCondition::RowMin { factor } => {
                let n = parse_number(value)?;
                let min = cache.row_min(grid, row, rect.cols.start, rect.cols.end)?;
                match factor {
                    None => n == min,
                    Some(f) => n * f <= min,
                }
            }
            FilterCondition::RowMax { factor } => {
                let n = parse_number(value)?;
                let max = cache.row_max(grid, row, rect.cols.start, rect.cols.end)?;
                match factor {
                    None => n == max,
                    Some(f) => n >= max * f,
                }
            }
        };

        if holds {
            Ok(Some(TemplateArg::Number(parse_number(value)?)))
        } else {
            Ok(None)
        }
    }
}

impl FromStr for FilterCondition {
    type Err = SpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (name, arg) = split_words(spec)?;
        let factor = arg.map(|a| parse_factor(spec, a)).transpose()?;

        let condition = match name {
            "true" => FilterCondition::AlwaysTrue,
            "float" => FilterCondition::Float,
            "cmin" => FilterCondition::ColumnMin { factor },
            "cmax" => FilterCondition::ColumnMax { factor },
            "rmin" => FilterCondition::RowMin { factor },
            "rmax" => FilterCondition::RowMax { factor },
            other => return Err(SpecError::UnknownCondition(other.to_string())),
        };

        if matches!(condition, FilterCondition::AlwaysTrue | FilterCondition::Float)
            && factor.is_some()
        {
            return Err(SpecError::InvalidNumber {
                spec: spec.to_string(),
                value: arg.unwrap_or_default().to_string(),
            });
        }

        Ok(condition)
    }
}

/// Get a description of the stage vocabulary
pub fn operations_description() -> String {
    r#"Available csvtools operations:

Column order (--order, repeatable):
| Spec | Description |
|------|-------------|
| a-b, a-, -b, a | copy source columns a..=b (open ends: first/last column) |
| id | synthesize row index |
| id:<m> | synthesize row * m |
| id:<m>:<o> | synthesize row * m + o |

Transforms (--transform "<rows>:<cols>:<operation>"):
| Operation | Description |
|-----------|-------------|
| scale <f> | multiply numeric cells by f |

Filters (--filter "<rows>:<cols>:<condition>:<template>"):
| Condition | Applies template when |
|-----------|-----------------------|
| true | always (cell text) |
| float | always (cell as number) |
| cmin | value equals the column minimum over <rows> |
| cmax | value equals the column maximum over <rows> |
| cmin <f> | value * f <= column minimum |
| cmax <f> | value >= column maximum * f |
| rmin, rmax | row analogues over <cols> |

Custom format (--format "<col>:<template>", empty <col> = every column)

Templates: literal text with one placeholder
  {}  {0}  {:[[fill]align][width][.precision][type]}   align: < > ^   type: s f e
  {{ and }} are literal braces

Examples:
  --order id --order 2-
  --transform "1-:3:scale 100"
  --filter "1-:1-:cmax:**{}**"
  --filter "::float:{:.2f}"
  --format "0:[{}]""#
        .to_string()
}
