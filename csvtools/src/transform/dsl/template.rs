//! Single-placeholder text templates.
//!
//! A template is literal text with at most one placeholder:
//!
//! ```text
//! {}          value as-is
//! {0}         same, explicit argument index
//! {:>8.2f}    [[fill]align][width][.precision][type]
//! {{ }}       literal braces
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FormatError;

static SPEC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(.)?([<>^]))?(\d+)?(?:\.(\d+))?([sfe])?$").expect("Hardcoded regex pattern")
});

/// The value substituted into a template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemplateArg<'a> {
    Text(&'a str),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

/// Parsed `[[fill]align][width][.precision][type]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    width: Option<usize>,
    precision: Option<usize>,
    kind: Option<char>,
}

impl FormatSpec {
    fn parse(template: &str, inner: &str) -> Result<Self, FormatError> {
        let (index, spec) = inner.split_once(':').unwrap_or((inner, ""));
        if !index.is_empty() && index != "0" {
            return Err(malformed(template, "only argument 0 exists"));
        }

        let caps = SPEC_PATTERN
            .captures(spec)
            .ok_or_else(|| malformed(template, format!("invalid format spec '{}'", spec)))?;

        let number = |i: usize| -> Result<Option<usize>, FormatError> {
            caps.get(i)
                .map(|m| {
                    m.as_str()
                        .parse::<usize>()
                        .map_err(|e| malformed(template, e.to_string()))
                })
                .transpose()
        };

        Ok(Self {
            fill: caps.get(1).and_then(|m| m.as_str().chars().next()),
            align: caps.get(2).map(|m| match m.as_str() {
                "<" => Align::Left,
                ">" => Align::Right,
                _ => Align::Center,
            }),
            width: number(3)?,
            precision: number(4)?,
            kind: caps.get(5).and_then(|m| m.as_str().chars().next()),
        })
    }

    fn apply(&self, arg: TemplateArg<'_>) -> Result<String, FormatError> {
        let (body, default_align) = match arg {
            TemplateArg::Text(s) => {
                if let Some(kind @ ('f' | 'e')) = self.kind {
                    return Err(FormatError::Mismatch {
                        kind,
                        value: s.to_string(),
                    });
                }
                let body = match self.precision {
                    Some(p) => s.chars().take(p).collect(),
                    None => s.to_string(),
                };
                (body, Align::Left)
            }
            TemplateArg::Number(n) => {
                let body = match (self.kind, self.precision) {
                    (Some('s'), _) => {
                        return Err(FormatError::Mismatch {
                            kind: 's',
                            value: n.to_string(),
                        })
                    }
                    (Some('e'), Some(p)) => format!("{:.*e}", p, n),
                    (Some('e'), None) => format!("{:e}", n),
                    (_, Some(p)) => format!("{:.*}", p, n),
                    (_, None) => format_number(n),
                };
                (body, Align::Right)
            }
        };

        let len = body.chars().count();
        let width = self.width.unwrap_or(0);
        if len >= width {
            return Ok(body);
        }

        let fill = self.fill.unwrap_or(' ');
        let pad = width - len;
        let (left, right) = match self.align.unwrap_or(default_align) {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        let mut out = String::with_capacity(body.len() + pad);
        out.extend(std::iter::repeat(fill).take(left));
        out.push_str(&body);
        out.extend(std::iter::repeat(fill).take(right));
        Ok(out)
    }
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    prefix: String,
    placeholder: Option<FormatSpec>,
    suffix: String,
}

impl Template {
    pub fn parse(template: &str) -> Result<Self, FormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholder: Option<FormatSpec> = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if placeholder.is_some() {
                &mut suffix
            } else {
                &mut prefix
            };
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => inner.push(c),
                            None => return Err(malformed(template, "unterminated placeholder")),
                        }
                    }
                    if placeholder.is_some() {
                        return Err(malformed(template, "more than one placeholder"));
                    }
                    placeholder = Some(FormatSpec::parse(template, &inner)?);
                }
                '}' => return Err(malformed(template, "unmatched '}'")),
                c => out.push(c),
            }
        }

        Ok(Self {
            prefix,
            placeholder,
            suffix,
        })
    }

    /// Substitute `arg` into the template.
    pub fn render(&self, arg: TemplateArg<'_>) -> Result<String, FormatError> {
        match &self.placeholder {
            None => Ok(self.prefix.clone()),
            Some(spec) => {
                let value = spec.apply(arg)?;
                Ok(format!("{}{}{}", self.prefix, value, self.suffix))
            }
        }
    }
}

/// Shortest text form of a number (`3` for 3.0, `2.5` for 2.5).
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}

fn malformed(template: &str, reason: impl Into<String>) -> FormatError {
    FormatError::Malformed {
        template: template.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, arg: TemplateArg<'_>) -> String {
        Template::parse(template).unwrap().render(arg).unwrap()
    }

    #[test]
    fn test_plain_placeholder() {
        assert_eq!(render("**{}**", TemplateArg::Text("7")), "**7**");
        assert_eq!(render("{0}%", TemplateArg::Text("12")), "12%");
        assert_eq!(render("{}", TemplateArg::Number(3.0)), "3");
        assert_eq!(render("{}", TemplateArg::Number(2.5)), "2.5");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(
            render("\\textbf{{{}}}", TemplateArg::Text("x")),
            "\\textbf{x}"
        );
    }

    #[test]
    fn test_precision_and_width() {
        assert_eq!(render("{:.2f}", TemplateArg::Number(1.0 / 3.0)), "0.33");
        assert_eq!(render("{:.1}", TemplateArg::Number(2.26)), "2.3");
        assert_eq!(render("{:6.1f}", TemplateArg::Number(2.0)), "   2.0");
        assert_eq!(render("{:<5}|", TemplateArg::Number(1.0)), "1    |");
        assert_eq!(render("{:*^5}", TemplateArg::Text("a")), "**a**");
        assert_eq!(render("{:>4}", TemplateArg::Text("ab")), "  ab");
        assert_eq!(render("{:4}|", TemplateArg::Text("ab")), "ab  |");
        assert_eq!(render("{:.3}", TemplateArg::Text("abcdef")), "abc");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(render("{:.2e}", TemplateArg::Number(1234.5)), "1.23e3");
    }

    #[test]
    fn test_no_placeholder_is_literal() {
        assert_eq!(render("n/a", TemplateArg::Text("5")), "n/a");
    }

    #[test]
    fn test_malformed_templates() {
        assert!(Template::parse("{} and {}").is_err());
        assert!(Template::parse("{").is_err());
        assert!(Template::parse("oops}").is_err());
        assert!(Template::parse("{1}").is_err());
        assert!(Template::parse("{:x}").is_err());
    }

    #[test]
    fn test_type_mismatch() {
        let template = Template::parse("{:.2f}").unwrap();
        let err = template.render(TemplateArg::Text("abc")).unwrap_err();
        assert!(matches!(err, FormatError::Mismatch { kind: 'f', .. }));

        let template = Template::parse("{:s}").unwrap();
        assert!(template.render(TemplateArg::Number(1.0)).is_err());
    }
}
