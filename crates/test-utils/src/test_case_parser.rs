// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Text-based test case format parser
//!
//! Test cases are separated by `---`. Each case is a list of unindented
//! `field:` lines, with multi-line values indented below them:
//!
//! ```text
//! description: Constraint keywords after a subject
//! input: |
//!   match $x |
//! expected:
//!   isa [thingConstraint]
//!   sub
//! excluded:
//!   person
//! mode: contains
//! ---
//! ```
//!
//! `|` in the input marks the cursor.

use std::fmt;
use std::path::Path;
use thiserror::Error;

const FIELDS: &[&str] = &["description", "input", "expected", "excluded", "mode"];

/// A single test case definition
#[derive(Debug, Clone)]
pub struct TestCase {
    pub description: String,
    /// Document text, containing the `|` cursor marker
    pub input: String,
    pub expected: Vec<ExpectedItem>,
    /// Labels that must not be offered
    pub excluded: Vec<String>,
    pub mode: MatchMode,
}

/// Expected completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedItem {
    /// Full format: label [category]
    Full { label: String, category: String },
    /// Simple format: just the label
    Simple(String),
}

impl ExpectedItem {
    pub fn label(&self) -> &str {
        match self {
            ExpectedItem::Full { label, .. } => label,
            ExpectedItem::Simple(label) => label,
        }
    }
}

/// How expected items are compared with the actual result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Every expected item is offered, others may be too
    #[default]
    Contains,
    /// Exactly the expected labels are offered, in any order
    Exact,
    /// No suggestions at all
    Empty,
}

/// Parse errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid match mode: {0}")]
    InvalidMode(String),

    #[error("Invalid syntax at line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Empty test case file")]
    EmptyFile,

    #[error("Invalid expected item format: {0}")]
    InvalidExpectedItem(String),
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Contains => write!(f, "contains"),
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Empty => write!(f, "empty"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contains" => Ok(MatchMode::Contains),
            "exact" => Ok(MatchMode::Exact),
            "empty" | "none" => Ok(MatchMode::Empty),
            _ => Err(ParseError::InvalidMode(s.to_string())),
        }
    }
}

/// Parse a test case file
pub fn parse_test_file(path: &Path) -> Result<Vec<TestCase>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_test_content(&content)
}

/// Parse test case content from a string
pub fn parse_test_content(content: &str) -> Result<Vec<TestCase>, ParseError> {
    let mut cases = Vec::new();
    let mut current_case = TestCaseBuilder::default();
    let mut current_field: Option<&str> = None;
    let mut current_value: Vec<String> = Vec::new();
    let mut line_num = 0;

    for line in content.lines() {
        line_num += 1;
        let trimmed = line.trim();

        if trimmed.is_empty() && current_field.is_none() {
            continue;
        }

        if trimmed == "---" {
            if let Some(field) = current_field.take() {
                current_case.set_field(field, &current_value, line_num)?;
            }
            if current_case.has_fields() {
                cases.push(std::mem::take(&mut current_case).build(line_num)?);
            }
            current_value.clear();
            continue;
        }

        // Field declaration, only at the start of a line so input text may contain colons
        if let Some(field) = field_name(line) {
            if let Some(previous) = current_field {
                current_case.set_field(previous, &current_value, line_num)?;
            }
            current_field = Some(field);
            current_value.clear();

            let value = line[field.len() + 1..].trim();
            if !value.is_empty() && value != "|" {
                current_value.push(value.to_string());
            }
            continue;
        }

        if current_field.is_some() {
            current_value.push(line.to_string());
        } else {
            return Err(ParseError::InvalidSyntax {
                line: line_num,
                message: format!("text outside of a field: {trimmed}"),
            });
        }
    }

    if let Some(field) = current_field {
        current_case.set_field(field, &current_value, line_num)?;
    }
    if current_case.has_fields() {
        cases.push(current_case.build(line_num)?);
    }

    if cases.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    Ok(cases)
}

fn field_name(line: &str) -> Option<&'static str> {
    FIELDS.iter().copied().find(|field| {
        line.strip_prefix(field)
            .is_some_and(|rest| rest.starts_with(':'))
    })
}

/// Builder for constructing test cases incrementally
#[derive(Default)]
struct TestCaseBuilder {
    description: Option<String>,
    input: Option<String>,
    expected: Vec<ExpectedItem>,
    excluded: Vec<String>,
    mode: Option<MatchMode>,
}

impl TestCaseBuilder {
    fn has_fields(&self) -> bool {
        self.description.is_some() || self.input.is_some()
    }

    fn set_field(&mut self, field: &str, value: &[String], line: usize) -> Result<(), ParseError> {
        match field {
            "description" => self.description = Some(value.join("\n").trim().to_string()),
            "input" => self.input = Some(dedent(value)),
            "expected" => {
                self.expected = non_empty_lines(value)
                    .map(parse_expected_item)
                    .collect::<Result<_, _>>()?;
            }
            "excluded" => self.excluded = non_empty_lines(value).map(str::to_string).collect(),
            "mode" => self.mode = Some(value.join("").parse()?),
            other => {
                return Err(ParseError::InvalidSyntax {
                    line,
                    message: format!("unknown field: {other}"),
                });
            }
        }
        Ok(())
    }

    fn build(self, line: usize) -> Result<TestCase, ParseError> {
        let description = self.description.ok_or(ParseError::InvalidSyntax {
            line,
            message: "missing description field".to_string(),
        })?;
        let input = self.input.ok_or(ParseError::InvalidSyntax {
            line,
            message: "missing input field".to_string(),
        })?;
        if !input.contains('|') {
            return Err(ParseError::InvalidSyntax {
                line,
                message: format!("input of '{description}' has no cursor marker"),
            });
        }

        Ok(TestCase {
            description,
            input,
            expected: self.expected,
            excluded: self.excluded,
            mode: self.mode.unwrap_or_default(),
        })
    }
}

fn non_empty_lines(value: &[String]) -> impl Iterator<Item = &str> {
    value.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Remove common leading whitespace from multi-line text
///
/// Leading and trailing blank lines are dropped; trailing spaces on the last
/// line are kept since the cursor may sit after them.
fn dedent(lines: &[String]) -> String {
    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| line.get(min_indent..).unwrap_or_else(|| line.trim_start()))
        .collect();

    let start = stripped.iter().position(|l| !l.trim().is_empty());
    let end = stripped.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => stripped[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Parse an expected item string
fn parse_expected_item(s: &str) -> Result<ExpectedItem, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::InvalidExpectedItem("empty item".to_string()));
    }

    // Full format: label [category]; labels such as `not {};` contain no brackets
    if let Some(open) = s.rfind('[')
        && s.ends_with(']')
    {
        let label = s[..open].trim();
        let category = s[open + 1..s.len() - 1].trim();
        if label.is_empty() || category.is_empty() {
            return Err(ParseError::InvalidExpectedItem(s.to_string()));
        }
        return Ok(ExpectedItem::Full {
            label: label.to_string(),
            category: category.to_string(),
        });
    }

    Ok(ExpectedItem::Simple(s.to_string()))
}
