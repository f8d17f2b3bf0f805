// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Diagnostics
//!
//! Reports the syntax errors found by the parser as LSP diagnostics.
//!
//! ```text
//! Document → parse → SyntaxError → TypeqlDiagnostic → LSP Diagnostic
//! ```
//!
//! Unexpected input covers the stray text. Missing input is zero-width in the
//! tree, so its diagnostic is placed on the token before the gap when there is
//! one, keeping it visible in editors.

use crate::position::span_to_range;
use lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Range};
use tracing::debug;
use typeql_grammar::{Parse, SyntaxError};

/// Source name attached to every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "typeql";

/// Diagnostic code identifying the type of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Input the grammar does not allow here
    UnexpectedInput,

    /// A required token or production is absent
    MissingInput,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnexpectedInput => "SYNTAX-001",
            DiagnosticCode::MissingInput => "SYNTAX-002",
        }
    }

    fn of(error: &SyntaxError) -> Self {
        if error.from == error.to {
            DiagnosticCode::MissingInput
        } else {
            DiagnosticCode::UnexpectedInput
        }
    }
}

impl From<DiagnosticCode> for NumberOrString {
    fn from(code: DiagnosticCode) -> Self {
        NumberOrString::String(code.as_str().to_string())
    }
}

/// TypeQL diagnostic before conversion to LSP format
#[derive(Debug, Clone, PartialEq)]
pub struct TypeqlDiagnostic {
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub range: Range,
    pub code: DiagnosticCode,
}

impl TypeqlDiagnostic {
    /// Diagnostic for a syntax error in `text`
    pub fn from_syntax_error(error: &SyntaxError, text: &str) -> Self {
        let code = DiagnosticCode::of(error);
        let (from, to) = match code {
            DiagnosticCode::MissingInput => preceding_word(text, error.from),
            DiagnosticCode::UnexpectedInput => (error.from, error.to),
        };
        Self {
            message: error.message.clone(),
            severity: DiagnosticSeverity::ERROR,
            range: span_to_range(text, from, to),
            code,
        }
    }

    /// Convert to LSP diagnostic format
    pub fn to_lsp(self) -> Diagnostic {
        Diagnostic {
            range: self.range,
            severity: Some(self.severity),
            code: Some(self.code.into()),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: self.message,
            ..Default::default()
        }
    }
}

/// LSP diagnostics for every syntax error of a parsed document
pub fn collect_diagnostics(parse: &Parse, text: &str) -> Vec<Diagnostic> {
    let diagnostics: Vec<Diagnostic> = parse
        .errors()
        .iter()
        .map(|error| TypeqlDiagnostic::from_syntax_error(error, text).to_lsp())
        .collect();
    debug!(count = diagnostics.len(), "Collected syntax diagnostics");
    diagnostics
}

/// Span of the non-whitespace run ending right before `pos`, or `pos..pos`
fn preceding_word(text: &str, pos: usize) -> (usize, usize) {
    let pos = pos.min(text.len());
    let before = text[..pos].trim_end();
    let start = before
        .rfind(char::is_whitespace)
        .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
    if start == before.len() {
        (pos, pos)
    } else {
        (start, before.len())
    }
}
