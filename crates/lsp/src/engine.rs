// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion engine
//!
//! Request-level entry points. Every call parses the text it is given; nothing
//! is cached between calls.

use crate::config::EngineConfig;
use crate::diagnostic::collect_diagnostics;
use crate::error::CompletionError;
use crate::position::position_to_offset;
use crate::render::CompletionRenderer;
use lsp_types::{CompletionItem, Diagnostic, Position};
use tracing::{debug, info};
use typeql_grammar::parse;
use typeql_lsp_context::{CompletionResult, complete};
use typeql_lsp_schema::{Schema, schema_from_source};

/// Stateless completion engine
#[derive(Debug, Clone, Default)]
pub struct CompletionEngine {
    config: EngineConfig,
}

impl CompletionEngine {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            max_items = config.max_items,
            snippets = config.snippets,
            "Creating completion engine"
        );
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Completion result at a byte offset
    ///
    /// `Ok(None)` means the context has nothing to offer.
    pub fn complete_offset(
        &self,
        text: &str,
        offset: usize,
    ) -> Result<Option<CompletionResult>, CompletionError> {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return Err(CompletionError::InvalidOffset {
                offset,
                len: text.len(),
            });
        }
        let parsed = parse(text);
        let result = complete(parsed.tree(), text, offset);
        debug!(
            offset,
            candidates = result.as_ref().map_or(0, |r| r.candidates.len()),
            "Completion computed"
        );
        Ok(result)
    }

    /// Rendered completion items at an LSP position
    pub fn completion(
        &self,
        text: &str,
        position: Position,
    ) -> Result<Vec<CompletionItem>, CompletionError> {
        let offset = self.offset(text, position)?;
        self.render_at(text, offset)
    }

    /// Rendered completion items at a byte offset
    pub fn render_at(
        &self,
        text: &str,
        offset: usize,
    ) -> Result<Vec<CompletionItem>, CompletionError> {
        let items = self
            .complete_offset(text, offset)?
            .map(|result| CompletionRenderer::render(&result, text, offset, &self.config))
            .unwrap_or_default();
        Ok(items)
    }

    /// Byte offset of an LSP position
    pub fn offset(&self, text: &str, position: Position) -> Result<usize, CompletionError> {
        position_to_offset(text, position).ok_or(CompletionError::InvalidPosition(position))
    }

    /// Syntax diagnostics for a document
    pub fn diagnostics(&self, text: &str) -> Vec<Diagnostic> {
        collect_diagnostics(&parse(text), text)
    }

    /// Types declared by the document's define queries
    pub fn schema(&self, text: &str) -> Schema {
        schema_from_source(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_at_position() {
        let engine = CompletionEngine::default();
        let text = "match $x isa person;\nmatch ";
        let items = engine.completion(text, Position::new(1, 6)).unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["$x", "person"]);
    }

    #[test]
    fn test_position_past_last_line() {
        let engine = CompletionEngine::default();
        let err = engine.completion("match ", Position::new(4, 0)).unwrap_err();
        assert!(err.should_return_empty());
    }

    #[test]
    fn test_invalid_offsets() {
        let engine = CompletionEngine::default();
        assert!(matches!(
            engine.complete_offset("match", 6),
            Err(CompletionError::InvalidOffset { offset: 6, len: 5 })
        ));
        assert!(engine.complete_offset("$é", 2).is_err());
    }

    #[test]
    fn test_no_suggestions_render_empty() {
        let engine = CompletionEngine::default();
        let text = "match let $y = ";
        assert_eq!(engine.complete_offset(text, text.len()).unwrap(), None);
        assert!(engine.render_at(text, text.len()).unwrap().is_empty());
    }

    #[test]
    fn test_diagnostics_and_schema() {
        let engine = CompletionEngine::default();
        let diagnostics = engine.diagnostics("match $x isa");
        assert_eq!(diagnostics[0].message, "expected a type");
        let schema = engine.schema("define entity person, owns name;");
        assert_eq!(schema.owns("person"), ["name"]);
    }
}
