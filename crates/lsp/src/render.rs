// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion rendering
//!
//! Turns a [`CompletionResult`] into LSP completion items. Items are ranked by
//! boost, highest first; candidates with equal boost keep the order the engine
//! produced them in. `sort_text` encodes that rank so clients that re-sort
//! keep it.

use crate::config::EngineConfig;
use crate::position::span_to_range;
use lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, InsertTextFormat, TextEdit,
};
use typeql_lsp_context::{CandidateCategory, CompletionCandidate, CompletionResult};

/// Shifts boosts into a non-negative range for `sort_text`
const BOOST_OFFSET: i64 = 5000;

/// Completion renderer
pub struct CompletionRenderer;

impl CompletionRenderer {
    /// Render completion items for a result computed at `cursor`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typeql_grammar::parse;
    /// use typeql_lsp::{CompletionRenderer, EngineConfig};
    /// use typeql_lsp_context::complete;
    ///
    /// let text = "match $x isa person; match ";
    /// let result = complete(parse(text).tree(), text, text.len()).unwrap();
    /// let items = CompletionRenderer::render(&result, text, text.len(), &EngineConfig::default());
    /// assert_eq!(items[0].label, "$x");
    /// ```
    pub fn render(
        result: &CompletionResult,
        text: &str,
        cursor: usize,
        config: &EngineConfig,
    ) -> Vec<CompletionItem> {
        let mut ranked: Vec<(usize, &CompletionCandidate)> =
            result.candidates.iter().enumerate().collect();
        ranked.sort_by_key(|(index, candidate)| (-candidate.boost, *index));

        ranked
            .into_iter()
            .take(config.max_items)
            .enumerate()
            .map(|(rank, (_, candidate))| {
                Self::candidate_item(candidate, text, result.replace_from, cursor, rank, config)
            })
            .collect()
    }

    fn candidate_item(
        candidate: &CompletionCandidate,
        text: &str,
        replace_from: usize,
        cursor: usize,
        rank: usize,
        config: &EngineConfig,
    ) -> CompletionItem {
        let snippet = config
            .snippets
            .then(|| snippet_template(&candidate.insert_text))
            .flatten();
        let (new_text, format) = match snippet {
            Some(snippet) => (snippet, InsertTextFormat::SNIPPET),
            None => (candidate.insert_text.clone(), InsertTextFormat::PLAIN_TEXT),
        };

        CompletionItem {
            label: candidate.label.clone(),
            kind: Some(item_kind(candidate.category)),
            detail: candidate.info.clone(),
            sort_text: Some(sort_text(candidate.boost, rank)),
            filter_text: Some(candidate.label.clone()),
            insert_text_format: Some(format),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range: span_to_range(text, replace_from, cursor),
                new_text,
            })),
            ..Default::default()
        }
    }
}

/// LSP item kind for a candidate category
pub fn item_kind(category: CandidateCategory) -> CompletionItemKind {
    match category {
        CandidateCategory::Type => CompletionItemKind::CLASS,
        CandidateCategory::Variable => CompletionItemKind::VARIABLE,
        CandidateCategory::ThingConstraint
        | CandidateCategory::TypeConstraint
        | CandidateCategory::Keyword => CompletionItemKind::KEYWORD,
        CandidateCategory::Kind => CompletionItemKind::STRUCT,
        CandidateCategory::Method => CompletionItemKind::SNIPPET,
    }
}

/// Sort key: boost descending, then rank within the list
fn sort_text(boost: i32, rank: usize) -> String {
    let inverted = (BOOST_OFFSET - i64::from(boost)).clamp(0, 9999);
    format!("{inverted:04}_{rank:010}")
}

/// Snippet form of a pattern template, with a tab stop in every `{}`
///
/// A single block gets the final cursor `$0`; several blocks are numbered
/// from `$1`. Returns `None` for text without blocks.
pub fn snippet_template(template: &str) -> Option<String> {
    let blocks = template.matches("{}").count();
    if blocks == 0 {
        return None;
    }
    let mut snippet = String::with_capacity(template.len() + blocks * 4);
    for (index, part) in template.split("{}").enumerate() {
        if index > 0 {
            let stop = if blocks == 1 { 0 } else { index };
            snippet.push_str(&format!("{{ ${stop} }}"));
        }
        snippet.push_str(part);
    }
    Some(snippet)
}
