// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion resolution
//!
//! Resolves the cursor to a node, then climbs its ancestors. At every level the
//! kinds of the siblings already passed are prepended to the prefix and the
//! dispatch table is consulted; the first matching rule decides the generators.
//! A node kind without an entry, or an entry without a matching rule, simply
//! hands over to the parent.

use crate::cst_utils::{
    collect_preceding_children_of, collect_preceding_siblings, resolve_inner, word_start,
};
use crate::dispatch::{DISPATCH_TABLE, first_match};
use crate::suggestions::CompletionCandidate;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::LazyLock;
use typeql_grammar::SyntaxTree;

static IDENTIFIER_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-$]*$").expect("valid continuation regex"));

/// Pattern deciding whether further typing keeps a result list valid
#[derive(Debug, Clone, Copy)]
pub struct ContinuationPattern {
    regex: &'static Regex,
}

impl ContinuationPattern {
    /// Identifier-class characters, including `-` and `$`
    pub fn identifier() -> Self {
        Self {
            regex: &IDENTIFIER_CONTINUATION,
        }
    }

    /// Whether `typed` (the text between `replace_from` and the cursor) still continues the word
    pub fn is_match(&self, typed: &str) -> bool {
        self.regex.is_match(typed)
    }

    pub fn as_str(&self) -> &'static str {
        self.regex.as_str()
    }
}

impl PartialEq for ContinuationPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for ContinuationPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Candidates for one cursor position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    /// Start of the span the chosen candidate replaces; the span ends at the cursor
    pub replace_from: usize,
    pub candidates: Vec<CompletionCandidate>,
    pub continuation: ContinuationPattern,
}

/// Compute completions for `text` at byte offset `pos`
///
/// `tree` must be the parse of `text`. Returns `None` when the context offers
/// nothing. A rule that matches but whose generators all come up empty, such
/// as `match ` in a document with no variables or type labels yet, is reported
/// the same way as a context with no rule at all.
///
/// # Examples
///
/// ```
/// use typeql_grammar::parse;
/// use typeql_lsp_context::complete;
///
/// let text = "match $x ";
/// let parsed = parse(text);
/// let result = complete(parsed.tree(), text, text.len()).unwrap();
/// assert!(result.candidates.iter().any(|c| c.label == "isa"));
/// ```
pub fn complete(tree: &SyntaxTree, text: &str, pos: usize) -> Option<CompletionResult> {
    let pos = pos.min(text.len());
    let candidates = dedupe(climb(tree, text, pos)?);
    if candidates.is_empty() {
        tracing::debug!(pos, "no completion candidates");
        return None;
    }

    Some(CompletionResult {
        replace_from: word_start(text, pos),
        candidates,
        continuation: ContinuationPattern::identifier(),
    })
}

/// Walk from the resolved node to the root, returning the candidates of the
/// first terminal rule together with anything accumulated on the way
///
/// `None` means suggestions are suppressed outright.
fn climb(tree: &SyntaxTree, text: &str, pos: usize) -> Option<Vec<CompletionCandidate>> {
    let resolved = resolve_inner(tree, pos);
    let mut prefix = collect_preceding_children_of(resolved, pos);
    let mut accumulated = Vec::new();
    let mut current = Some(resolved);

    while let Some(node) = current {
        tracing::trace!(kind = %node.kind(), ?prefix, "climbing");

        if let Some(entry) = DISPATCH_TABLE.get(&node.kind()) {
            let Some(rules) = entry.rules_for(node, pos) else {
                tracing::debug!(kind = %node.kind(), "completion suppressed");
                return None;
            };
            match first_match(rules, &prefix) {
                Some(rule) => {
                    tracing::debug!(
                        kind = %node.kind(),
                        ?prefix,
                        continue_climbing = rule.continue_climbing,
                        "dispatch rule matched"
                    );
                    accumulated.extend(rule.generate(tree, text));
                    if !rule.continue_climbing {
                        return Some(accumulated);
                    }
                }
                None => tracing::trace!(kind = %node.kind(), "no rule matched, falling through"),
            }
        }

        let mut outer = collect_preceding_siblings(node);
        outer.append(&mut prefix);
        prefix = outer;
        current = node.parent();
    }

    Some(accumulated)
}

/// Drop repeated candidates, keeping the first (innermost) occurrence
fn dedupe(candidates: Vec<CompletionCandidate>) -> Vec<CompletionCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.label.clone(), c.category)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::CandidateCategory;
    use typeql_grammar::parse;

    fn complete_at_end(text: &str) -> Option<CompletionResult> {
        let parsed = parse(text);
        complete(parsed.tree(), text, text.len())
    }

    fn labels(result: &CompletionResult) -> Vec<&str> {
        result.candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_replace_from_covers_variable() {
        let result = complete_at_end("match $x").unwrap();
        assert_eq!(result.replace_from, 6);
        assert_eq!(labels(&result), vec!["$x"]);
        assert_eq!(result.candidates[0].boost, 10);
    }

    #[test]
    fn test_replace_from_is_cursor_after_whitespace() {
        let result = complete_at_end("match $x ").unwrap();
        assert_eq!(result.replace_from, 9);
    }

    #[test]
    fn test_clause_separator_merges_pipeline_stages() {
        let result = complete_at_end("match $x isa person; ").unwrap();
        let labels = labels(&result);
        // New pattern first, then the stages contributed by the pipeline
        assert_eq!(labels[0], "$x");
        assert!(labels.contains(&"not {};"));
        assert!(labels.contains(&"insert"));
        assert!(labels.contains(&"select"));
        let x = labels.iter().position(|l| *l == "$x").unwrap();
        let insert = labels.iter().position(|l| *l == "insert").unwrap();
        assert!(x < insert);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let result = complete_at_end("match $x isa person; ").unwrap();
        let count = result
            .candidates
            .iter()
            .filter(|c| c.label == "$x" && c.category == CandidateCategory::Variable)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_error_tree_shapes_fall_through_quietly() {
        for text in ["", "}", ";;;", "match $x is", "define entity", "(((", "end;"] {
            for pos in 0..=text.len() {
                let parsed = parse(text);
                // Must not panic; any answer is acceptable
                let _ = complete(parsed.tree(), text, pos);
            }
        }
    }

    #[test]
    fn test_matched_rule_without_candidates_is_none() {
        // Variables and labels are the only candidates after `match`
        assert!(complete_at_end("match ").is_none());
        assert!(complete_at_end("match $x isa person; match ").is_some());
    }

    #[test]
    fn test_empty_document_has_no_suggestions() {
        assert!(complete_at_end("").is_none());
    }

    #[test]
    fn test_continuation_pattern() {
        let pattern = ContinuationPattern::identifier();
        assert!(pattern.is_match("first-na"));
        assert!(pattern.is_match("$x_1"));
        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("a b"));
        assert!(!pattern.is_match("x;"));
    }

    #[test]
    fn test_result_serializes() {
        let result = complete_at_end("match $x").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["replaceFrom"], 6);
        assert_eq!(json["continuation"], r"^[A-Za-z0-9_\-$]*$");
        assert_eq!(json["candidates"][0]["category"], "variable");
    }
}
