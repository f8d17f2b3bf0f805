// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Suggestion generators
//!
//! Generators turn a document into candidates. They see only the tree and its
//! text, never the dispatch table or the collected prefix, and they answer
//! `None` when they have nothing to offer.

use crate::keywords::KeywordSet;
use serde::Serialize;
use std::collections::HashSet;
use typeql_grammar::{NodeKind, SyntaxTree};

/// What a candidate completes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateCategory {
    /// A type label declared or referenced in the document
    Type,
    Variable,
    ThingConstraint,
    TypeConstraint,
    Keyword,
    /// Root kind such as `entity`
    Kind,
    /// Nested pattern template
    Method,
}

impl CandidateCategory {
    /// Serialized name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateCategory::Type => "type",
            CandidateCategory::Variable => "variable",
            CandidateCategory::ThingConstraint => "thingConstraint",
            CandidateCategory::TypeConstraint => "typeConstraint",
            CandidateCategory::Keyword => "keyword",
            CandidateCategory::Kind => "kind",
            CandidateCategory::Method => "method",
        }
    }
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCandidate {
    pub label: String,
    pub category: CandidateCategory,
    pub insert_text: String,
    pub info: Option<String>,
    /// Ranking weight, higher ranks first
    pub boost: i32,
}

impl CompletionCandidate {
    pub fn new(label: impl Into<String>, category: CandidateCategory, boost: i32) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            category,
            info: None,
            boost,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

/// Candidate generator selected by a dispatch rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Every distinct label in the document
    Labels,
    /// Every distinct variable in the document
    Variables { boost: i32 },
    /// A fixed keyword list
    Keywords(&'static KeywordSet),
}

impl Generator {
    pub fn generate(&self, tree: &SyntaxTree, text: &str) -> Option<Vec<CompletionCandidate>> {
        match self {
            Generator::Labels => {
                let labels = distinct_token_texts(tree, text, NodeKind::LABEL);
                non_empty(
                    labels
                        .into_iter()
                        .map(|label| CompletionCandidate::new(label, CandidateCategory::Type, 0))
                        .collect(),
                )
            }
            Generator::Variables { boost } => {
                let variables = distinct_token_texts(tree, text, NodeKind::VAR);
                non_empty(
                    variables
                        .into_iter()
                        // A lone `$` is a variable still being typed
                        .filter(|var| var.len() > 1)
                        .map(|var| CompletionCandidate::new(var, CandidateCategory::Variable, *boost))
                        .collect(),
                )
            }
            Generator::Keywords(set) => Some(
                set.keywords
                    .iter()
                    .map(|kw| CompletionCandidate::new(*kw, set.category, set.boost).with_info(set.info))
                    .collect(),
            ),
        }
    }
}

fn non_empty(candidates: Vec<CompletionCandidate>) -> Option<Vec<CompletionCandidate>> {
    (!candidates.is_empty()).then_some(candidates)
}

/// Texts of all tokens of `kind`, first occurrence order, without repeats
fn distinct_token_texts<'s>(tree: &SyntaxTree, text: &'s str, kind: NodeKind) -> Vec<&'s str> {
    let mut seen = HashSet::new();
    tree.iter()
        .filter(|node| node.kind() == kind)
        .map(|node| node.text(text))
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .collect()
}
