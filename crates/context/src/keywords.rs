// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # TypeQL Keywords for Completion
//!
//! Fixed keyword lists grouped by the context they complete in. Each set carries
//! the category, description and boost its candidates are emitted with.

use crate::suggestions::CandidateCategory;

/// Keyword set for a specific context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    /// Keyword texts in presentation order
    pub keywords: &'static [&'static str],
    pub category: CandidateCategory,
    /// Description attached to every candidate
    pub info: &'static str,
    pub boost: i32,
}

impl KeywordSet {
    /// Whether `word` belongs to this set
    pub fn contains(&self, word: &str) -> bool {
        self.keywords.contains(&word)
    }
}

/// Constraints on instances: `$x isa person, has name $n`
pub static THING_CONSTRAINTS: KeywordSet = KeywordSet {
    keywords: &["isa", "has", "links"],
    category: CandidateCategory::ThingConstraint,
    info: "Thing constraint keyword",
    boost: 0,
};

/// Constraints on types: `$t sub entity, owns name`
pub static TYPE_CONSTRAINTS: KeywordSet = KeywordSet {
    keywords: &["sub", "owns", "relates", "plays"],
    category: CandidateCategory::TypeConstraint,
    info: "Type constraint keyword",
    boost: 0,
};

/// Keywords opening a pipeline stage
pub static PIPELINE_STAGES: KeywordSet = KeywordSet {
    keywords: &[
        "match", "insert", "delete", "update", "put", "select", "reduce", "sort", "limit",
        "offset", "end",
    ],
    category: CandidateCategory::Keyword,
    info: "Pipeline stage",
    boost: 1,
};

/// Keywords opening a schema query
pub static SCHEMA_QUERIES: KeywordSet = KeywordSet {
    keywords: &["define", "redefine", "undefine"],
    category: CandidateCategory::Keyword,
    info: "Schema query",
    boost: 1,
};

/// Root kinds a type can be defined as
pub static KINDS: KeywordSet = KeywordSet {
    keywords: &["entity", "attribute", "relation"],
    category: CandidateCategory::Kind,
    info: "Root type",
    boost: 2,
};

/// Templates for patterns nested inside a block
pub static NESTED_PATTERNS: KeywordSet = KeywordSet {
    keywords: &["not {};", "{} or {};", "try {};"],
    category: CandidateCategory::Method,
    info: "Nested pattern",
    boost: 2,
};
