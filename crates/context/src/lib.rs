// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # TypeQL LSP - Completion Context Layer
//!
//! This crate decides what to suggest at a cursor position in a TypeQL document.
//!
//! ## Overview
//!
//! Completion works on the error-tolerant syntax tree from `typeql-grammar`:
//!
//! 1. [`cst_utils::resolve_inner`] finds the innermost node at the cursor.
//! 2. The climber in [`completion`] walks its ancestors, collecting the kinds of
//!    the nodes typed before the cursor into a prefix.
//! 3. At each level the [`dispatch::DISPATCH_TABLE`] is consulted; the first rule
//!    whose suffix matches the tail of the prefix picks the generators.
//! 4. The [`suggestions::Generator`]s scan the document for labels and variables
//!    or emit fixed [`keywords`].
//!
//! Every call is stateless and synchronous.
//!
//! ## Examples
//!
//! ```rust
//! use typeql_grammar::parse;
//! use typeql_lsp_context::{CandidateCategory, complete};
//!
//! let text = "define entity person; relation friendship;\nmatch $x isa ";
//! let parsed = parse(text);
//! let result = complete(parsed.tree(), text, text.len()).unwrap();
//!
//! assert_eq!(result.replace_from, text.len());
//! assert!(result
//!     .candidates
//!     .iter()
//!     .any(|c| c.label == "person" && c.category == CandidateCategory::Type));
//! ```

pub mod completion;
pub mod cst_utils;
pub mod dispatch;
pub mod keywords;
pub mod suggestions;

// Re-export commonly used types
pub use completion::{CompletionResult, ContinuationPattern, complete};
pub use cst_utils::{
    collect_preceding_children_of, collect_preceding_siblings, resolve_inner, word_start,
};
pub use dispatch::{DISPATCH_TABLE, DispatchEntry, DispatchRule, Refined, SuffixPattern};
pub use keywords::KeywordSet;
pub use suggestions::{CandidateCategory, CompletionCandidate, Generator};
