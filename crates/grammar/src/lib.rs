// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! TypeQL Grammar
//!
//! This crate provides an error-tolerant tokenizer and parser for TypeQL and the
//! concrete syntax tree they produce.
//!
//! ## Usage
//!
//! ```rust
//! use typeql_grammar::{NodeKind, parse};
//!
//! let parsed = parse("match $x isa person;");
//! let tree = parsed.tree();
//! assert!(tree.iter().any(|node| node.kind() == NodeKind::StatementThing));
//! assert!(parsed.errors().is_empty());
//! ```
//!
//! Partial input always yields a tree: unexpected tokens are wrapped in
//! [`NodeKind::Error`] nodes and missing ones become zero-width `Error` nodes.

pub mod kind;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use kind::NodeKind;
pub use lexer::{Token, is_identifier_byte, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use tree::{NodeId, Preorder, SyntaxNode, SyntaxTree, TreeBuilder};
