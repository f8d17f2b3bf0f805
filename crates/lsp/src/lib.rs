// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # TypeQL LSP - Host Layer
//!
//! Adapts the completion core to Language Server Protocol types.
//!
//! ## Overview
//!
//! ```text
//! text + Position ──► offset ──► parse ──► complete ──► CompletionItem[]
//!                                  │
//!                                  ├──► SyntaxError[] ──► Diagnostic[]
//!                                  └──► Schema
//! ```
//!
//! - [`CompletionEngine`]: request entry points, configured by [`EngineConfig`]
//! - [`CompletionRenderer`]: ranking, item kinds, text edits and snippets
//! - [`diagnostic`]: syntax errors as LSP diagnostics
//! - [`position`]: UTF-16 LSP positions to byte offsets and back
//!
//! ## Usage
//!
//! ```rust
//! use lsp_types::Position;
//! use typeql_lsp::{CompletionEngine, EngineConfig};
//!
//! let engine = CompletionEngine::new(EngineConfig::default());
//! let items = engine
//!     .completion("match $x isa person; match ", Position::new(0, 27))
//!     .unwrap();
//! assert_eq!(items[0].label, "$x");
//! ```

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod position;
pub mod render;

pub use config::{ConfigError, EngineConfig};
pub use diagnostic::{DiagnosticCode, TypeqlDiagnostic, collect_diagnostics};
pub use engine::CompletionEngine;
pub use error::CompletionError;
pub use position::{offset_to_position, position_to_offset, span_to_range};
pub use render::{CompletionRenderer, item_kind, snippet_template};
