// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for typeql-lsp
//!
//! This crate provides common testing components including:
//! - A text-based completion case format with `|` cursor markers
//! - Validation of completion results against those cases
//! - Completion-specific assertions
//! - Sample TypeQL documents

pub mod assertions;
pub mod fixtures;
pub mod test_case_parser;
pub mod test_case_validator;

// Re-exports for convenience
pub use assertions::CompletionAssertions;
pub use fixtures::TypeqlFixtures;
pub use test_case_parser::{ExpectedItem, MatchMode, TestCase, parse_test_content, parse_test_file};
pub use test_case_validator::{
    ActualItem, ValidationError, get_cursor_position, remove_cursor_marker, split_cursor,
    validate_completion,
};
