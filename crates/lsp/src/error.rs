// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion error types

use lsp_types::Position;

/// Errors that can occur during a completion request
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Position past the last line of the document
    #[error("Invalid position: {0:?}")]
    InvalidPosition(Position),

    /// Byte offset outside the document or inside a character
    #[error("Invalid offset {offset} for a document of {len} bytes")]
    InvalidOffset { offset: usize, len: usize },
}

impl CompletionError {
    /// Check if this error should result in an empty completion list
    /// (vs. propagating the error to the client)
    pub fn should_return_empty(&self) -> bool {
        matches!(self, CompletionError::InvalidPosition(_))
    }
}
