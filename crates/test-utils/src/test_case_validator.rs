// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test case validation logic
//!
//! This module checks completion results against expected test case outcomes.

use crate::test_case_parser::{ExpectedItem, MatchMode, TestCase};
use thiserror::Error;

/// A completion candidate as seen by the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualItem {
    pub label: String,
    pub category: String,
}

impl ActualItem {
    pub fn new(label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: category.into(),
        }
    }
}

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Expected completions but got none")]
    NoCompletions,

    #[error("Expected no completions, got {0:?}")]
    UnexpectedCompletions(Vec<String>),

    #[error("Item not found: {label} [{category}]")]
    ItemNotFound { label: String, category: String },

    #[error("Item not found: {0}")]
    ItemNotFoundSimple(String),

    #[error("Excluded item offered: {0}")]
    ExcludedItem(String),

    #[error("Unexpected items in exact match: {0:?}")]
    ExtraItems(Vec<String>),
}

/// Validate a completion result against a test case
///
/// `actual` is `None` when the engine offered nothing.
pub fn validate_completion(
    actual: Option<&[ActualItem]>,
    expected_case: &TestCase,
) -> Result<(), ValidationError> {
    let items = match (expected_case.mode, actual) {
        (MatchMode::Empty, None) => return Ok(()),
        (MatchMode::Empty, Some(items)) => {
            return Err(ValidationError::UnexpectedCompletions(
                items.iter().map(|i| i.label.clone()).collect(),
            ));
        }
        (_, None) => return Err(ValidationError::NoCompletions),
        (_, Some(items)) => items,
    };

    for expected in &expected_case.expected {
        match expected {
            ExpectedItem::Full { label, category } => {
                if !items
                    .iter()
                    .any(|i| i.label == *label && i.category == *category)
                {
                    return Err(ValidationError::ItemNotFound {
                        label: label.clone(),
                        category: category.clone(),
                    });
                }
            }
            ExpectedItem::Simple(label) => {
                if !items.iter().any(|i| i.label == *label) {
                    return Err(ValidationError::ItemNotFoundSimple(label.clone()));
                }
            }
        }
    }

    if let Some(excluded) = expected_case
        .excluded
        .iter()
        .find(|label| items.iter().any(|i| i.label == **label))
    {
        return Err(ValidationError::ExcludedItem(excluded.clone()));
    }

    if expected_case.mode == MatchMode::Exact {
        let extra: Vec<String> = items
            .iter()
            .filter(|i| !expected_case.expected.iter().any(|e| e.label() == i.label))
            .map(|i| i.label.clone())
            .collect();
        if !extra.is_empty() {
            return Err(ValidationError::ExtraItems(extra));
        }
    }

    Ok(())
}

/// Byte offset of the cursor marker
pub fn get_cursor_position(input: &str) -> Option<usize> {
    input.find('|')
}

pub fn remove_cursor_marker(input: &str) -> String {
    input.replacen('|', "", 1)
}

/// Document text without the marker, and the cursor offset
pub fn split_cursor(input: &str) -> Option<(String, usize)> {
    let pos = get_cursor_position(input)?;
    Some((remove_cursor_marker(input), pos))
}
