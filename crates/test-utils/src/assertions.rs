// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion-specific test helpers and custom assertions

/// Custom assertion helpers for completion testing
///
/// The helpers take plain labels so they work on engine candidates and on
/// rendered editor items alike.
pub struct CompletionAssertions;

impl CompletionAssertions {
    /// Assert that every expected label is offered
    pub fn assert_contains(labels: &[&str], expected: &[&str]) {
        for label in expected {
            assert!(
                labels.contains(label),
                "Expected '{}' among completions {:?}",
                label,
                labels
            );
        }
    }

    /// Assert that none of the given labels is offered
    pub fn assert_excludes(labels: &[&str], excluded: &[&str]) {
        for label in excluded {
            assert!(
                !labels.contains(label),
                "Did not expect '{}' among completions {:?}",
                label,
                labels
            );
        }
    }

    /// Assert that exactly the expected labels are offered, ignoring order
    pub fn assert_exact(labels: &[&str], expected: &[&str]) {
        let mut actual = labels.to_vec();
        let mut expected = expected.to_vec();
        actual.sort_unstable();
        expected.sort_unstable();
        assert_eq!(actual, expected, "Completion labels mismatch");
    }

    /// Assert that `first` is listed before `second`
    pub fn assert_ordered_before(labels: &[&str], first: &str, second: &str) {
        let position = |label: &str| {
            labels
                .iter()
                .position(|l| *l == label)
                .unwrap_or_else(|| panic!("'{}' not among completions {:?}", label, labels))
        };
        assert!(
            position(first) < position(second),
            "Expected '{}' before '{}' in {:?}",
            first,
            second,
            labels
        );
    }
}
