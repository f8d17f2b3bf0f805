// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! End-to-end completion behaviour on typed-out documents

use typeql_grammar::parse;
use typeql_lsp_context::{CandidateCategory, CompletionResult, complete};
use typeql_lsp_test_utils::{CompletionAssertions, TypeqlFixtures, split_cursor};

/// Complete at the `|` marker
fn complete_marked(input: &str) -> Option<CompletionResult> {
    let (text, pos) = split_cursor(input).expect("input has a cursor marker");
    let parsed = parse(&text);
    complete(parsed.tree(), &text, pos)
}

fn labels(result: &CompletionResult) -> Vec<&str> {
    result.candidates.iter().map(|c| c.label.as_str()).collect()
}

const THING_KEYWORDS: [&str; 3] = ["isa", "has", "links"];
const TYPE_KEYWORDS: [&str; 4] = ["sub", "owns", "relates", "plays"];

#[test]
fn test_fresh_match_offers_variables_and_labels() {
    let result = complete_marked("match $p isa person; match |").unwrap();
    let items = labels(&result);
    CompletionAssertions::assert_exact(&items, &["$p", "person"]);

    let var = &result.candidates[0];
    assert_eq!(var.category, CandidateCategory::Variable);
    assert_eq!(var.boost, 10);
    assert!(
        result
            .candidates
            .iter()
            .all(|c| c.category != CandidateCategory::Keyword)
    );
}

#[test]
fn test_after_subject_offers_both_constraint_families() {
    let result = complete_marked("match $x |").unwrap();
    let mut expected = THING_KEYWORDS.to_vec();
    expected.extend(TYPE_KEYWORDS);
    CompletionAssertions::assert_exact(&labels(&result), &expected);
    assert_eq!(result.replace_from, 9);
}

#[test]
fn test_after_isa_offers_declared_types_and_demoted_variables() {
    let input = format!("{}|", TypeqlFixtures::schema_then_data());
    let result = complete_marked(&input).unwrap();
    let items = labels(&result);
    CompletionAssertions::assert_contains(&items, &["person", "friendship", "$x"]);
    CompletionAssertions::assert_excludes(&items, &THING_KEYWORDS);
    CompletionAssertions::assert_excludes(&items, &TYPE_KEYWORDS);

    let x = result.candidates.iter().find(|c| c.label == "$x").unwrap();
    assert_eq!(x.boost, -10);
    let person = result.candidates.iter().find(|c| c.label == "person").unwrap();
    assert_eq!(person.category, CandidateCategory::Type);
}

#[test]
fn test_after_definition_comma_offers_type_constraints_only() {
    let result = complete_marked("define relation friendship sub relationship, |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &TYPE_KEYWORDS);
    assert!(
        result
            .candidates
            .iter()
            .all(|c| c.category == CandidateCategory::TypeConstraint)
    );
}

#[test]
fn test_inside_assignment_expression_offers_nothing() {
    assert!(complete_marked("match let $y = foo() * (|$x + 1);").is_none());
    assert!(complete_marked("match let $y = foo() * ($x + |1);").is_none());
    assert!(complete_marked("match let $y = |").is_none());
}

#[test]
fn test_replace_span_covers_typed_word() {
    let result = complete_marked("match $x|").unwrap();
    assert_eq!(result.replace_from, 6);

    let result = complete_marked("define entity person; match $p isa per|").unwrap();
    assert_eq!(result.replace_from, 35);
    assert!(result.continuation.is_match("per"));
}

#[test]
fn test_completion_is_deterministic() {
    let input = "define entity person; relation friendship;\nmatch $x isa person; $y |";
    let first = complete_marked(input);
    for _ in 0..5 {
        assert_eq!(complete_marked(input), first);
    }
}

#[test]
fn test_typing_a_keyword_completes_keywords() {
    let result = complete_marked("match $x is|").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["isa", "sub"]);
    assert_eq!(result.replace_from, 9);

    let result = complete_marked("match $x isa person, ha|").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &THING_KEYWORDS);
}

#[test]
fn test_thing_statement_contexts() {
    let result = complete_marked("match $x isa person, |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &THING_KEYWORDS);

    let result = complete_marked("match $x isa person, has name |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &["$x"]);

    let result = complete_marked("insert $x |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &THING_KEYWORDS);
}

#[test]
fn test_type_statement_contexts() {
    let result = complete_marked("define entity person; match $t sub |").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["person", "$t"]);

    let result = complete_marked("match person |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &TYPE_KEYWORDS);
}

#[test]
fn test_relation_tuples() {
    let result = complete_marked("define relation friendship, relates friend; match $r links (|").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["friend", "$r"]);

    let result = complete_marked("match $a isa person; $r links (friend: |").unwrap();
    let items = labels(&result);
    CompletionAssertions::assert_exact(&items, &["$a", "$r"]);
}

#[test]
fn test_pipeline_continuation() {
    let result = complete_marked("match $x isa person; |").unwrap();
    let items = labels(&result);
    CompletionAssertions::assert_contains(&items, &["$x", "not {};", "insert", "select", "end"]);
    CompletionAssertions::assert_ordered_before(&items, "$x", "insert");

    let result = complete_marked("match $x isa person; select $x; |").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["limit", "sort"]);

    let result = complete_marked("match $x isa person; select |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &["$x"]);
}

#[test]
fn test_nested_blocks() {
    let result = complete_marked("match $x isa person; not { |").unwrap();
    let items = labels(&result);
    CompletionAssertions::assert_contains(&items, &["$x", "try {};"]);
    CompletionAssertions::assert_excludes(&items, &["insert"]);
}

#[test]
fn test_schema_queries() {
    let result = complete_marked("define |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &["entity", "attribute", "relation"]);
    assert!(result.candidates.iter().all(|c| c.boost == 2));

    let result = complete_marked("define entity person; |").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["person", "entity"]);

    let result = complete_marked("define person |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &TYPE_KEYWORDS);

    let result = complete_marked("define entity person, owns |").unwrap();
    CompletionAssertions::assert_exact(&labels(&result), &["person"]);
}

#[test]
fn test_between_queries() {
    let result = complete_marked("match $x isa person; end; |").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["match", "define"]);

    let result = complete_marked("define entity person; | end;").unwrap();
    CompletionAssertions::assert_contains(&labels(&result), &["person", "entity"]);
}

#[test]
fn test_positions_in_larger_documents() {
    let text = TypeqlFixtures::match_insert_pipeline();
    let parsed = parse(text);
    // Every offset resolves without panicking and never offers an empty list
    for pos in 0..=text.len() {
        if let Some(result) = complete(parsed.tree(), text, pos) {
            assert!(!result.candidates.is_empty());
            assert!(result.replace_from <= pos);
        }
    }
}

#[test]
fn test_deeply_nested_input_completes_without_overflow() {
    let blocks = format!("match {}", "{ ".repeat(50_000));
    let parens = format!("match let $y = {}", "(".repeat(50_000));
    for text in [blocks, parens] {
        let parsed = parse(&text);
        for pos in [text.len(), text.len() - 1, 6] {
            if let Some(result) = complete(parsed.tree(), &text, pos) {
                assert!(!result.candidates.is_empty());
            }
        }
    }
}
