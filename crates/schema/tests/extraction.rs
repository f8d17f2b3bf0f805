// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use serde_json::json;
use typeql_grammar::parse;
use typeql_lsp_schema::{extract_schema, schema_from_source};
use typeql_lsp_test_utils::TypeqlFixtures;

#[test]
fn test_social_schema() {
    let schema = schema_from_source(TypeqlFixtures::social_schema());

    let object_types: Vec<&str> = schema.object_types.keys().map(String::as_str).collect();
    assert_eq!(object_types, vec!["person", "friendship"]);
    let attributes: Vec<&str> = schema.attributes.keys().map(String::as_str).collect();
    assert_eq!(attributes, vec!["name", "age", "since"]);

    assert_eq!(schema.owns("person"), ["name", "age"]);
    assert_eq!(schema.plays("person"), ["friendship:friend"]);
    assert_eq!(schema.relates("friendship"), ["friend"]);
    assert_eq!(schema.owns("friendship"), ["since"]);
    assert_eq!(schema.owners("since"), ["friendship"]);
    assert_eq!(
        schema.attribute_type("age").unwrap().value_type.as_deref(),
        Some("integer")
    );
}

#[test]
fn test_relation_hierarchy() {
    let schema = schema_from_source(TypeqlFixtures::relation_hierarchy());
    assert_eq!(schema.supertype("friendship"), Some("relationship"));
    assert_eq!(schema.relates("friendship"), ["friend"]);
    assert!(schema.object_type("relationship").is_none());
}

#[test]
fn test_data_queries_contribute_nothing() {
    let schema = schema_from_source(TypeqlFixtures::match_insert_pipeline());
    assert!(schema.is_empty());

    let schema = schema_from_source(TypeqlFixtures::function_definition());
    assert!(schema.is_empty());
}

#[test]
fn test_schema_next_to_data_queries() {
    let text = TypeqlFixtures::schema_then_data();
    let parsed = parse(text);
    let schema = extract_schema(parsed.tree(), text);
    let labels: Vec<&str> = schema.labels().collect();
    assert_eq!(labels, vec!["person", "friendship"]);
}

#[test]
fn test_serializes_as_camel_case_json() {
    let schema = schema_from_source(
        "define entity person, owns name; attribute name, value string;",
    );
    let value = serde_json::to_value(&schema).unwrap();
    assert_eq!(
        value,
        json!({
            "objectTypes": {
                "person": { "owns": ["name"], "plays": [], "relates": [] }
            },
            "attributes": {
                "name": { "valueType": "string", "owners": ["person"] }
            }
        })
    );
}
