// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema extraction
//!
//! Walks the `Definable` nodes of `define` and `redefine` queries. `undefine`
//! queries are skipped. A definable without a root kind (`person owns email;`)
//! extends an attribute type if one with that label is already known, and an
//! object type otherwise.

use crate::schema::{AttributeType, ObjectType, Schema};
use tracing::debug;
use typeql_grammar::{NodeKind, SyntaxNode, SyntaxTree, parse};

/// Extract the schema declared in a parsed document
pub fn extract_schema(tree: &SyntaxTree, text: &str) -> Schema {
    let mut builder = SchemaBuilder::default();
    for query in tree.iter().filter(|n| n.kind() == NodeKind::QuerySchema) {
        let defines = query
            .first_child()
            .is_some_and(|k| matches!(k.kind(), NodeKind::DEFINE | NodeKind::REDEFINE));
        if !defines {
            continue;
        }
        for definable in query.children().filter(|n| n.kind() == NodeKind::Definable) {
            builder.record_definable(definable, text);
        }
    }

    let schema = builder.build();
    debug!(
        object_types = schema.object_types.len(),
        attributes = schema.attributes.len(),
        "Extracted schema"
    );
    schema
}

/// Parse `source` and extract its schema
pub fn schema_from_source(source: &str) -> Schema {
    let parsed = parse(source);
    extract_schema(parsed.tree(), source)
}

/// Incremental schema construction with de-duplicated edges
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn object_type(&mut self, label: &str) -> &mut ObjectType {
        self.schema.object_types.entry(label.to_string()).or_default()
    }

    pub fn attribute_type(&mut self, label: &str) -> &mut AttributeType {
        self.schema.attributes.entry(label.to_string()).or_default()
    }

    /// Record `owner owns attribute` on both ends
    pub fn record_owns(&mut self, owner: &str, attribute: &str) {
        push_unique(&mut self.object_type(owner).owns, attribute);
        push_unique(&mut self.attribute_type(attribute).owners, owner);
    }

    pub fn record_plays(&mut self, player: &str, role: &str) {
        push_unique(&mut self.object_type(player).plays, role);
    }

    pub fn record_relates(&mut self, relation: &str, role: &str) {
        push_unique(&mut self.object_type(relation).relates, role);
    }

    pub fn build(self) -> Schema {
        self.schema
    }

    fn record_definable(&mut self, definable: SyntaxNode<'_>, text: &str) {
        let Some(label) = definable.find_child(NodeKind::LABEL).map(|n| n.text(text)) else {
            return;
        };
        let is_attribute = match definable.find_child(NodeKind::KIND).map(|n| n.text(text)) {
            Some(kind) => kind == "attribute",
            None => self.schema.attributes.contains_key(label),
        };
        if is_attribute {
            self.attribute_type(label);
        } else {
            self.object_type(label);
        }

        for constraint in definable
            .children()
            .filter(|n| n.kind() == NodeKind::TypeConstraint)
        {
            let Some(keyword) = constraint.first_child() else {
                continue;
            };
            let Some(target) = constraint
                .find_child(NodeKind::TypeRef)
                .map(|t| type_ref_label(t, text))
            else {
                continue;
            };

            match (keyword.kind(), is_attribute) {
                (NodeKind::SUB, true) => self.attribute_type(label).sub = Some(target),
                (NodeKind::SUB, false) => self.object_type(label).sub = Some(target),
                (NodeKind::VALUE, true) => self.attribute_type(label).value_type = Some(target),
                (NodeKind::OWNS, false) => self.record_owns(label, &target),
                (NodeKind::PLAYS, false) => self.record_plays(label, &target),
                (NodeKind::RELATES, false) => self.record_relates(label, &target),
                (kind, _) => debug!(%kind, label, "Ignoring constraint on this type"),
            }
        }
    }
}

/// Label of a type reference, scoped references joined with `:`
fn type_ref_label(type_ref: SyntaxNode<'_>, text: &str) -> String {
    type_ref
        .children()
        .filter(|n| matches!(n.kind(), NodeKind::LABEL | NodeKind::KIND))
        .map(|n| n.text(text))
        .collect::<Vec<_>>()
        .join(":")
}

fn push_unique(edges: &mut Vec<String>, label: &str) {
    if !edges.iter().any(|e| e == label) {
        edges.push(label.to_string());
    }
}
