// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Schema types

use indexmap::IndexMap;
use serde::Serialize;

/// Entity or relation type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Owned attribute types
    pub owns: Vec<String>,
    /// Played roles, scoped as `relation:role`
    pub plays: Vec<String>,
    /// Related roles
    pub relates: Vec<String>,
}

/// Attribute type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Object types that own this attribute
    pub owners: Vec<String>,
}

/// Types declared in a document, keyed by label in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub object_types: IndexMap<String, ObjectType>,
    pub attributes: IndexMap<String, AttributeType>,
}

impl Schema {
    pub fn object_type(&self, label: &str) -> Option<&ObjectType> {
        self.object_types.get(label)
    }

    pub fn attribute_type(&self, label: &str) -> Option<&AttributeType> {
        self.attributes.get(label)
    }

    /// Attribute types owned by `label`, empty for unknown types
    pub fn owns(&self, label: &str) -> &[String] {
        self.object_type(label).map_or(&[], |t| t.owns.as_slice())
    }

    pub fn plays(&self, label: &str) -> &[String] {
        self.object_type(label).map_or(&[], |t| t.plays.as_slice())
    }

    pub fn relates(&self, label: &str) -> &[String] {
        self.object_type(label).map_or(&[], |t| t.relates.as_slice())
    }

    /// Object types owning the attribute `label`
    pub fn owners(&self, label: &str) -> &[String] {
        self.attribute_type(label).map_or(&[], |t| t.owners.as_slice())
    }

    /// Declared supertype of an object or attribute type
    pub fn supertype(&self, label: &str) -> Option<&str> {
        self.object_type(label)
            .and_then(|t| t.sub.as_deref())
            .or_else(|| self.attribute_type(label).and_then(|t| t.sub.as_deref()))
    }

    /// Every declared label, object types first
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.object_types
            .keys()
            .chain(self.attributes.keys())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.object_types.is_empty() && self.attributes.is_empty()
    }
}
