// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # TypeQL LSP - Schema
//!
//! Builds a lightweight [`Schema`] from the `define` and `redefine` queries of
//! a TypeQL document: object types with their `owns`, `plays`, `relates` and
//! `sub` edges, and attribute types with their value type and owners.
//!
//! Extraction works on the error-tolerant syntax tree, so half-typed schemas
//! still yield whatever was declared completely. Edges keep the order they
//! first appear in and are never duplicated.
//!
//! ## Examples
//!
//! ```rust
//! use typeql_lsp_schema::schema_from_source;
//!
//! let schema = schema_from_source(
//!     "define entity person, owns name; attribute name, value string;",
//! );
//! assert_eq!(schema.owns("person"), ["name"]);
//! assert_eq!(schema.owners("name"), ["person"]);
//! ```

pub mod extract;
pub mod schema;

pub use extract::{SchemaBuilder, extract_schema, schema_from_source};
pub use schema::{AttributeType, ObjectType, Schema};
