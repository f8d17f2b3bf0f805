// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample TypeQL documents

/// Sample TypeQL documents for testing
pub struct TypeqlFixtures;

impl TypeqlFixtures {
    // ===== Schema queries =====

    /// Social network schema with entities, a relation and attributes
    pub const fn social_schema() -> &'static str {
        "define
entity person, owns name, owns age, plays friendship:friend;
relation friendship, relates friend, owns since;
attribute name, value string;
attribute age, value integer;
attribute since, value datetime;
end;"
    }

    /// Schema extending a relation type
    pub const fn relation_hierarchy() -> &'static str {
        "define\nrelation friendship sub relationship, relates friend; end;"
    }

    /// Schema defining a function over a match stage
    pub const fn function_definition() -> &'static str {
        "define
fun foo($x: integer) -> integer:
match let $y = foo() * ($x + 1);
return first $y;
end;"
    }

    // ===== Data pipelines =====

    /// Match, disjunction and insert in one pipeline
    pub const fn match_insert_pipeline() -> &'static str {
        "match $x isa person; { $x has name $name; } or { $r links (friend: $x); }; insert $x has name \"Steve\"; end;"
    }

    /// Match followed by stream modifiers
    pub const fn modifier_pipeline() -> &'static str {
        "match $x isa person, has age $a; sort $a desc; limit 10; offset 5; select $x;"
    }

    /// Schema and data queries in one document
    pub const fn schema_then_data() -> &'static str {
        "define entity person; relation friendship;\nmatch $x isa "
    }
}
