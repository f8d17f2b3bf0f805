// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Node kinds
//!
//! Every node in a TypeQL syntax tree carries a [`NodeKind`]. Terminal tokens use
//! upper-case names (`VAR`, `ISA`, `SEMICOLON`), productions use camel-case names
//! (`Statement`, `ClauseMatch`). The names are stable and are what completion
//! dispatch is keyed on.

use serde::Serialize;
use std::fmt;

/// Grammar node kind
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    // Identifiers and literals
    VAR,
    LABEL,
    KIND,
    STRINGLITERAL,
    NUMBERLITERAL,

    // Pipeline stage keywords
    MATCH,
    INSERT,
    DELETE,
    UPDATE,
    PUT,
    SELECT,
    REDUCE,
    SORT,
    LIMIT,
    OFFSET,
    END,

    // Schema keywords
    DEFINE,
    REDEFINE,
    UNDEFINE,
    FUN,
    RETURN,

    // Constraint keywords
    ISA,
    HAS,
    LINKS,
    SUB,
    OWNS,
    RELATES,
    PLAYS,
    VALUE,

    // Pattern keywords
    LET,
    NOT,
    OR,
    TRY,
    ASC,
    DESC,

    // Punctuation
    COMMA,
    SEMICOLON,
    COLON,
    LPAREN,
    RPAREN,
    LBRACE,
    RBRACE,
    ASSIGN,
    ARROW,
    OP,

    // Productions
    Source,
    Query,
    QuerySchema,
    QueryPipelinePreambled,
    ClauseMatch,
    ClauseInsert,
    ClauseDelete,
    ClauseUpdate,
    ClausePut,
    StageSelect,
    StageSort,
    StageLimit,
    StageOffset,
    StageReduce,
    Definable,
    TypeConstraint,
    Function,
    FunctionParams,
    FunctionReturn,
    Statement,
    StatementThing,
    StatementType,
    StatementAssignment,
    Relation,
    RolePlayer,
    TypeRef,
    PatternNegation,
    PatternDisjunction,
    PatternConjunction,
    PatternTry,
    Expression,
    FunctionCall,

    /// Input the parser could not place, or a required token that is missing
    Error,
}

impl NodeKind {
    /// Stable name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::VAR => "VAR",
            NodeKind::LABEL => "LABEL",
            NodeKind::KIND => "KIND",
            NodeKind::STRINGLITERAL => "STRINGLITERAL",
            NodeKind::NUMBERLITERAL => "NUMBERLITERAL",
            NodeKind::MATCH => "MATCH",
            NodeKind::INSERT => "INSERT",
            NodeKind::DELETE => "DELETE",
            NodeKind::UPDATE => "UPDATE",
            NodeKind::PUT => "PUT",
            NodeKind::SELECT => "SELECT",
            NodeKind::REDUCE => "REDUCE",
            NodeKind::SORT => "SORT",
            NodeKind::LIMIT => "LIMIT",
            NodeKind::OFFSET => "OFFSET",
            NodeKind::END => "END",
            NodeKind::DEFINE => "DEFINE",
            NodeKind::REDEFINE => "REDEFINE",
            NodeKind::UNDEFINE => "UNDEFINE",
            NodeKind::FUN => "FUN",
            NodeKind::RETURN => "RETURN",
            NodeKind::ISA => "ISA",
            NodeKind::HAS => "HAS",
            NodeKind::LINKS => "LINKS",
            NodeKind::SUB => "SUB",
            NodeKind::OWNS => "OWNS",
            NodeKind::RELATES => "RELATES",
            NodeKind::PLAYS => "PLAYS",
            NodeKind::VALUE => "VALUE",
            NodeKind::LET => "LET",
            NodeKind::NOT => "NOT",
            NodeKind::OR => "OR",
            NodeKind::TRY => "TRY",
            NodeKind::ASC => "ASC",
            NodeKind::DESC => "DESC",
            NodeKind::COMMA => "COMMA",
            NodeKind::SEMICOLON => "SEMICOLON",
            NodeKind::COLON => "COLON",
            NodeKind::LPAREN => "LPAREN",
            NodeKind::RPAREN => "RPAREN",
            NodeKind::LBRACE => "LBRACE",
            NodeKind::RBRACE => "RBRACE",
            NodeKind::ASSIGN => "ASSIGN",
            NodeKind::ARROW => "ARROW",
            NodeKind::OP => "OP",
            NodeKind::Source => "Source",
            NodeKind::Query => "Query",
            NodeKind::QuerySchema => "QuerySchema",
            NodeKind::QueryPipelinePreambled => "QueryPipelinePreambled",
            NodeKind::ClauseMatch => "ClauseMatch",
            NodeKind::ClauseInsert => "ClauseInsert",
            NodeKind::ClauseDelete => "ClauseDelete",
            NodeKind::ClauseUpdate => "ClauseUpdate",
            NodeKind::ClausePut => "ClausePut",
            NodeKind::StageSelect => "StageSelect",
            NodeKind::StageSort => "StageSort",
            NodeKind::StageLimit => "StageLimit",
            NodeKind::StageOffset => "StageOffset",
            NodeKind::StageReduce => "StageReduce",
            NodeKind::Definable => "Definable",
            NodeKind::TypeConstraint => "TypeConstraint",
            NodeKind::Function => "Function",
            NodeKind::FunctionParams => "FunctionParams",
            NodeKind::FunctionReturn => "FunctionReturn",
            NodeKind::Statement => "Statement",
            NodeKind::StatementThing => "StatementThing",
            NodeKind::StatementType => "StatementType",
            NodeKind::StatementAssignment => "StatementAssignment",
            NodeKind::Relation => "Relation",
            NodeKind::RolePlayer => "RolePlayer",
            NodeKind::TypeRef => "TypeRef",
            NodeKind::PatternNegation => "PatternNegation",
            NodeKind::PatternDisjunction => "PatternDisjunction",
            NodeKind::PatternConjunction => "PatternConjunction",
            NodeKind::PatternTry => "PatternTry",
            NodeKind::Expression => "Expression",
            NodeKind::FunctionCall => "FunctionCall",
            NodeKind::Error => "Error",
        }
    }

    /// Look up the keyword kind for an identifier-shaped word
    ///
    /// Keywords are case-sensitive. Returns `None` for plain labels.
    pub fn keyword(word: &str) -> Option<NodeKind> {
        let kind = match word {
            "match" => NodeKind::MATCH,
            "insert" => NodeKind::INSERT,
            "delete" => NodeKind::DELETE,
            "update" => NodeKind::UPDATE,
            "put" => NodeKind::PUT,
            "select" => NodeKind::SELECT,
            "reduce" => NodeKind::REDUCE,
            "sort" => NodeKind::SORT,
            "limit" => NodeKind::LIMIT,
            "offset" => NodeKind::OFFSET,
            "end" => NodeKind::END,
            "define" => NodeKind::DEFINE,
            "redefine" => NodeKind::REDEFINE,
            "undefine" => NodeKind::UNDEFINE,
            "fun" => NodeKind::FUN,
            "return" => NodeKind::RETURN,
            "isa" | "isa!" => NodeKind::ISA,
            "has" => NodeKind::HAS,
            "links" => NodeKind::LINKS,
            "sub" | "sub!" => NodeKind::SUB,
            "owns" => NodeKind::OWNS,
            "relates" => NodeKind::RELATES,
            "plays" => NodeKind::PLAYS,
            "value" => NodeKind::VALUE,
            "let" => NodeKind::LET,
            "not" => NodeKind::NOT,
            "or" => NodeKind::OR,
            "try" => NodeKind::TRY,
            "asc" => NodeKind::ASC,
            "desc" => NodeKind::DESC,
            "entity" | "attribute" | "relation" => NodeKind::KIND,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind is a terminal token
    pub fn is_token(&self) -> bool {
        *self < NodeKind::Source
    }

    /// Whether this kind marks unparseable or missing input
    pub fn is_error(&self) -> bool {
        *self == NodeKind::Error
    }

    /// Whether this token starts a pipeline stage
    pub fn is_stage_keyword(&self) -> bool {
        matches!(
            self,
            NodeKind::MATCH
                | NodeKind::INSERT
                | NodeKind::DELETE
                | NodeKind::UPDATE
                | NodeKind::PUT
                | NodeKind::SELECT
                | NodeKind::REDUCE
                | NodeKind::SORT
                | NodeKind::LIMIT
                | NodeKind::OFFSET
        )
    }

    /// Whether this token starts a schema query
    pub fn is_schema_keyword(&self) -> bool {
        matches!(
            self,
            NodeKind::DEFINE | NodeKind::REDEFINE | NodeKind::UNDEFINE
        )
    }

    /// Whether this token is punctuation or an operator rather than a word
    pub fn is_punctuation(&self) -> bool {
        *self >= NodeKind::COMMA && *self <= NodeKind::OP
    }

    /// Constraint keywords that only apply to instances
    pub fn is_thing_constraint(&self) -> bool {
        matches!(self, NodeKind::ISA | NodeKind::HAS | NodeKind::LINKS)
    }

    /// Constraint keywords that only apply to types
    pub fn is_type_constraint(&self) -> bool {
        matches!(
            self,
            NodeKind::SUB | NodeKind::OWNS | NodeKind::RELATES | NodeKind::PLAYS | NodeKind::VALUE
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
