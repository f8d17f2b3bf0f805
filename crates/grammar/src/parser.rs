// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parser
//!
//! Error-tolerant recursive descent over the token stream. Parsing never fails:
//! unexpected input is wrapped in [`NodeKind::Error`] nodes and missing required
//! tokens become zero-width `Error` nodes, each recorded as a [`SyntaxError`].
//!
//! Open-ended productions (clauses, statements, schema definitions) that are
//! still open when the input runs out extend to the end of the document, so a
//! cursor sitting after trailing whitespace stays inside them.

use crate::kind::NodeKind;
use crate::lexer::{Token, tokenize};
use crate::tree::{SyntaxTree, TreeBuilder};
use serde::Serialize;

/// A syntax error found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub message: String,
    pub from: usize,
    pub to: usize,
}

/// Result of parsing a document
#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Syntax errors in document order
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }
}

/// Parse a TypeQL document
pub fn parse(source: &str) -> Parse {
    let mut parser = Parser {
        source,
        tokens: tokenize(source),
        pos: 0,
        depth: 0,
        builder: TreeBuilder::new(),
        errors: Vec::new(),
    };
    parser.source_file();

    let Parser {
        builder,
        mut errors,
        ..
    } = parser;
    let tree = builder.finish_with_len(source.len());
    errors.sort_by_key(|e| (e.from, e.to));

    tracing::trace!(
        nodes = tree.len(),
        errors = errors.len(),
        "parsed TypeQL document"
    );
    Parse { tree, errors }
}

/// Nesting limit for blocks and parenthesised expressions
const MAX_DEPTH: usize = 256;

/// Tokens that end the current construct during recovery
fn is_recovery_point(kind: NodeKind) -> bool {
    kind.is_stage_keyword()
        || kind.is_schema_keyword()
        || matches!(
            kind,
            NodeKind::END | NodeKind::RETURN | NodeKind::FUN | NodeKind::RBRACE
        )
}

fn starts_pattern(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::VAR
            | NodeKind::LABEL
            | NodeKind::LET
            | NodeKind::NOT
            | NodeKind::TRY
            | NodeKind::LBRACE
    )
}

/// Productions that can keep growing and so stay open at end of input
fn is_open_ended(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Query
            | NodeKind::QuerySchema
            | NodeKind::QueryPipelinePreambled
            | NodeKind::ClauseMatch
            | NodeKind::ClauseInsert
            | NodeKind::ClauseDelete
            | NodeKind::ClauseUpdate
            | NodeKind::ClausePut
            | NodeKind::Definable
            | NodeKind::Function
            | NodeKind::Statement
            | NodeKind::StatementThing
            | NodeKind::StatementType
            | NodeKind::StatementAssignment
            | NodeKind::PatternDisjunction
            | NodeKind::Expression
            | NodeKind::Error
    )
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    builder: TreeBuilder,
    errors: Vec<SyntaxError>,
}

impl Parser<'_> {
    // ---- token cursor ----

    fn peek(&self) -> Option<NodeKind> {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> Option<NodeKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: NodeKind) -> bool {
        self.peek() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Byte offset of the next token, or the document length at EOF
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |t| t.from)
    }

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos).copied() {
            self.builder.token(token.kind, token.from, token.to);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: NodeKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: NodeKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.missing(what);
        false
    }

    // ---- node construction ----

    fn start(&mut self, kind: NodeKind) {
        let at = self.offset();
        self.builder.start_node(kind, at);
    }

    fn finish(&mut self) {
        let Some(kind) = self.builder.current_kind() else {
            return;
        };
        let closed = match self.builder.last_child_kind() {
            Some(NodeKind::RBRACE | NodeKind::RPAREN) => true,
            Some(NodeKind::SEMICOLON) => matches!(kind, NodeKind::Query | NodeKind::Error),
            _ => false,
        };
        let end = (self.at_eof() && !closed && is_open_ended(kind)).then_some(self.source.len());
        self.builder.finish_node(end);
    }

    /// Zero-width error for a required token that is absent
    fn missing(&mut self, what: &str) {
        let at = self.offset();
        self.builder.start_node(NodeKind::Error, at);
        self.builder.finish_node(None);
        self.errors.push(SyntaxError {
            message: format!("expected {what}"),
            from: at,
            to: at,
        });
    }

    /// Wrap the next token alone in an error node
    fn error_token(&mut self) {
        let Some(token) = self.tokens.get(self.pos).copied() else {
            return;
        };
        self.start(NodeKind::Error);
        self.bump();
        self.finish();
        self.unexpected(token.from, token.to);
    }

    /// Wrap input up to the next `;` (inclusive) or recovery point in an error node
    fn recover(&mut self) {
        let Some(first) = self.tokens.get(self.pos).copied() else {
            return;
        };
        let mut to = first.to;
        self.start(NodeKind::Error);
        self.bump();
        while first.kind != NodeKind::SEMICOLON {
            let Some(token) = self.tokens.get(self.pos).copied() else {
                break;
            };
            if is_recovery_point(token.kind) {
                break;
            }
            self.bump();
            to = token.to;
            if token.kind == NodeKind::SEMICOLON {
                break;
            }
        }
        self.finish();
        self.unexpected(first.from, to);
    }

    /// Enter a nested block or expression. Past `MAX_DEPTH` the rest of the
    /// construct is wrapped in an error node and `false` is returned.
    fn enter(&mut self) -> bool {
        if self.depth < MAX_DEPTH {
            self.depth += 1;
            return true;
        }
        let from = self.offset();
        let mut to = from;
        self.start(NodeKind::Error);
        while let Some(token) = self.tokens.get(self.pos).copied() {
            if token.kind == NodeKind::SEMICOLON || is_recovery_point(token.kind) {
                break;
            }
            self.bump();
            to = token.to;
        }
        self.finish();
        self.errors.push(SyntaxError {
            message: format!("nesting deeper than {MAX_DEPTH} levels"),
            from,
            to,
        });
        false
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn unexpected(&mut self, from: usize, to: usize) {
        let text = self.source.get(from..to).unwrap_or_default();
        self.errors.push(SyntaxError {
            message: format!("unexpected input '{text}'"),
            from,
            to,
        });
    }

    // ---- queries ----

    fn source_file(&mut self) {
        self.builder.start_node(NodeKind::Source, 0);
        while let Some(kind) = self.peek() {
            if kind.is_schema_keyword() || kind.is_stage_keyword() {
                self.query();
            } else {
                self.recover();
            }
        }
    }

    fn query(&mut self) {
        self.start(NodeKind::Query);
        if self.peek().is_some_and(|k| k.is_schema_keyword()) {
            self.query_schema();
        } else {
            self.pipeline();
        }
        if self.eat(NodeKind::END) {
            self.expect(NodeKind::SEMICOLON, "';'");
        }
        self.finish();
    }

    fn query_schema(&mut self) {
        self.start(NodeKind::QuerySchema);
        self.bump();
        let mut any = false;
        while let Some(kind) = self.peek() {
            match kind {
                NodeKind::KIND | NodeKind::LABEL => {
                    self.definable();
                    self.separator();
                    any = true;
                }
                NodeKind::FUN => {
                    self.function();
                    any = true;
                }
                k if is_recovery_point(k) => break,
                _ => self.recover(),
            }
        }
        if !any {
            self.missing("a definition");
        }
        self.finish();
    }

    fn pipeline(&mut self) {
        self.start(NodeKind::QueryPipelinePreambled);
        while self.peek().is_some_and(|k| k.is_stage_keyword()) {
            self.stage();
        }
        self.finish();
    }

    fn stage(&mut self) {
        match self.peek() {
            Some(NodeKind::MATCH) => self.clause(NodeKind::ClauseMatch, false),
            Some(NodeKind::INSERT) => self.clause(NodeKind::ClauseInsert, true),
            Some(NodeKind::DELETE) => self.clause(NodeKind::ClauseDelete, true),
            Some(NodeKind::UPDATE) => self.clause(NodeKind::ClauseUpdate, true),
            Some(NodeKind::PUT) => self.clause(NodeKind::ClausePut, true),
            Some(NodeKind::SELECT) => self.stage_select(),
            Some(NodeKind::SORT) => self.stage_sort(),
            Some(NodeKind::LIMIT) => self.stage_count(NodeKind::StageLimit),
            Some(NodeKind::OFFSET) => self.stage_count(NodeKind::StageOffset),
            Some(NodeKind::REDUCE) => self.stage_reduce(),
            _ => self.recover(),
        }
    }

    /// `;` after a pattern or definition
    fn separator(&mut self) {
        match self.peek() {
            Some(NodeKind::SEMICOLON) => self.bump(),
            Some(k) if !is_recovery_point(k) => self.recover(),
            _ => self.missing("';'"),
        }
    }

    // ---- write and match clauses ----

    fn clause(&mut self, kind: NodeKind, write: bool) {
        self.start(kind);
        self.bump();
        if !self.patterns(write) {
            self.missing("a pattern");
        }
        self.finish();
    }

    /// Patterns separated by `;`, returning whether any was parsed
    fn patterns(&mut self, write: bool) -> bool {
        let mut any = false;
        while let Some(kind) = self.peek() {
            if is_recovery_point(kind) {
                break;
            }
            if starts_pattern(kind) {
                self.pattern(write);
                self.separator();
                any = true;
            } else {
                self.recover();
            }
        }
        any
    }

    fn pattern(&mut self, write: bool) {
        match self.peek() {
            Some(NodeKind::NOT) => self.keyword_block(NodeKind::PatternNegation, write),
            Some(NodeKind::TRY) => self.keyword_block(NodeKind::PatternTry, write),
            Some(NodeKind::LBRACE) => {
                let checkpoint = self.builder.checkpoint();
                self.conjunction(write);
                if self.at(NodeKind::OR) {
                    self.builder
                        .start_node_at(checkpoint, NodeKind::PatternDisjunction);
                    while self.eat(NodeKind::OR) {
                        self.conjunction(write);
                    }
                    self.finish();
                }
            }
            _ => self.statement(write),
        }
    }

    fn keyword_block(&mut self, kind: NodeKind, write: bool) {
        self.start(kind);
        self.bump();
        self.block_body(write);
        self.finish();
    }

    fn conjunction(&mut self, write: bool) {
        self.start(NodeKind::PatternConjunction);
        self.block_body(write);
        self.finish();
    }

    fn block_body(&mut self, write: bool) {
        if !self.at(NodeKind::LBRACE) {
            self.missing("'{'");
            return;
        }
        if !self.enter() {
            return;
        }
        self.bump();
        self.patterns(write);
        self.expect(NodeKind::RBRACE, "'}'");
        self.leave();
    }

    // ---- statements ----

    fn statement(&mut self, write: bool) {
        self.start(NodeKind::Statement);
        match self.peek() {
            Some(NodeKind::LET) => self.statement_assignment(),
            Some(NodeKind::VAR) => {
                let next = self.nth(1);
                if write || next.is_some_and(|k| k.is_thing_constraint()) {
                    self.statement_thing();
                } else if next.is_some_and(|k| k.is_type_constraint()) {
                    self.statement_type();
                } else {
                    // Subject alone: constraint family not decided yet
                    self.bump();
                    while self.at(NodeKind::LABEL) {
                        self.error_token();
                    }
                }
            }
            _ => self.statement_type(),
        }
        self.finish();
    }

    fn statement_thing(&mut self) {
        self.start(NodeKind::StatementThing);
        self.bump();
        self.constraints(NodeKind::is_thing_constraint, Self::thing_constraint);
        self.finish();
    }

    fn statement_type(&mut self) {
        self.start(NodeKind::StatementType);
        if self.at(NodeKind::VAR) {
            self.bump();
        } else {
            self.type_ref();
        }
        self.constraints(NodeKind::is_type_constraint, Self::type_constraint_body);
        self.finish();
    }

    /// Comma-separated constraints; stray words become single-token errors
    fn constraints(&mut self, accepts: fn(&NodeKind) -> bool, constraint: fn(&mut Self)) {
        loop {
            match self.peek() {
                Some(NodeKind::COMMA) => {
                    self.bump();
                    let next = self.peek();
                    if !next.is_some_and(|k| accepts(&k) || k == NodeKind::LABEL) {
                        self.missing("a constraint");
                    }
                }
                Some(kind) if accepts(&kind) => constraint(self),
                Some(NodeKind::LABEL) => self.error_token(),
                _ => break,
            }
        }
    }

    fn thing_constraint(&mut self) {
        match self.peek() {
            Some(NodeKind::ISA) => {
                self.bump();
                match self.peek() {
                    Some(NodeKind::LABEL | NodeKind::KIND) => self.type_ref(),
                    Some(NodeKind::VAR) => self.bump(),
                    _ => self.missing("a type"),
                }
            }
            Some(NodeKind::HAS) => {
                self.bump();
                match self.peek() {
                    Some(NodeKind::LABEL) => {
                        self.type_ref();
                        if matches!(
                            self.peek(),
                            Some(NodeKind::VAR | NodeKind::STRINGLITERAL | NodeKind::NUMBERLITERAL)
                        ) {
                            self.bump();
                        }
                    }
                    Some(NodeKind::VAR) => self.bump(),
                    _ => self.missing("an attribute"),
                }
            }
            Some(NodeKind::LINKS) => {
                self.bump();
                if self.at(NodeKind::LPAREN) {
                    self.relation();
                } else {
                    self.missing("'('");
                }
            }
            _ => {}
        }
    }

    /// Keyword and operand of a type constraint, added to the current node
    fn type_constraint_body(&mut self) {
        self.bump();
        match self.peek() {
            Some(NodeKind::LABEL | NodeKind::KIND) => self.type_ref(),
            Some(NodeKind::VAR) => self.bump(),
            _ => self.missing("a type"),
        }
    }

    fn type_constraint(&mut self) {
        self.start(NodeKind::TypeConstraint);
        self.type_constraint_body();
        self.finish();
    }

    fn relation(&mut self) {
        self.start(NodeKind::Relation);
        self.bump();
        loop {
            if matches!(self.peek(), Some(NodeKind::VAR | NodeKind::LABEL)) {
                self.role_player();
            } else {
                self.missing("a role player");
                break;
            }
            if !self.eat(NodeKind::COMMA) {
                break;
            }
        }
        self.expect(NodeKind::RPAREN, "')'");
        self.finish();
    }

    fn role_player(&mut self) {
        self.start(NodeKind::RolePlayer);
        if self.at(NodeKind::LABEL) {
            self.type_ref();
            self.expect(NodeKind::COLON, "':'");
        }
        if !self.eat(NodeKind::VAR) {
            self.missing("a variable");
        }
        self.finish();
    }

    /// `label`, a root kind, or scoped `relation:role`
    fn type_ref(&mut self) {
        self.start(NodeKind::TypeRef);
        self.bump();
        if self.at(NodeKind::COLON) && self.nth(1) == Some(NodeKind::LABEL) {
            self.bump();
            self.bump();
        }
        self.finish();
    }

    fn statement_assignment(&mut self) {
        self.start(NodeKind::StatementAssignment);
        self.bump();
        self.var_list();
        if self.expect(NodeKind::ASSIGN, "'='") {
            self.expression();
        }
        self.finish();
    }

    // ---- expressions ----

    fn expression(&mut self) {
        if !self.enter() {
            return;
        }
        self.start(NodeKind::Expression);
        self.operand();
        while self.eat(NodeKind::OP) {
            self.operand();
        }
        self.finish();
        self.leave();
    }

    fn operand(&mut self) {
        match self.peek() {
            Some(NodeKind::VAR | NodeKind::NUMBERLITERAL | NodeKind::STRINGLITERAL) => self.bump(),
            Some(NodeKind::LABEL) if self.nth(1) == Some(NodeKind::LPAREN) => self.function_call(),
            Some(NodeKind::LABEL) => self.bump(),
            Some(NodeKind::LPAREN) => {
                self.start(NodeKind::Expression);
                self.bump();
                self.expression();
                self.expect(NodeKind::RPAREN, "')'");
                self.finish();
            }
            _ => self.missing("an expression"),
        }
    }

    fn function_call(&mut self) {
        self.start(NodeKind::FunctionCall);
        self.bump();
        self.bump();
        if !self.at(NodeKind::RPAREN) {
            self.expression();
            while self.eat(NodeKind::COMMA) {
                self.expression();
            }
        }
        self.expect(NodeKind::RPAREN, "')'");
        self.finish();
    }

    // ---- stream modifiers ----

    fn var_list(&mut self) {
        if !self.eat(NodeKind::VAR) {
            self.missing("a variable");
        }
        while self.eat(NodeKind::COMMA) {
            if !self.eat(NodeKind::VAR) {
                self.missing("a variable");
            }
        }
    }

    fn stage_select(&mut self) {
        self.start(NodeKind::StageSelect);
        self.bump();
        self.var_list();
        self.expect(NodeKind::SEMICOLON, "';'");
        self.finish();
    }

    fn stage_sort(&mut self) {
        self.start(NodeKind::StageSort);
        self.bump();
        loop {
            if !self.eat(NodeKind::VAR) {
                self.missing("a variable");
            }
            if !self.eat(NodeKind::ASC) {
                self.eat(NodeKind::DESC);
            }
            if !self.eat(NodeKind::COMMA) {
                break;
            }
        }
        self.expect(NodeKind::SEMICOLON, "';'");
        self.finish();
    }

    fn stage_count(&mut self, kind: NodeKind) {
        self.start(kind);
        self.bump();
        if !self.eat(NodeKind::NUMBERLITERAL) {
            self.missing("a number");
        }
        self.expect(NodeKind::SEMICOLON, "';'");
        self.finish();
    }

    fn stage_reduce(&mut self) {
        self.start(NodeKind::StageReduce);
        self.bump();
        loop {
            if !self.eat(NodeKind::VAR) {
                self.missing("a variable");
            }
            if self.expect(NodeKind::ASSIGN, "'='") {
                self.expression();
            }
            if !self.eat(NodeKind::COMMA) {
                break;
            }
        }
        self.expect(NodeKind::SEMICOLON, "';'");
        self.finish();
    }

    // ---- schema definitions ----

    fn definable(&mut self) {
        self.start(NodeKind::Definable);
        self.eat(NodeKind::KIND);
        if !self.eat(NodeKind::LABEL) {
            self.missing("a type label");
        }
        self.constraints(NodeKind::is_type_constraint, Self::type_constraint);
        self.finish();
    }

    fn function(&mut self) {
        self.start(NodeKind::Function);
        self.bump();
        if !self.eat(NodeKind::LABEL) {
            self.missing("a function name");
        }
        self.function_params();
        if self.expect(NodeKind::ARROW, "'->'") {
            self.return_types();
        }
        self.expect(NodeKind::COLON, "':'");
        while self.peek().is_some_and(|k| k.is_stage_keyword()) {
            self.stage();
        }
        if self.at(NodeKind::RETURN) {
            self.function_return();
        } else {
            self.missing("'return'");
        }
        self.finish();
    }

    fn function_params(&mut self) {
        self.start(NodeKind::FunctionParams);
        if self.expect(NodeKind::LPAREN, "'('") {
            while self.at(NodeKind::VAR) {
                self.bump();
                if self.expect(NodeKind::COLON, "':'") {
                    self.type_ref_or_missing();
                }
                if !self.eat(NodeKind::COMMA) {
                    break;
                }
            }
            self.expect(NodeKind::RPAREN, "')'");
        }
        self.finish();
    }

    fn return_types(&mut self) {
        let braced = self.eat(NodeKind::LBRACE);
        loop {
            self.type_ref_or_missing();
            if !self.eat(NodeKind::COMMA) {
                break;
            }
        }
        if braced {
            self.expect(NodeKind::RBRACE, "'}'");
        }
    }

    fn type_ref_or_missing(&mut self) {
        if self.at(NodeKind::LABEL) {
            self.type_ref();
        } else {
            self.missing("a type");
        }
    }

    fn function_return(&mut self) {
        self.start(NodeKind::FunctionReturn);
        self.bump();
        // Reduction such as `first` or `count`
        self.eat(NodeKind::LABEL);
        if self.eat(NodeKind::LBRACE) {
            self.var_list();
            self.expect(NodeKind::RBRACE, "'}'");
        } else {
            self.var_list();
        }
        self.expect(NodeKind::SEMICOLON, "';'");
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SyntaxNode;

    fn kinds_of(node: SyntaxNode<'_>) -> Vec<NodeKind> {
        node.children().map(|c| c.kind()).collect()
    }

    fn find(tree: &SyntaxTree, kind: NodeKind) -> SyntaxNode<'_> {
        tree.iter()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind} node in:\n{}", tree.debug_dump()))
    }

    #[test]
    fn test_parse_match_insert_pipeline() {
        let source = "match $x isa person; insert $x has name \"Steve\"; end;";
        let parsed = parse(source);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());

        let tree = parsed.tree();
        let query = find(tree, NodeKind::Query);
        assert_eq!(
            kinds_of(query),
            vec![
                NodeKind::QueryPipelinePreambled,
                NodeKind::END,
                NodeKind::SEMICOLON
            ]
        );
        let thing = find(tree, NodeKind::StatementThing);
        assert_eq!(
            kinds_of(thing),
            vec![NodeKind::VAR, NodeKind::ISA, NodeKind::TypeRef]
        );
        let insert = find(tree, NodeKind::ClauseInsert);
        assert_eq!(insert.text(source), "insert $x has name \"Steve\";");
    }

    #[test]
    fn test_parse_schema_definitions() {
        let source = "define relation friendship sub relationship, relates friend; end;";
        let parsed = parse(source);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());

        let definable = find(parsed.tree(), NodeKind::Definable);
        assert_eq!(
            kinds_of(definable),
            vec![
                NodeKind::KIND,
                NodeKind::LABEL,
                NodeKind::TypeConstraint,
                NodeKind::COMMA,
                NodeKind::TypeConstraint
            ]
        );
    }

    #[test]
    fn test_parse_disjunction_and_relation() {
        let source = "match { $x has name $n; } or { $r links (friend: $x); };";
        let parsed = parse(source);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());

        let tree = parsed.tree();
        let disjunction = find(tree, NodeKind::PatternDisjunction);
        assert_eq!(
            kinds_of(disjunction),
            vec![
                NodeKind::PatternConjunction,
                NodeKind::OR,
                NodeKind::PatternConjunction
            ]
        );
        let player = find(tree, NodeKind::RolePlayer);
        assert_eq!(
            kinds_of(player),
            vec![NodeKind::TypeRef, NodeKind::COLON, NodeKind::VAR]
        );
    }

    #[test]
    fn test_parse_function_with_assignment() {
        let source = "define\nfun foo($x: integer) -> integer:\nmatch let $y = foo() * ($x + 1);\nreturn first $y;\nend;";
        let parsed = parse(source);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());

        let tree = parsed.tree();
        let assignment = find(tree, NodeKind::StatementAssignment);
        assert_eq!(
            kinds_of(assignment),
            vec![
                NodeKind::LET,
                NodeKind::VAR,
                NodeKind::ASSIGN,
                NodeKind::Expression
            ]
        );
        assert!(tree.iter().any(|n| n.kind() == NodeKind::FunctionCall));
        assert!(tree.iter().any(|n| n.kind() == NodeKind::FunctionReturn));
    }

    #[test]
    fn test_open_statement_extends_to_end_of_input() {
        let source = "match $x ";
        let parsed = parse(source);
        let statement = find(parsed.tree(), NodeKind::Statement);
        assert_eq!((statement.from(), statement.to()), (6, 9));
        assert_eq!(kinds_of(statement), vec![NodeKind::VAR]);
    }

    #[test]
    fn test_clause_stays_open_after_separator() {
        let parsed = parse("match $x isa person;  ");
        let clause = find(parsed.tree(), NodeKind::ClauseMatch);
        assert_eq!(clause.to(), 22);
        // The completed statement itself does not stretch
        let statement = find(parsed.tree(), NodeKind::Statement);
        assert_eq!(statement.to(), 19);
    }

    #[test]
    fn test_terminated_query_does_not_extend() {
        let parsed = parse("match $x isa person; end;  ");
        let query = find(parsed.tree(), NodeKind::Query);
        assert_eq!(query.to(), 25);
        assert_eq!(parsed.tree().root().to(), 27);
    }

    #[test]
    fn test_missing_tokens_are_zero_width_errors() {
        let parsed = parse("match $x isa ");
        let thing = find(parsed.tree(), NodeKind::StatementThing);
        let error = thing.last_child().unwrap();
        assert!(error.is_error());
        assert_eq!((error.from(), error.to()), (13, 13));
        assert!(
            parsed
                .errors()
                .iter()
                .any(|e| e.message == "expected a type" && e.from == 13)
        );
    }

    #[test]
    fn test_stray_word_is_wrapped_inside_statement() {
        let source = "match $x is";
        let parsed = parse(source);
        let statement = find(parsed.tree(), NodeKind::Statement);
        assert_eq!(kinds_of(statement), vec![NodeKind::VAR, NodeKind::Error]);
        assert_eq!(statement.last_child().unwrap().text(source), "is");
        assert_eq!(parsed.errors()[0].message, "unexpected input 'is'");
    }

    #[test]
    fn test_garbage_at_top_level_is_recovered() {
        let source = "person; match $x isa person;";
        let parsed = parse(source);
        let tree = parsed.tree();
        assert_eq!(
            kinds_of(tree.root()),
            vec![NodeKind::Error, NodeKind::Query]
        );
        assert_eq!(parsed.errors().len(), 1);
        assert_eq!((parsed.errors()[0].from, parsed.errors()[0].to), (0, 7));
    }

    #[test]
    fn test_empty_document() {
        let parsed = parse("");
        assert_eq!(parsed.tree().root().child_count(), 0);
        assert!(parsed.errors().is_empty());
    }

    fn nesting_error(parsed: &Parse) -> SyntaxNode<'_> {
        let message = format!("nesting deeper than {MAX_DEPTH} levels");
        let error = parsed
            .errors()
            .iter()
            .find(|e| e.message == message)
            .expect("nesting error");
        parsed
            .tree()
            .iter()
            .find(|n| n.is_error() && n.from() == error.from)
            .expect("nesting error node")
    }

    #[test]
    fn test_deeply_nested_blocks_are_cut_off() {
        let source = format!("match {}", "{ ".repeat(50_000));
        let parsed = parse(&source);
        let error = nesting_error(&parsed);
        assert_eq!(error.kind(), NodeKind::Error);
        assert_eq!(error.to(), source.len());
        let conjunctions = error
            .ancestors()
            .filter(|n| n.kind() == NodeKind::PatternConjunction)
            .count();
        assert_eq!(conjunctions, MAX_DEPTH + 1);
    }

    #[test]
    fn test_deeply_nested_parentheses_are_cut_off() {
        let source = format!("match let $y = {}", "(".repeat(50_000));
        let parsed = parse(&source);
        let error = nesting_error(&parsed);
        assert!(error.ancestors().count() < 3 * MAX_DEPTH);
        assert!(
            error
                .ancestors()
                .any(|n| n.kind() == NodeKind::StatementAssignment)
        );
    }

    #[test]
    fn test_nesting_within_limit_has_no_errors() {
        let source = format!(
            "match {}$x isa person;{}",
            "{ ".repeat(100),
            " };".repeat(100)
        );
        let parsed = parse(&source);
        assert!(parsed.errors().is_empty(), "{:?}", parsed.errors());
    }
}
