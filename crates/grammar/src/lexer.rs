// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Tokenizer
//!
//! Splits TypeQL source into tokens. Whitespace and `#` line comments are trivia
//! and never produce tokens. Characters that fit no token become single-character
//! [`NodeKind::Error`] tokens so the parser can wrap them.

use crate::kind::NodeKind;

/// A lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: NodeKind,
    pub from: usize,
    pub to: usize,
}

/// Tokenize the whole document
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        src: source.as_bytes(),
        pos: 0,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tokens
}

/// Characters allowed after the first character of an identifier
pub fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(c) = self.peek() {
                    if c == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let from = self.pos;
        let b = self.peek()?;

        let kind = match b {
            b'$' => {
                self.pos += 1;
                self.eat_while(is_identifier_byte);
                NodeKind::VAR
            }
            b if b.is_ascii_alphabetic() || b == b'_' => self.word(from),
            b if b.is_ascii_digit() => {
                self.eat_while(|c| c.is_ascii_digit());
                if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                    self.eat_while(|c| c.is_ascii_digit());
                }
                NodeKind::NUMBERLITERAL
            }
            b'"' | b'\'' => {
                self.string(b);
                NodeKind::STRINGLITERAL
            }
            b',' => self.single(NodeKind::COMMA),
            b';' => self.single(NodeKind::SEMICOLON),
            b':' => self.single(NodeKind::COLON),
            b'(' => self.single(NodeKind::LPAREN),
            b')' => self.single(NodeKind::RPAREN),
            b'{' => self.single(NodeKind::LBRACE),
            b'}' => self.single(NodeKind::RBRACE),
            b'=' => {
                if self.peek_at(1) == Some(b'=') {
                    self.pos += 2;
                    NodeKind::OP
                } else {
                    self.single(NodeKind::ASSIGN)
                }
            }
            b'-' if self.peek_at(1) == Some(b'>') => {
                self.pos += 2;
                NodeKind::ARROW
            }
            b'<' | b'>' | b'!' => {
                self.pos += 1;
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    NodeKind::OP
                } else if b == b'!' {
                    NodeKind::Error
                } else {
                    NodeKind::OP
                }
            }
            b'+' | b'-' | b'*' | b'/' | b'%' | b'^' => self.single(NodeKind::OP),
            _ => {
                // Consume a whole UTF-8 sequence so spans stay on char boundaries
                self.pos += utf8_len(b);
                NodeKind::Error
            }
        };

        Some(Token {
            kind,
            from,
            to: self.pos,
        })
    }

    fn single(&mut self, kind: NodeKind) -> NodeKind {
        self.pos += 1;
        kind
    }

    fn word(&mut self, from: usize) -> NodeKind {
        self.eat_while(is_identifier_byte);
        let mut end = self.pos;
        if self.peek() == Some(b'!') {
            let bang = &self.src[from..end];
            if bang == b"isa" || bang == b"sub" {
                self.pos += 1;
                end = self.pos;
            }
        }
        let word = std::str::from_utf8(&self.src[from..end]).unwrap_or_default();
        NodeKind::keyword(word).unwrap_or(NodeKind::LABEL)
    }

    fn string(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(c) = self.peek() {
            match c {
                b'\\' => self.pos += 2,
                b'\n' => return,
                c if c == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
        // Unterminated escape at the very end
        self.pos = self.pos.min(self.src.len());
    }
}

fn utf8_len(first: u8) -> usize {
    match first {
        0xF0..=0xFF => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}
