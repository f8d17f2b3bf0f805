// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # CST utility functions
//!
//! Cursor resolution and prefix collection over a TypeQL syntax tree. Every
//! function here is total: a missing parent or sibling ends the walk instead of
//! failing.

use typeql_grammar::{NodeKind, SyntaxNode, SyntaxTree, is_identifier_byte};

/// Find the innermost node relevant to a cursor offset
///
/// Descends from the root into the last child with `from < pos <= to`, so a
/// node ending exactly at the cursor wins over one starting there. Zero-width
/// nodes and punctuation tokens are never entered, and error nodes are not
/// looked into. Offsets past the end of the document are clamped.
///
/// # Examples
///
/// ```
/// use typeql_grammar::{NodeKind, parse};
/// use typeql_lsp_context::resolve_inner;
///
/// let parsed = parse("match $x");
/// let node = resolve_inner(parsed.tree(), 8);
/// assert_eq!(node.kind(), NodeKind::VAR);
/// ```
pub fn resolve_inner(tree: &SyntaxTree, pos: usize) -> SyntaxNode<'_> {
    let root = tree.root();
    let pos = pos.min(root.to());

    let mut node = root;
    while !node.is_error() {
        let next = node
            .children()
            .rev()
            .find(|child| {
                child.from() < pos && child.to() >= pos && !child.kind().is_punctuation()
            });
        match next {
            Some(child) => node = child,
            None => break,
        }
    }
    node
}

/// Kinds of the siblings before `node`, in document order
pub fn collect_preceding_siblings(node: SyntaxNode<'_>) -> Vec<NodeKind> {
    let mut kinds = Vec::new();
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        kinds.push(sibling.kind());
        current = sibling.prev_sibling();
    }
    kinds.reverse();
    kinds
}

/// Kinds of `node`'s children up to and including the last one starting before `pos`
///
/// Error nodes contribute nothing: the tokens they wrap are not context.
pub fn collect_preceding_children_of(node: SyntaxNode<'_>, pos: usize) -> Vec<NodeKind> {
    if node.is_error() {
        return Vec::new();
    }
    match node.child_before(pos) {
        Some(child) => {
            let mut kinds = collect_preceding_siblings(child);
            kinds.push(child.kind());
            kinds
        }
        None => Vec::new(),
    }
}

/// Start of the identifier-like word ending at `pos`
///
/// Scans back over `[A-Za-z0-9_\-$]` and returns the offset one past the first
/// byte that does not belong to the word, or 0.
pub fn word_start(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let pos = pos.min(bytes.len());
    bytes[..pos]
        .iter()
        .rposition(|&b| !(is_identifier_byte(b) || b == b'$'))
        .map_or(0, |i| i + 1)
}
