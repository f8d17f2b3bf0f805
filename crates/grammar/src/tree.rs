// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Concrete syntax tree
//!
//! An arena of nodes with byte spans. [`SyntaxNode`] is a cheap `Copy` handle
//! borrowing the tree; every navigation step returns an `Option` and running off
//! the edge of the tree is a normal outcome.

use crate::kind::NodeKind;

/// Index of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    from: usize,
    to: usize,
    parent: Option<NodeId>,
    index_in_parent: usize,
    children: Vec<NodeId>,
}

/// Parsed TypeQL document
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    /// Root node (always of kind [`NodeKind::Source`] for parsed documents)
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: self.root,
        }
    }

    /// Total number of nodes, tokens included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node handle for an id obtained from this tree
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id }
    }

    /// Pre-order iteration over every node in the tree
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![self.root()],
        }
    }

    /// Indented dump of the tree, one node per line
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        dump_node(self.root(), 0, &mut out);
        out
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

fn dump_node(node: SyntaxNode<'_>, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} [{}..{}]\n", node.kind(), node.from(), node.to()));
    for child in node.children() {
        dump_node(child, depth + 1, out);
    }
}

/// Borrowed handle to a node
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    /// Start byte offset (inclusive)
    pub fn from(&self) -> usize {
        self.tree.data(self.id).from
    }

    /// End byte offset (exclusive)
    pub fn to(&self) -> usize {
        self.tree.data(self.id).to
    }

    pub fn is_error(&self) -> bool {
        self.kind().is_error()
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| self.tree.node(id))
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'t>> {
        let data = self.tree.data(self.id);
        let parent = self.tree.data(data.parent?);
        let index = data.index_in_parent.checked_sub(1)?;
        parent.children.get(index).map(|&id| self.tree.node(id))
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'t>> {
        let data = self.tree.data(self.id);
        let parent = self.tree.data(data.parent?);
        parent
            .children
            .get(data.index_in_parent + 1)
            .map(|&id| self.tree.node(id))
    }

    pub fn first_child(&self) -> Option<SyntaxNode<'t>> {
        self.child(0)
    }

    pub fn last_child(&self) -> Option<SyntaxNode<'t>> {
        let children = &self.tree.data(self.id).children;
        children.last().map(|&id| self.tree.node(id))
    }

    pub fn child(&self, index: usize) -> Option<SyntaxNode<'t>> {
        let children = &self.tree.data(self.id).children;
        children.get(index).map(|&id| self.tree.node(id))
    }

    pub fn child_count(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + use<'t> {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| tree.node(id))
    }

    /// Last child that starts before `pos`
    pub fn child_before(&self, pos: usize) -> Option<SyntaxNode<'t>> {
        self.children().rev().find(|child| child.from() < pos)
    }

    /// First child of the given kind
    pub fn find_child(&self, kind: NodeKind) -> Option<SyntaxNode<'t>> {
        self.children().find(|child| child.kind() == kind)
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + use<'t> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Source text covered by this node
    ///
    /// Returns an empty string when the span does not fit `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.from()..self.to()).unwrap_or_default()
    }

    /// Pre-order iteration over this node and its descendants
    pub fn descendants(&self) -> Preorder<'t> {
        Preorder { stack: vec![*self] }
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}..{}", self.kind(), self.from(), self.to())
    }
}

/// Depth-first, document-order node iterator
pub struct Preorder<'t> {
    stack: Vec<SyntaxNode<'t>>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

/// Bottom-up tree construction
///
/// Nodes are opened with [`TreeBuilder::start_node`] and closed with
/// [`TreeBuilder::finish_node`]; tokens are leaves added with
/// [`TreeBuilder::token`]. A node's span runs from its first child to its last
/// child unless an explicit end is given.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<(NodeKind, Vec<NodeId>, usize)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Open a node; `at` is used as its start when it ends up with no children
    pub fn start_node(&mut self, kind: NodeKind, at: usize) {
        self.stack.push((kind, Vec::new(), at));
    }

    /// Add a leaf to the innermost open node
    pub fn token(&mut self, kind: NodeKind, from: usize, to: usize) {
        let id = self.push(kind, from, to, Vec::new());
        self.attach(id);
    }

    /// Close the innermost open node, optionally stretching its end to `end`
    pub fn finish_node(&mut self, end: Option<usize>) {
        let Some((kind, children, at)) = self.stack.pop() else {
            return;
        };
        let from = children
            .first()
            .map(|&id| self.nodes[id.index()].from)
            .unwrap_or(at);
        let last_to = children
            .last()
            .map(|&id| self.nodes[id.index()].to)
            .unwrap_or(from);
        let to = end.map_or(last_to, |e| e.max(last_to));
        let id = self.push(kind, from, to, children);
        self.attach(id);
    }

    /// Position among the innermost open node's children, for [`TreeBuilder::start_node_at`]
    pub fn checkpoint(&self) -> usize {
        self.stack.last().map_or(0, |(_, children, _)| children.len())
    }

    /// Open a node that adopts every child added since `checkpoint`
    pub fn start_node_at(&mut self, checkpoint: usize, kind: NodeKind) {
        let adopted = match self.stack.last_mut() {
            Some((_, children, _)) if checkpoint <= children.len() => children.split_off(checkpoint),
            _ => Vec::new(),
        };
        let at = adopted
            .first()
            .map_or(0, |&id| self.nodes[id.index()].from);
        self.stack.push((kind, adopted, at));
    }

    /// Kind of the innermost open node
    pub fn current_kind(&self) -> Option<NodeKind> {
        self.stack.last().map(|(kind, _, _)| *kind)
    }

    /// Kind of the last child added to the innermost open node
    pub fn last_child_kind(&self) -> Option<NodeKind> {
        let (_, children, _) = self.stack.last()?;
        children.last().map(|&id| self.nodes[id.index()].kind)
    }

    /// Close every open node and return the tree, its root spanning `0..len`
    pub fn finish_with_len(mut self, len: usize) -> SyntaxTree {
        while self.stack.len() > 1 {
            self.finish_node(None);
        }
        let (kind, children) = match self.stack.pop() {
            Some((kind, children, _)) => (kind, children),
            None => (NodeKind::Source, Vec::new()),
        };
        let root = self.push(kind, 0, len, children);
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, kind: NodeKind, from: usize, to: usize, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for (index, child) in children.iter().enumerate() {
            let data = &mut self.nodes[child.index()];
            data.parent = Some(id);
            data.index_in_parent = index;
        }
        self.nodes.push(NodeData {
            kind,
            from,
            to,
            parent: None,
            index_in_parent: 0,
            children,
        });
        id
    }

    fn attach(&mut self, id: NodeId) {
        if let Some((_, children, _)) = self.stack.last_mut() {
            children.push(id);
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
