//! Parsed trees and the node view over them
//!
//! A [`Tree`] owns the source text, the rowan green tree and the
//! diagnostics of one parse, plus what a later [`reparse`](crate::reparse)
//! needs from it. [`Node`] is the view collaborators read: node type names,
//! spans, children and named fields. Field wrapper nodes and whitespace
//! never show up through it; comments do, as `comment` nodes.

use std::fmt;
use std::ops::Range;

use rowan::{GreenNode, NodeOrToken, TextRange};
use smol_str::SmolStr;

use crate::base::{LineIndex, Point, Span};
use crate::parser::engine::{ItemRecord, Output};
use crate::parser::lexer::Lexeme;
use crate::parser::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxError};

/// The result of parsing one source text
///
/// Trees are immutable. Cloning one shares its green tree.
#[derive(Debug, Clone)]
pub struct Tree {
    text: String,
    green: GreenNode,
    errors: Vec<SyntaxError>,
    lexemes: Vec<Lexeme>,
    records: Vec<ItemRecord>,
    reused: usize,
    line_index: LineIndex,
}

impl Tree {
    pub(crate) fn new(text: &str, output: Output) -> Self {
        Tree {
            text: text.to_owned(),
            line_index: LineIndex::new(text),
            green: output.green,
            errors: output.errors,
            lexemes: output.lexemes,
            records: output.records,
            reused: output.reused,
        }
    }

    /// The `source_file` node
    pub fn root_node(&self) -> Node<'_> {
        Node {
            element: NodeOrToken::Node(self.syntax()),
            tree: self,
        }
    }

    /// The rowan tree, trivia and field wrappers included
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Diagnostics for every recovered span, in source order
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// True if any node in the tree is an error or missing node
    pub fn has_error(&self) -> bool {
        self.root_node().has_error()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Number of body items taken over from the previous tree by the
    /// reparse that produced this one
    pub fn reused_items(&self) -> usize {
        self.reused
    }

    /// Same node kinds, spans, fields and text
    pub fn structurally_eq(&self, other: &Tree) -> bool {
        self.green == other.green
    }

    /// S-expression rendering of the whole tree
    pub fn to_sexp(&self) -> String {
        self.root_node().to_sexp()
    }

    pub(crate) fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub(crate) fn records(&self) -> &[ItemRecord] {
        &self.records
    }
}

/// A node or token of a [`Tree`], as seen by collaborators
#[derive(Clone)]
pub struct Node<'t> {
    element: SyntaxElement,
    tree: &'t Tree,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.type_name(), self.byte_range())
    }
}

impl<'t> Node<'t> {
    fn wrap(&self, element: SyntaxElement) -> Node<'t> {
        Node {
            element,
            tree: self.tree,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.element.kind()
    }

    /// The node's type, e.g. `component_declaration`
    ///
    /// Keywords and quotes are named by their text, missing nodes by the
    /// token that was expected.
    pub fn type_name(&self) -> SmolStr {
        match &self.element {
            NodeOrToken::Token(token)
                if matches!(token.kind(), SyntaxKind::KEYWORD | SyntaxKind::QUOTE) =>
            {
                SmolStr::new(token.text())
            }
            NodeOrToken::Node(node) if node.kind() == SyntaxKind::MISSING => node
                .first_token()
                .map_or(SmolStr::new_static("MISSING"), |token| {
                    SmolStr::new_static(token.kind().name())
                }),
            element => SmolStr::new_static(element.kind().name()),
        }
    }

    pub fn is_named(&self) -> bool {
        self.kind().is_named() && !self.is_missing()
    }

    pub fn is_error(&self) -> bool {
        self.kind() == SyntaxKind::ERROR
    }

    pub fn is_missing(&self) -> bool {
        self.kind() == SyntaxKind::MISSING
    }

    /// True if this node is, or contains, an error or missing node
    pub fn has_error(&self) -> bool {
        match &self.element {
            NodeOrToken::Token(token) => token.kind() == SyntaxKind::ERROR,
            NodeOrToken::Node(node) => node
                .descendants()
                .any(|n| matches!(n.kind(), SyntaxKind::ERROR | SyntaxKind::MISSING)),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.element.text_range()
    }

    pub fn byte_range(&self) -> Range<usize> {
        let range = self.text_range();
        usize::from(range.start())..usize::from(range.end())
    }

    pub fn start_byte(&self) -> usize {
        self.byte_range().start
    }

    pub fn end_byte(&self) -> usize {
        self.byte_range().end
    }

    pub fn start_position(&self) -> Point {
        self.tree.line_index.point(self.text_range().start())
    }

    pub fn end_position(&self) -> Point {
        self.tree.line_index.point(self.text_range().end())
    }

    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.end_position())
    }

    /// Source text of the node
    pub fn text(&self) -> &'t str {
        &self.tree.text[self.byte_range()]
    }

    /// The rowan element behind this node
    pub fn syntax(&self) -> &SyntaxElement {
        &self.element
    }

    /// Children in order, with the field each one fills
    fn fielded_children(&self) -> Vec<(Option<&'static str>, Node<'t>)> {
        let mut children = Vec::new();
        if let NodeOrToken::Node(node) = &self.element {
            if node.kind() != SyntaxKind::MISSING {
                collect_children(node, None, &mut |field, element| {
                    children.push((field, self.wrap(element)));
                });
            }
        }
        children
    }

    /// All children, named and anonymous
    pub fn children(&self) -> Vec<Node<'t>> {
        self.fielded_children().into_iter().map(|(_, n)| n).collect()
    }

    pub fn named_children(&self) -> Vec<Node<'t>> {
        self.fielded_children()
            .into_iter()
            .map(|(_, n)| n)
            .filter(Node::is_named)
            .collect()
    }

    pub fn child_count(&self) -> usize {
        self.fielded_children().len()
    }

    pub fn named_child_count(&self) -> usize {
        self.named_children().len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'t>> {
        self.children().into_iter().nth(index)
    }

    pub fn named_child(&self, index: usize) -> Option<Node<'t>> {
        self.named_children().into_iter().nth(index)
    }

    /// The first child filling field `name`
    pub fn child_by_field_name(&self, name: &str) -> Option<Node<'t>> {
        self.children_by_field_name(name).into_iter().next()
    }

    /// Every child filling field `name`, in order
    pub fn children_by_field_name(&self, name: &str) -> Vec<Node<'t>> {
        self.fielded_children()
            .into_iter()
            .filter(|(field, _)| *field == Some(name))
            .map(|(_, n)| n)
            .collect()
    }

    /// The field this node fills in its parent, if any
    pub fn field_name(&self) -> Option<&'static str> {
        let mut field = None;
        let mut parent = self.element.parent();
        while let Some(node) = parent {
            if !node.kind().is_field() {
                break;
            }
            field = node.kind().field_name();
            parent = node.parent();
        }
        field
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        let mut parent = self.element.parent()?;
        while parent.kind().is_field() {
            parent = parent.parent()?;
        }
        Some(self.wrap(NodeOrToken::Node(parent)))
    }

    /// Every node below this one in preorder, this one included
    ///
    /// Tokens, comments among them, are not visited; field wrappers are
    /// skipped.
    pub fn descendants(&self) -> impl Iterator<Item = Node<'t>> + use<'t> {
        let tree = self.tree;
        let start = match &self.element {
            NodeOrToken::Node(node) => Some(node.clone()),
            NodeOrToken::Token(_) => None,
        };
        start.into_iter().flat_map(move |node| {
            node.descendants()
                .filter(|n| !n.kind().is_field())
                .map(move |n| Node {
                    element: NodeOrToken::Node(n),
                    tree,
                })
        })
    }

    /// S-expression rendering of this node
    pub fn to_sexp(&self) -> String {
        super::sexp::render(self)
    }
}

/// Visit the children of `node`, looking through field wrappers and
/// skipping whitespace
///
/// A child inside nested wrappers takes the outermost field's name.
fn collect_children(
    node: &SyntaxNode,
    field: Option<&'static str>,
    visit: &mut impl FnMut(Option<&'static str>, SyntaxElement),
) {
    for child in node.children_with_tokens() {
        let kind = child.kind();
        if kind == SyntaxKind::WHITESPACE {
            continue;
        }
        match child {
            NodeOrToken::Node(inner) if kind.is_field() => {
                collect_children(&inner, field.or(kind.field_name()), visit);
            }
            element => visit(field, element),
        }
    }
}
