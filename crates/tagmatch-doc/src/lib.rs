//! In-memory markup documents for tagmatch.
//!
//! Parses a small, strict markup subset into an arena [`Document`] whose
//! [`Node`] handles implement [`tagmatch::TreeNode`].
//!
//! # Markup Format
//!
//! ```text
//! <ul>
//!   <li>first</li>
//!   <li>second <b>item</b></li>
//!   <hr/>
//! </ul>
//! ```
//!
//! - elements are `<name>...</name>` or `<name/>`; names are ASCII
//!   alphanumerics plus `-`, `_` and `:`
//! - everything between tags is a text node, kept verbatim
//! - text made only of whitespace is dropped
//! - no attributes, comments, entities or implicit closing
//!
//! # Example
//!
//! ```
//! use tagmatch::{match_tree, Pattern, ScopeChain};
//! use tagmatch_doc::Document;
//!
//! let doc = Document::parse("<p>42</p>").unwrap();
//! let pattern = Pattern::tag("p")
//!     .with_child(Pattern::bind("n").with_child(Pattern::regex("[0-9]+").unwrap()));
//!
//! let (result, scopes) = match_tree(Some(&pattern), doc.root(), &ScopeChain::new()).unwrap();
//! assert!(result.is_valid());
//! assert_eq!(scopes.get("n"), Some("42"));
//! ```

use std::fmt;
use std::ptr;
use tagmatch::TreeNode;
use thiserror::Error;
use winnow::ascii::multispace0;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

// ============ Data Types ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    kind: NodeKind,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// An ordered tree of element and text nodes, stored in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: Vec<NodeData>,
    first_root: Option<NodeId>,
}

/// A handle to one node of a [`Document`].
///
/// Two handles are equal when they point at the same node of the same
/// document.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("markup syntax error at byte {offset}")]
    Syntax { offset: usize },
}

// ============ Public API ============

impl Document {
    pub fn parse(markup: &str) -> Result<Document, ParseError> {
        Ok(build(markup, DocumentBuilder::new())?.finish())
    }

    /// Parse `markup` as the body of an HTML page, wrapping it in
    /// `<html><body>...</body></html>`.
    pub fn parse_html(markup: &str) -> Result<Document, ParseError> {
        let builder = DocumentBuilder::new().open("html").open("body");
        Ok(build(markup, builder)?.close().close().finish())
    }

    /// The first top-level node.
    pub fn root(&self) -> Option<Node<'_>> {
        self.first_root.map(|id| Node { doc: self, id })
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { doc: self, id })
    }

    /// Every node in document order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        (0..self.nodes.len()).map(move |i| Node {
            doc: self,
            id: NodeId(i),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> Node<'a> {
        Node { doc: self.doc, id }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Element(name) => write!(f, "<{}>#{}", name, self.id.0),
            NodeKind::Text(text) => write!(f, "{:?}#{}", text, self.id.0),
        }
    }
}

impl TreeNode for Node<'_> {
    fn tag(&self) -> Option<&str> {
        match self.kind() {
            NodeKind::Element(name) => Some(name.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn is_text(&self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    fn text(&self) -> Option<&str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element(_) => None,
        }
    }

    fn child(&self) -> Option<Self> {
        self.data().first_child.map(|id| self.at(id))
    }

    fn next(&self) -> Option<Self> {
        self.data().next_sibling.map(|id| self.at(id))
    }
}

// ============ Builder ============

#[derive(Debug, Default)]
struct Level {
    parent: Option<NodeId>,
    last: Option<NodeId>,
}

/// Builds a [`Document`] node by node.
///
/// ```
/// use tagmatch::TreeNode;
/// use tagmatch_doc::DocumentBuilder;
///
/// let doc = DocumentBuilder::new()
///     .open("p")
///     .text("hello")
///     .close()
///     .open("hr")
///     .close()
///     .finish();
///
/// let p = doc.root().unwrap();
/// assert_eq!(p.tag(), Some("p"));
/// assert_eq!(p.child().unwrap().text(), Some("hello"));
/// assert_eq!(p.next().unwrap().tag(), Some("hr"));
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
    top: Level,
    open: Vec<Level>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and make it the parent of what follows.
    pub fn open(mut self, name: impl Into<String>) -> Self {
        let id = self.push(NodeKind::Element(name.into()));
        self.open.push(Level {
            parent: Some(id),
            last: None,
        });
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push(NodeKind::Text(text.into()));
        self
    }

    /// Close the innermost open element. Does nothing at the top level.
    pub fn close(mut self) -> Self {
        self.open.pop();
        self
    }

    /// Finish the document, closing any elements still open.
    pub fn finish(self) -> Document {
        self.doc
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.doc.nodes.len());
        self.doc.nodes.push(NodeData {
            kind,
            first_child: None,
            next_sibling: None,
        });

        let level = self.open.last_mut().unwrap_or(&mut self.top);
        match (level.last, level.parent) {
            (Some(prev), _) => self.doc.nodes[prev.0].next_sibling = Some(id),
            (None, Some(parent)) => self.doc.nodes[parent.0].first_child = Some(id),
            (None, None) => self.doc.first_root = Some(id),
        }
        level.last = Some(id);
        id
    }
}

// ============ Winnow Parsers ============

/// One piece of markup. Nesting is tracked by [`build`], so parsing never
/// recurses however deep the document goes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Open(&'a str),
    Close(&'a str),
    Empty(&'a str),
    Text(&'a str),
}

fn build(markup: &str, mut builder: DocumentBuilder) -> Result<DocumentBuilder, ParseError> {
    let mut input = markup;
    let mut open: Vec<&str> = Vec::new();

    while !input.is_empty() {
        let offset = markup.len() - input.len();
        let syntax_error = ParseError::Syntax { offset };
        builder = match token.parse_next(&mut input).map_err(|_| syntax_error.clone())? {
            Token::Open(name) => {
                open.push(name);
                builder.open(name)
            }
            Token::Close(name) => {
                if open.pop() != Some(name) {
                    return Err(syntax_error);
                }
                builder.close()
            }
            Token::Empty(name) => builder.open(name).close(),
            Token::Text(text) if text.trim().is_empty() => builder,
            Token::Text(text) => builder.text(text),
        };
    }

    if !open.is_empty() {
        return Err(ParseError::Syntax {
            offset: markup.len(),
        });
    }
    Ok(builder)
}

fn token<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    alt((close_tag, open_tag, text_run)).parse_next(input)
}

fn tag_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'
    })
    .parse_next(input)
}

fn text_run<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    take_till(1.., '<').map(Token::Text).parse_next(input)
}

fn open_tag<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    '<'.parse_next(input)?;
    let name = tag_name.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    alt(("/>".value(Token::Empty(name)), '>'.value(Token::Open(name)))).parse_next(input)
}

fn close_tag<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    "</".parse_next(input)?;
    let name = tag_name.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    '>'.parse_next(input)?;
    Ok(Token::Close(name))
}
