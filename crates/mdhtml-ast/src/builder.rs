//! Cursor-based tree builder.
//!
//! Tokens consume source text from a cursor, so spans never have to be
//! written by hand:
//!
//! ```
//! use mdhtml_ast::{NodeType, TreeBuilder};
//!
//! let source = "Hello *you*";
//! let mut builder = TreeBuilder::new(source);
//! builder
//!     .start_node(NodeType::Paragraph)
//!     .token(NodeType::Text, "Hello ")
//!     .start_node(NodeType::Emph)
//!     .token(NodeType::EmphDelimiter, "*")
//!     .token(NodeType::Text, "you")
//!     .token(NodeType::EmphDelimiter, "*")
//!     .finish_node()
//!     .finish_node();
//! let tree = builder.finish().unwrap();
//!
//! assert_eq!(tree.root().text(source), "Hello *you*");
//! ```

use crate::error::TreeError;
use crate::kind::NodeType;
use crate::tree::{NodeData, NodeId, SyntaxTree, TextRange};

/// Builds a [`SyntaxTree`] in pre-order against a source text.
///
/// Builder methods chain; the first misuse is recorded and reported by
/// [`finish`](Self::finish), later calls are ignored.
pub struct TreeBuilder<'s> {
    source: &'s str,
    offset: usize,
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    error: Option<TreeError>,
}

impl<'s> TreeBuilder<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            nodes: Vec::new(),
            stack: Vec::new(),
            error: None,
        }
    }

    /// Open a composite node at the cursor.
    pub fn start_node(&mut self, kind: NodeType) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        if self.stack.is_empty() && !self.nodes.is_empty() {
            self.error = Some(TreeError::MultipleRoots(kind));
            return self;
        }
        let id = self.push(kind, TextRange::new(self.offset, self.offset));
        self.stack.push(id);
        self
    }

    /// Add a leaf covering `text`, which must be the source at the cursor.
    pub fn token(&mut self, kind: NodeType, text: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        if self.stack.is_empty() {
            self.error = Some(TreeError::TokenWithoutParent(kind));
            return self;
        }
        let rest = self.source.get(self.offset..).unwrap_or_default();
        if !rest.starts_with(text) {
            self.error = Some(TreeError::TokenMismatch {
                kind,
                offset: self.offset,
                expected: text.to_owned(),
            });
            return self;
        }
        let end = self.offset + text.len();
        self.push(kind, TextRange::new(self.offset, end));
        self.offset = end;
        self
    }

    /// Close the innermost open node at the cursor.
    pub fn finish_node(&mut self) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        match self.stack.pop() {
            Some(id) => self.nodes[id.index()].range.end = self.offset,
            None => self.error = Some(TreeError::UnbalancedFinish),
        }
        self
    }

    /// Produce the finished tree.
    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if let Some(&open) = self.stack.last() {
            return Err(TreeError::UnclosedNode(self.nodes[open.index()].kind));
        }
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        Ok(SyntaxTree::from_nodes(self.nodes))
    }

    fn push(&mut self, kind: NodeType, range: TextRange) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let parent = self.stack.last().copied();
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(NodeData {
            kind,
            range,
            parent,
            children: Vec::new(),
        });
        id
    }
}
