//! Arena-backed syntax tree and node cursors.

use std::fmt;

use crate::kind::NodeType;

/// Byte span of a node in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl TextRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Stable identity of a node inside one [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeType,
    pub(crate) range: TextRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Immutable syntax tree.
///
/// Nodes are stored in pre-order; the root is always the first node. Trees
/// are only created through [`TreeBuilder`](crate::TreeBuilder) or
/// [`TreeDocument`](crate::TreeDocument), both of which guarantee a root
/// exists and every span lies within the source text.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub(crate) fn from_nodes(nodes: Vec<NodeData>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Node with the given identity, if it belongs to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Copyable cursor pointing at one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> NodeType {
        self.tree.data(self.id).kind
    }

    #[must_use]
    pub fn range(self) -> TextRange {
        self.tree.data(self.id).range
    }

    /// Children in source order.
    #[must_use]
    pub fn children(self) -> Children<'t> {
        Children {
            tree: self.tree,
            ids: self.tree.data(self.id).children.iter(),
        }
    }

    #[must_use]
    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    #[must_use]
    pub fn child(self, index: usize) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .children
            .get(index)
            .map(|&id| self.with_id(id))
    }

    #[must_use]
    pub fn first_child(self) -> Option<Node<'t>> {
        self.child(0)
    }

    #[must_use]
    pub fn last_child(self) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .children
            .last()
            .map(|&id| self.with_id(id))
    }

    #[must_use]
    pub fn parent(self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| self.with_id(id))
    }

    /// A leaf has no children and stands for literal source text.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        self.tree.data(self.id).children.is_empty()
    }

    /// Source substring covered by this node.
    ///
    /// Returns an empty string if `source` is not the text the tree was built
    /// against and the span does not fit.
    #[must_use]
    pub fn text<'s>(self, source: &'s str) -> &'s str {
        let range = self.range();
        source.get(range.start..range.end).unwrap_or_default()
    }

    /// First direct child with the given type.
    #[must_use]
    pub fn find_child_of_type(self, kind: NodeType) -> Option<Node<'t>> {
        self.children().find(|child| child.kind() == kind)
    }

    /// First descendant (pre-order, excluding `self`) with the given type.
    #[must_use]
    pub fn find_descendant_of_type(self, kind: NodeType) -> Option<Node<'t>> {
        self.descendants().skip(1).find(|node| node.kind() == kind)
    }

    /// Pre-order iterator over this node and everything below it.
    #[must_use]
    pub fn descendants(self) -> Descendants<'t> {
        Descendants { stack: vec![self] }
    }

    /// Dispatch this node to a visitor.
    pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) {
        visitor.visit_node(self);
    }

    fn with_id(self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind(), self.range())
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

/// Iterator over the direct children of a node.
#[derive(Clone)]
pub struct Children<'t> {
    tree: &'t SyntaxTree,
    ids: std::slice::Iter<'t, NodeId>,
}

impl<'t> Iterator for Children<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| Node {
            tree: self.tree,
            id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| Node {
            tree: self.tree,
            id,
        })
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Pre-order iterator over a subtree.
pub struct Descendants<'t> {
    stack: Vec<Node<'t>>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

/// Tree visitor.
///
/// The default implementation descends into every child in order and does
/// nothing else.
pub trait Visitor {
    fn visit_node(&mut self, node: Node<'_>) {
        walk_children(self, node);
    }
}

/// Visit every child of `node` in order.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: Node<'_>) {
    for child in node.children() {
        child.accept(visitor);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TreeBuilder;

    fn sample() -> (&'static str, SyntaxTree) {
        let source = "*a* b";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::Document)
            .start_node(NodeType::Paragraph)
            .start_node(NodeType::Emph)
            .token(NodeType::EmphDelimiter, "*")
            .token(NodeType::Text, "a")
            .token(NodeType::EmphDelimiter, "*")
            .finish_node()
            .token(NodeType::Whitespace, " ")
            .token(NodeType::Text, "b")
            .finish_node()
            .finish_node();
        (source, builder.finish().unwrap())
    }

    #[test]
    fn test_navigation() {
        let (source, tree) = sample();
        let root = tree.root();
        assert_eq!(root.kind(), NodeType::Document);
        assert!(root.parent().is_none());

        let paragraph = root.first_child().unwrap();
        assert_eq!(paragraph.child_count(), 3);
        assert_eq!(paragraph.parent(), Some(root));

        let emph = paragraph.child(0).unwrap();
        assert_eq!(emph.text(source), "*a*");
        assert!(!emph.is_leaf());
        assert_eq!(emph.last_child().unwrap().kind(), NodeType::EmphDelimiter);
        assert_eq!(paragraph.last_child().unwrap().text(source), "b");
        assert!(paragraph.child(3).is_none());
    }

    #[test]
    fn test_find_child_and_descendant() {
        let (source, tree) = sample();
        let root = tree.root();
        assert!(root.find_child_of_type(NodeType::Emph).is_none());
        let emph = root.find_descendant_of_type(NodeType::Emph).unwrap();
        assert_eq!(emph.range(), TextRange::new(0, 3));
        let text = root.find_descendant_of_type(NodeType::Text).unwrap();
        assert_eq!(text.text(source), "a");
    }

    #[test]
    fn test_descendants_pre_order() {
        let (_, tree) = sample();
        let kinds: Vec<NodeType> = tree.root().descendants().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeType::Document,
                NodeType::Paragraph,
                NodeType::Emph,
                NodeType::EmphDelimiter,
                NodeType::Text,
                NodeType::EmphDelimiter,
                NodeType::Whitespace,
                NodeType::Text,
            ]
        );
    }

    #[test]
    fn test_children_reversed() {
        let (source, tree) = sample();
        let paragraph = tree.root().first_child().unwrap();
        let texts: Vec<&str> = paragraph.children().rev().map(|n| n.text(source)).collect();
        assert_eq!(texts, vec!["b", " ", "*a*"]);
    }

    #[test]
    fn test_default_visitor_descends() {
        struct LeafCollector<'s> {
            source: &'s str,
            leaves: Vec<String>,
        }

        impl Visitor for LeafCollector<'_> {
            fn visit_node(&mut self, node: Node<'_>) {
                if node.is_leaf() {
                    self.leaves.push(node.text(self.source).to_owned());
                } else {
                    walk_children(self, node);
                }
            }
        }

        let (source, tree) = sample();
        let mut collector = LeafCollector {
            source,
            leaves: Vec::new(),
        };
        tree.root().accept(&mut collector);
        assert_eq!(collector.leaves, vec!["*", "a", "*", " ", "b"]);
    }

    #[test]
    fn test_text_with_foreign_source_is_empty() {
        let (_, tree) = sample();
        assert_eq!(tree.root().text("x"), "");
    }

    #[test]
    fn test_node_lookup_by_id() {
        let (_, tree) = sample();
        let emph = tree.root().find_descendant_of_type(NodeType::Emph).unwrap();
        assert_eq!(tree.node(emph.id()), Some(emph));
        assert_eq!(tree.len(), 8);
    }
}
