//! Traversal visitor that drives providers and accumulates HTML.

use mdhtml_ast::{Node, NodeType, Visitor, walk_children};

use crate::escape::escape_html;
use crate::generator::GeneratorOptions;
use crate::links::LinkMap;
use crate::registry::ProviderRegistry;

/// Depth-first visitor writing into a single output buffer.
///
/// For every node the registry is consulted: a registered provider takes full
/// control of the node (including whether its children are visited), an
/// unregistered node simply has its children visited in order. Fragments are
/// appended strictly in visitation order.
pub struct HtmlVisitor<'a> {
    source: &'a str,
    registry: &'a ProviderRegistry,
    options: &'a GeneratorOptions,
    links: &'a LinkMap,
    output: String,
    warnings: Vec<String>,
}

impl<'a> HtmlVisitor<'a> {
    /// Visitor whose buffer is sized for rendering `capacity` source bytes.
    pub(crate) fn new(
        source: &'a str,
        registry: &'a ProviderRegistry,
        options: &'a GeneratorOptions,
        links: &'a LinkMap,
        capacity: usize,
    ) -> Self {
        Self {
            source,
            registry,
            options,
            links,
            output: String::with_capacity(capacity * 2),
            warnings: Vec::new(),
        }
    }

    /// Source text the tree's spans refer to.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn options(&self) -> &'a GeneratorOptions {
        self.options
    }

    /// Link reference definitions collected from the whole document.
    #[must_use]
    pub fn links(&self) -> &'a LinkMap {
        self.links
    }

    /// Append an HTML fragment to the output.
    pub fn consume_html(&mut self, html: &str) {
        self.output.push_str(html);
    }

    /// Visit a node through the registry.
    pub fn visit(&mut self, node: Node<'_>) {
        self.visit_node(node);
    }

    /// Render a leaf inside inline content.
    ///
    /// A registered provider still wins (inline HTML tags, hard breaks);
    /// otherwise the leaf's escaped text is written.
    pub fn visit_leaf(&mut self, node: Node<'_>) {
        let registry = self.registry;
        match registry.get(node.kind()) {
            Some(provider) => provider.process(self, node),
            None => {
                let text = leaf_text(self.source, node);
                self.consume_html(&text);
            }
        }
    }

    /// Record a diagnostic for degraded output. Never changes the HTML.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Degraded rendering");
        self.warnings.push(message);
    }

    pub(crate) fn finish(self) -> (String, Vec<String>) {
        (self.output, self.warnings)
    }
}

impl Visitor for HtmlVisitor<'_> {
    fn visit_node(&mut self, node: Node<'_>) {
        let registry = self.registry;
        match registry.get(node.kind()) {
            Some(provider) => provider.process(self, node),
            None => {
                tracing::trace!(kind = %node.kind(), "No provider, visiting children");
                walk_children(self, node);
            }
        }
    }
}

/// Text of a leaf as it appears in HTML output.
///
/// Blockquote markers were already consumed by the enclosing quote and render
/// empty; everything else is the escaped source text.
#[must_use]
pub fn leaf_text(source: &str, node: Node<'_>) -> String {
    if node.kind() == NodeType::BlockQuoteMarker {
        return String::new();
    }
    escape_html(node.text(source))
}

/// Escaped text of every leaf under `nodes`, concatenated in order.
///
/// Emphasis delimiters and code span backticks are markup, not text, and are
/// left out.
#[must_use]
pub fn plain_text<'t>(source: &str, nodes: impl IntoIterator<Item = Node<'t>>) -> String {
    let mut text = String::new();
    for node in nodes {
        for leaf in node.descendants().filter(|n| n.is_leaf()) {
            if matches!(leaf.kind(), NodeType::EmphDelimiter | NodeType::Backtick) {
                continue;
            }
            text.push_str(&leaf_text(source, leaf));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use mdhtml_ast::TreeBuilder;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_leaf_text_escapes() {
        let source = "a<b";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::Paragraph)
            .token(NodeType::Text, "a<b")
            .finish_node();
        let tree = builder.finish().unwrap();
        let leaf = tree.root().first_child().unwrap();
        assert_eq!(leaf_text(source, leaf), "a&lt;b");
    }

    #[test]
    fn test_leaf_text_drops_quote_marker() {
        let source = "> x";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::Paragraph)
            .token(NodeType::BlockQuoteMarker, ">")
            .token(NodeType::Text, " x")
            .finish_node();
        let tree = builder.finish().unwrap();
        assert_eq!(plain_text(source, tree.root().children()), " x");
    }

    #[test]
    fn test_plain_text_skips_inline_markup() {
        let source = "*a* `b`";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::Paragraph)
            .start_node(NodeType::Emph)
            .token(NodeType::EmphDelimiter, "*")
            .token(NodeType::Text, "a")
            .token(NodeType::EmphDelimiter, "*")
            .finish_node()
            .token(NodeType::Whitespace, " ")
            .start_node(NodeType::CodeSpan)
            .token(NodeType::Backtick, "`")
            .token(NodeType::Text, "b")
            .token(NodeType::Backtick, "`")
            .finish_node()
            .finish_node();
        let tree = builder.finish().unwrap();
        assert_eq!(plain_text(source, tree.root().children()), "a b");
    }

    #[test]
    fn test_unregistered_node_descends_without_output() {
        let source = "ab";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::Document)
            .start_node(NodeType::Emph)
            .token(NodeType::Text, "a")
            .finish_node()
            .start_node(NodeType::Paragraph)
            .token(NodeType::Text, "b")
            .finish_node()
            .finish_node();
        let tree = builder.finish().unwrap();

        let mut registry = ProviderRegistry::new();
        registry
            .register(NodeType::Paragraph, crate::Provider::inline_tag("p"))
            .unwrap();
        let options = GeneratorOptions::default();
        let links = LinkMap::default();
        let mut visitor = HtmlVisitor::new(source, &registry, &options, &links, source.len());
        visitor.visit(tree.root());

        let (html, warnings) = visitor.finish();
        assert_eq!(html, "<p>b</p>");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_buffer_sized_from_capacity() {
        let source = "x".repeat(1000);
        let registry = ProviderRegistry::new();
        let options = GeneratorOptions::default();
        let links = LinkMap::default();
        let visitor = HtmlVisitor::new(&source, &registry, &options, &links, 2);
        assert!(visitor.output.capacity() < source.len());
    }
}
