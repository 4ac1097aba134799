//! Rendering strategies.
//!
//! Most node types are rendered by one of three shapes:
//!
//! - **open/close**: opening fragment, every child visited, closing fragment
//! - **non-recursive**: one computed fragment, children never visited
//! - **inline holder**: opening fragment, a sub-range of children rendered
//!   as escaped leaf text or visited, closing fragment
//!
//! [`Provider`] carries the shape plus its static parameters (tag name,
//! child range). Constructs that need more than a tag pair dispatch to the
//! handlers in [`crate::handlers`].

use std::fmt;

use mdhtml_ast::{Node, NodeType};

use crate::handlers;
use crate::range::ChildRange;
use crate::visitor::HtmlVisitor;

/// Application-defined rendering strategy.
///
/// Implementations must be stateless with respect to a render: the same
/// provider is shared by every render that uses its registry.
pub trait GeneratingProvider: fmt::Debug + Send + Sync {
    fn process(&self, visitor: &mut HtmlVisitor<'_>, node: Node<'_>);
}

/// Rendering strategy registered for one node type.
#[derive(Debug)]
pub enum Provider {
    /// `<tag>`, all children visited, `</tag>`.
    SimpleTag(&'static str),
    /// `<tag>` around a child sub-range; an empty tag renders no wrapper.
    InlineTag {
        tag: &'static str,
        range: ChildRange,
    },
    /// `<tag>` around the children left after dropping up to `markers`
    /// delimiter tokens from each end.
    Delimited {
        tag: &'static str,
        markers: usize,
    },
    /// Transparent holder that skips leading and trailing whitespace tokens.
    TrimmingTransparent,
    /// Link destination, angle brackets stripped when present.
    LinkDestination,
    /// Raw source text, unescaped.
    RawHtml,
    /// `<hr />`.
    HorizontalRule,
    /// `<br />`.
    HardLineBreak,
    /// `<a href="X">X</a>` for `<X>`.
    Autolink,
    /// `<a href="mailto:X">X</a>` for `<X>`.
    EmailAutolink,
    /// `<code>` around the trimmed, escaped text between the backticks.
    CodeSpan,
    /// Indented code block.
    CodeBlock,
    /// Fenced code block.
    CodeFence,
    /// `<li>` with tight-list paragraph unwrapping.
    ListItem,
    /// `<a href title>` built from destination and title children.
    InlineLink,
    /// Full and short reference links resolved through the link map.
    ReferenceLink,
    /// `<img>` built from the nested link.
    Image,
    /// Renders nothing.
    Silent,
    /// Application-defined strategy.
    Custom(Box<dyn GeneratingProvider>),
}

impl Provider {
    /// Inline holder with a literal tag over every child.
    #[must_use]
    pub const fn inline_tag(tag: &'static str) -> Self {
        Self::InlineTag {
            tag,
            range: ChildRange::ALL,
        }
    }

    /// Inline holder with a literal tag over a child sub-range.
    #[must_use]
    pub const fn sliced_tag(tag: &'static str, start: isize, end: isize) -> Self {
        Self::InlineTag {
            tag,
            range: ChildRange::new(start, end),
        }
    }

    /// Inline holder without a wrapper over a child sub-range.
    #[must_use]
    pub const fn transparent(start: isize, end: isize) -> Self {
        Self::sliced_tag("", start, end)
    }

    /// Emphasis-style tag; a run of markers may be one token or one per
    /// character.
    #[must_use]
    pub const fn delimited(tag: &'static str, markers: usize) -> Self {
        Self::Delimited { tag, markers }
    }

    /// Render `node` into the visitor's output.
    pub fn process(&self, visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
        match self {
            Self::SimpleTag(tag) => {
                open_close(visitor, node, &format!("<{tag}>"), &format!("</{tag}>"));
            }
            Self::InlineTag { tag, range } => {
                let (open, close) = tag_pair(tag);
                inline_holder(visitor, range.select(node), &open, &close);
            }
            Self::Delimited { tag, markers } => {
                let (open, close) = tag_pair(tag);
                inline_holder(visitor, delimited_children(node, *markers), &open, &close);
            }
            Self::TrimmingTransparent => {
                inline_holder(visitor, trimmed_children(node), "", "");
            }
            Self::LinkDestination => {
                inline_holder(visitor, handlers::destination_range(node).select(node), "", "");
            }
            Self::RawHtml => {
                let raw = node.text(visitor.source());
                visitor.consume_html(raw);
            }
            Self::HorizontalRule => visitor.consume_html("<hr />"),
            Self::HardLineBreak => visitor.consume_html("<br />"),
            Self::Autolink => handlers::autolink(visitor, node, ""),
            Self::EmailAutolink => handlers::autolink(visitor, node, "mailto:"),
            Self::CodeSpan => handlers::code_span(visitor, node),
            Self::CodeBlock => handlers::code_block(visitor, node),
            Self::CodeFence => handlers::code_fence(visitor, node),
            Self::ListItem => handlers::list_item(visitor, node),
            Self::InlineLink => handlers::inline_link(visitor, node),
            Self::ReferenceLink => handlers::reference_link(visitor, node),
            Self::Image => handlers::image(visitor, node),
            Self::Silent => {}
            Self::Custom(provider) => provider.process(visitor, node),
        }
    }
}

/// Opening fragment, every child visited, closing fragment.
pub fn open_close(visitor: &mut HtmlVisitor<'_>, node: Node<'_>, open: &str, close: &str) {
    visitor.consume_html(open);
    for child in node.children() {
        visitor.visit(child);
    }
    visitor.consume_html(close);
}

/// Opening fragment, selected children as inline content, closing fragment.
///
/// Leaves render as escaped text unless a provider is registered for them;
/// composite children are visited.
pub fn inline_holder<'t>(
    visitor: &mut HtmlVisitor<'_>,
    children: impl IntoIterator<Item = Node<'t>>,
    open: &str,
    close: &str,
) {
    visitor.consume_html(open);
    for child in children {
        if child.is_leaf() {
            visitor.visit_leaf(child);
        } else {
            visitor.visit(child);
        }
    }
    visitor.consume_html(close);
}

/// Children of `node` without leading and trailing whitespace tokens.
pub fn trimmed_children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> + use<'t> {
    let children: Vec<Node<'t>> = node.children().collect();
    let start = children
        .iter()
        .position(|child| !child.kind().is_whitespace())
        .unwrap_or(children.len());
    let end = children
        .iter()
        .rposition(|child| !child.kind().is_whitespace())
        .map_or(start, |last| last + 1);
    children.into_iter().take(end).skip(start)
}

/// Children of `node` without up to `markers` leading and trailing
/// emphasis delimiter tokens.
pub fn delimited_children<'t>(
    node: Node<'t>,
    markers: usize,
) -> impl Iterator<Item = Node<'t>> + use<'t> {
    let children: Vec<Node<'t>> = node.children().collect();
    let leading = children
        .iter()
        .take(markers)
        .take_while(|child| child.kind() == NodeType::EmphDelimiter)
        .count();
    let trailing = children[leading..]
        .iter()
        .rev()
        .take(markers)
        .take_while(|child| child.kind() == NodeType::EmphDelimiter)
        .count();
    let end = children.len() - trailing;
    children.into_iter().take(end).skip(leading)
}

fn tag_pair(tag: &str) -> (String, String) {
    if tag.is_empty() {
        (String::new(), String::new())
    } else {
        (format!("<{tag}>"), format!("</{tag}>"))
    }
}

#[cfg(test)]
mod tests {
    use mdhtml_ast::TreeBuilder;
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str, tokens: &[(NodeType, &str)], markers: usize) -> Vec<NodeType> {
        let mut builder = TreeBuilder::new(source);
        builder.start_node(NodeType::Strong);
        for (kind, text) in tokens {
            builder.token(*kind, text);
        }
        builder.finish_node();
        let tree = builder.finish().unwrap();
        delimited_children(tree.root(), markers)
            .map(Node::kind)
            .collect()
    }

    #[test]
    fn test_delimited_children_one_token_per_marker() {
        let tokens = [
            (NodeType::EmphDelimiter, "*"),
            (NodeType::EmphDelimiter, "*"),
            (NodeType::Text, "a"),
            (NodeType::EmphDelimiter, "*"),
            (NodeType::EmphDelimiter, "*"),
        ];
        assert_eq!(kinds("**a**", &tokens, 2), vec![NodeType::Text]);
    }

    #[test]
    fn test_delimited_children_one_token_per_run() {
        let tokens = [
            (NodeType::EmphDelimiter, "**"),
            (NodeType::Text, "a"),
            (NodeType::EmphDelimiter, "**"),
        ];
        assert_eq!(kinds("**a**", &tokens, 2), vec![NodeType::Text]);
    }

    #[test]
    fn test_delimited_children_keeps_inner_delimiters() {
        let tokens = [
            (NodeType::EmphDelimiter, "*"),
            (NodeType::EmphDelimiter, "*"),
            (NodeType::Text, "a"),
            (NodeType::EmphDelimiter, "*"),
        ];
        assert_eq!(
            kinds("**a*", &tokens, 1),
            vec![NodeType::EmphDelimiter, NodeType::Text]
        );
    }

    #[test]
    fn test_delimited_children_only_delimiters() {
        let tokens = [(NodeType::EmphDelimiter, "*")];
        assert_eq!(kinds("*", &tokens, 2), Vec::<NodeType>::new());
    }
}
