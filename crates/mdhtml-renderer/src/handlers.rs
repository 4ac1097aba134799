//! Handlers for constructs that need more than a tag pair.

use std::fmt::Write;

use mdhtml_ast::{Node, NodeType};

use crate::escape::escape_html;
use crate::generator::GeneratorOptions;
use crate::indent::trim_indents;
use crate::provider::inline_holder;
use crate::range::ChildRange;
use crate::visitor::{HtmlVisitor, leaf_text, plain_text};

/// Columns stripped from each line of an indented code block.
const CODE_BLOCK_INDENT: usize = 4;

/// Child range of a link destination: `<url>` drops the angle brackets.
pub(crate) fn destination_range(node: Node<'_>) -> ChildRange {
    match node.first_child() {
        Some(first) if first.kind() == NodeType::Lt => ChildRange::new(1, -1),
        _ => ChildRange::ALL,
    }
}

/// Raw destination URL without angle brackets.
pub(crate) fn destination_text(source: &str, node: Node<'_>) -> String {
    if node.is_leaf() {
        let raw = node.text(source);
        return raw
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(raw)
            .to_owned();
    }
    destination_range(node)
        .select(node)
        .map(|child| child.text(source))
        .collect()
}

/// Raw source between the first and last child, or the node's own text with
/// its delimiters stripped when it has no inner children.
pub(crate) fn inner_text<'s>(source: &'s str, node: Node<'_>) -> &'s str {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) if node.child_count() >= 2 => source
            .get(first.range().end..last.range().start)
            .unwrap_or_default(),
        _ => strip_delimiters(node.text(source)),
    }
}

/// Escaped title text without its quotes.
pub(crate) fn title_text(source: &str, node: Node<'_>) -> String {
    inner_plain_text(source, node)
}

/// Escaped text inside a delimited node (`[..]`, `".."`, `(..)`).
fn inner_plain_text(source: &str, node: Node<'_>) -> String {
    if node.child_count() >= 2 {
        plain_text(source, ChildRange::new(1, -1).select(node))
    } else {
        escape_html(strip_delimiters(node.text(source)))
    }
}

fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return text;
    };
    let matched = matches!(
        (first, last),
        ('[', ']') | ('<', '>') | ('(', ')') | ('"', '"') | ('\'', '\'')
    );
    if matched {
        &text[first.len_utf8()..text.len() - last.len_utf8()]
    } else {
        text
    }
}

fn anchor_open(href: &str, title: Option<&str>) -> String {
    let mut html = format!(r#"<a href="{}""#, escape_html(href));
    if let Some(title) = title {
        write!(html, r#" title="{title}""#).unwrap();
    }
    html.push('>');
    html
}

pub(crate) fn autolink(visitor: &mut HtmlVisitor<'_>, node: Node<'_>, scheme: &str) {
    let raw = node.text(visitor.source());
    let target = raw
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(raw);
    let target = escape_html(target);
    visitor.consume_html(&format!(r#"<a href="{scheme}{target}">{target}</a>"#));
}

pub(crate) fn code_span(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let source = visitor.source();
    let content = if node.is_leaf() {
        escape_html(node.text(source).trim_matches('`'))
    } else {
        ChildRange::new(1, -1)
            .select(node)
            .map(|child| leaf_text(source, child))
            .collect()
    };
    visitor.consume_html(&format!("<code>{}</code>", content.trim()));
}

pub(crate) fn code_block(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let source = visitor.source();
    let tab_width = visitor.options().tab_width;

    // Raw block text without blockquote markers, de-indented line by line.
    let raw: String = node
        .descendants()
        .filter(|n| n.is_leaf() && n.kind() != NodeType::BlockQuoteMarker)
        .map(|n| n.text(source))
        .collect();
    let content = trim_indents(&raw, CODE_BLOCK_INDENT, tab_width);

    visitor.consume_html("<pre><code>");
    visitor.consume_html(&escape_html(&content));
    visitor.consume_html("\n</code></pre>");
}

pub(crate) fn code_fence(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let source = visitor.source();
    let options = visitor.options();
    let indent = node.text(source).chars().take_while(|&c| c == ' ').count();

    let mut children: Vec<Node<'_>> = node.children().collect();
    if children
        .last()
        .is_some_and(|last| last.kind() == NodeType::CodeFenceEnd)
    {
        children.pop();
    }

    let mut language = None;
    let mut opened = false;
    let mut last_was_content = false;
    for child in children {
        if opened {
            match child.kind() {
                NodeType::CodeFenceContent => {
                    let line = trim_indents(child.text(source), indent, options.tab_width);
                    visitor.consume_html(&escape_html(&line));
                    last_was_content = true;
                }
                NodeType::Eol => {
                    visitor.consume_html("\n");
                    last_was_content = false;
                }
                _ => {}
            }
            continue;
        }
        match child.kind() {
            NodeType::FenceLang => {
                language = child.text(source).split_whitespace().next();
            }
            NodeType::Eol => {
                visitor.consume_html(&code_open_tag(language, options));
                opened = true;
            }
            _ => {}
        }
    }

    if !opened {
        visitor.consume_html(&code_open_tag(language, options));
    }
    if last_was_content {
        visitor.consume_html("\n");
    }
    visitor.consume_html("</code></pre>");
}

fn code_open_tag(language: Option<&str>, options: &GeneratorOptions) -> String {
    match language {
        Some(language) if options.code_language_class => format!(
            r#"<pre><code class="{}">"#,
            escape_html(&format!("{}{language}", options.language_class_prefix))
        ),
        _ => "<pre><code>".to_owned(),
    }
}

pub(crate) fn list_item(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let loose = node.parent().is_some_and(is_loose_list);

    visitor.consume_html("<li>");
    for child in node.children() {
        if child.kind() == NodeType::Paragraph && !loose {
            inline_holder(visitor, child.children(), "", "");
        } else {
            visitor.visit(child);
        }
    }
    visitor.consume_html("</li>");
}

/// A list is loose when the list or any item separates two blocks with a
/// blank line.
fn is_loose_list(list: Node<'_>) -> bool {
    has_loose_content(list)
        || list
            .children()
            .filter(|child| child.kind() == NodeType::ListItem)
            .any(has_loose_content)
}

fn has_loose_content(node: Node<'_>) -> bool {
    let mut newlines = 0;
    let mut seen_content = false;
    for child in node.children() {
        match child.kind() {
            NodeType::Eol => newlines += 1,
            NodeType::ListBullet
            | NodeType::ListNumber
            | NodeType::Whitespace
            | NodeType::BlockQuoteMarker => {}
            _ => {
                if seen_content && newlines > 1 {
                    return true;
                }
                seen_content = true;
                newlines = 0;
            }
        }
    }
    false
}

pub(crate) fn inline_link(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let source = visitor.source();
    let href = if let Some(destination) = node.find_child_of_type(NodeType::LinkDestination) {
        destination_text(source, destination)
    } else {
        visitor.warn(format!("Inline link at {} has no destination", node.range()));
        String::new()
    };
    let title = node
        .find_child_of_type(NodeType::LinkTitle)
        .map(|title| title_text(source, title));

    visitor.consume_html(&anchor_open(&href, title.as_deref()));
    if let Some(text) = node.find_child_of_type(NodeType::LinkText) {
        visitor.visit(text);
    }
    visitor.consume_html("</a>");
}

/// Label used to resolve a full or short reference link.
fn reference_label<'s>(source: &'s str, node: Node<'_>) -> Option<&'s str> {
    let label = inner_text(source, node.find_child_of_type(NodeType::LinkLabel)?);
    if label.trim().is_empty() && node.kind() == NodeType::FullReferenceLink {
        // `[text][]` uses the link text as its label
        return node
            .find_child_of_type(NodeType::LinkText)
            .map(|text| inner_text(source, text));
    }
    Some(label)
}

pub(crate) fn reference_link(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let source = visitor.source();
    let links = visitor.links();

    let Some(reference) = reference_label(source, node).and_then(|label| links.get(label)) else {
        visitor.warn(format!(
            "Unresolved link reference {}",
            node.text(source).trim()
        ));
        visitor.consume_html(&escape_html(node.text(source)));
        return;
    };

    let content = if node.kind() == NodeType::FullReferenceLink {
        node.find_child_of_type(NodeType::LinkText)
    } else {
        node.find_child_of_type(NodeType::LinkLabel)
    };

    visitor.consume_html(&anchor_open(
        &reference.destination,
        reference.title.as_deref(),
    ));
    if let Some(content) = content {
        visitor.visit(content);
    }
    visitor.consume_html("</a>");
}

pub(crate) fn image(visitor: &mut HtmlVisitor<'_>, node: Node<'_>) {
    let source = visitor.source();
    let link = node.children().find(|child| {
        matches!(
            child.kind(),
            NodeType::InlineLink | NodeType::FullReferenceLink | NodeType::ShortReferenceLink
        )
    });
    let Some(link) = link else {
        visitor.warn(format!("Image at {} has no link", node.range()));
        visitor.consume_html(&escape_html(node.text(source)));
        return;
    };

    let (src, title, alt_node) = if link.kind() == NodeType::InlineLink {
        let src = link
            .find_child_of_type(NodeType::LinkDestination)
            .map(|destination| destination_text(source, destination))
            .unwrap_or_default();
        let title = link
            .find_child_of_type(NodeType::LinkTitle)
            .map(|title| title_text(source, title));
        (src, title, link.find_child_of_type(NodeType::LinkText))
    } else {
        let links = visitor.links();
        let Some(reference) = reference_label(source, link).and_then(|label| links.get(label))
        else {
            visitor.warn(format!(
                "Unresolved image reference {}",
                node.text(source).trim()
            ));
            visitor.consume_html(&escape_html(node.text(source)));
            return;
        };
        let alt_node = if link.kind() == NodeType::FullReferenceLink {
            link.find_child_of_type(NodeType::LinkText)
        } else {
            link.find_child_of_type(NodeType::LinkLabel)
        };
        (reference.destination.clone(), reference.title.clone(), alt_node)
    };

    let alt = alt_node
        .map(|alt| inner_plain_text(source, alt))
        .unwrap_or_default();
    let mut html = format!(r#"<img src="{}" alt="{alt}""#, escape_html(&src));
    if let Some(title) = title {
        write!(html, r#" title="{title}""#).unwrap();
    }
    html.push_str(" />");
    visitor.consume_html(&html);
}

#[cfg(test)]
mod tests {
    use mdhtml_ast::TreeBuilder;

    use super::*;

    #[test]
    fn test_strip_delimiters() {
        assert_eq!(strip_delimiters("[a]"), "a");
        assert_eq!(strip_delimiters("\"t\""), "t");
        assert_eq!(strip_delimiters("(x)"), "x");
        assert_eq!(strip_delimiters("[a)"), "[a)");
        assert_eq!(strip_delimiters("["), "[");
        assert_eq!(strip_delimiters(""), "");
    }

    #[test]
    fn test_destination_text_angle_brackets() {
        let source = "<a b>";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::LinkDestination)
            .token(NodeType::Lt, "<")
            .token(NodeType::Text, "a")
            .token(NodeType::Whitespace, " ")
            .token(NodeType::Text, "b")
            .token(NodeType::Gt, ">")
            .finish_node();
        let tree = builder.finish().unwrap();
        assert_eq!(destination_text(source, tree.root()), "a b");
    }

    #[test]
    fn test_destination_text_leaf() {
        let source = "<http://x>";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::InlineLink)
            .token(NodeType::LinkDestination, source)
            .finish_node();
        let tree = builder.finish().unwrap();
        let destination = tree.root().first_child().unwrap();
        assert_eq!(destination_text(source, destination), "http://x");
    }

    #[test]
    fn test_loose_list_detection() {
        let source = "- a\n\n- b";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::UnorderedList)
            .start_node(NodeType::ListItem)
            .token(NodeType::ListBullet, "- ")
            .start_node(NodeType::Paragraph)
            .token(NodeType::Text, "a")
            .finish_node()
            .finish_node()
            .token(NodeType::Eol, "\n")
            .token(NodeType::Eol, "\n")
            .start_node(NodeType::ListItem)
            .token(NodeType::ListBullet, "- ")
            .start_node(NodeType::Paragraph)
            .token(NodeType::Text, "b")
            .finish_node()
            .finish_node()
            .finish_node();
        let tree = builder.finish().unwrap();
        assert!(is_loose_list(tree.root()));
    }

    #[test]
    fn test_tight_list_detection() {
        let source = "- a\n- b";
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::UnorderedList)
            .start_node(NodeType::ListItem)
            .token(NodeType::ListBullet, "- ")
            .start_node(NodeType::Paragraph)
            .token(NodeType::Text, "a")
            .finish_node()
            .finish_node()
            .token(NodeType::Eol, "\n")
            .start_node(NodeType::ListItem)
            .token(NodeType::ListBullet, "- ")
            .start_node(NodeType::Paragraph)
            .token(NodeType::Text, "b")
            .finish_node()
            .finish_node()
            .finish_node();
        let tree = builder.finish().unwrap();
        assert!(!is_loose_list(tree.root()));
    }
}
