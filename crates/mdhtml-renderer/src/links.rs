//! Link reference definitions.

use std::collections::HashMap;

use mdhtml_ast::{Node, NodeType};

use crate::handlers::{destination_text, inner_text, title_text};

/// Resolved target of a reference link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReference {
    /// Raw destination, not yet escaped.
    pub destination: String,
    /// Escaped title text, ready for an attribute value.
    pub title: Option<String>,
}

/// Label → target map collected from `link_definition` nodes.
///
/// Labels match case-insensitively with internal whitespace collapsed. When
/// a label is defined more than once the first definition wins.
#[derive(Clone, Debug, Default)]
pub struct LinkMap {
    definitions: HashMap<String, LinkReference>,
}

impl LinkMap {
    /// Collect every definition under `root`.
    #[must_use]
    pub fn collect(root: Node<'_>, source: &str) -> Self {
        let mut map = Self::default();
        for definition in root
            .descendants()
            .filter(|node| node.kind() == NodeType::LinkDefinition)
        {
            let Some(label) = definition.find_child_of_type(NodeType::LinkLabel) else {
                tracing::debug!(range = %definition.range(), "Link definition without label");
                continue;
            };
            let reference = LinkReference {
                destination: definition
                    .find_child_of_type(NodeType::LinkDestination)
                    .map(|node| destination_text(source, node))
                    .unwrap_or_default(),
                title: definition
                    .find_child_of_type(NodeType::LinkTitle)
                    .map(|node| title_text(source, node)),
            };
            map.definitions
                .entry(normalize_label(inner_text(source, label)))
                .or_insert(reference);
        }
        map
    }

    /// Target for a label, matched after normalization.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&LinkReference> {
        self.definitions.get(&normalize_label(label))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Trim, collapse internal whitespace runs to one space, and case-fold.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use mdhtml_ast::TreeBuilder;
    use pretty_assertions::assert_eq;

    use super::*;

    fn definition(builder: &mut TreeBuilder<'_>, label: &str, url: &str) {
        builder
            .start_node(NodeType::LinkDefinition)
            .start_node(NodeType::LinkLabel)
            .token(NodeType::LBracket, "[")
            .token(NodeType::Text, label)
            .token(NodeType::RBracket, "]")
            .finish_node()
            .token(NodeType::Colon, ":")
            .token(NodeType::Whitespace, " ")
            .start_node(NodeType::LinkDestination)
            .token(NodeType::Text, url)
            .finish_node()
            .finish_node();
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Foo \n  Bar "), "foo bar");
        assert_eq!(normalize_label("ÄB"), "äb");
    }

    #[test]
    fn test_collect_first_definition_wins() {
        let source = "[Foo]: /one\n[foo]: /two";
        let mut builder = TreeBuilder::new(source);
        builder.start_node(NodeType::Document);
        definition(&mut builder, "Foo", "/one");
        builder.token(NodeType::Eol, "\n");
        definition(&mut builder, "foo", "/two");
        builder.finish_node();
        let tree = builder.finish().unwrap();

        let map = LinkMap::collect(tree.root(), source);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("FOO"),
            Some(&LinkReference {
                destination: "/one".to_owned(),
                title: None,
            })
        );
        assert!(map.get("bar").is_none());
    }

    #[test]
    fn test_collect_title() {
        let source = r#"[a]: <b c> "T&x""#;
        let mut builder = TreeBuilder::new(source);
        builder
            .start_node(NodeType::LinkDefinition)
            .start_node(NodeType::LinkLabel)
            .token(NodeType::LBracket, "[")
            .token(NodeType::Text, "a")
            .token(NodeType::RBracket, "]")
            .finish_node()
            .token(NodeType::Colon, ":")
            .token(NodeType::Whitespace, " ")
            .start_node(NodeType::LinkDestination)
            .token(NodeType::Lt, "<")
            .token(NodeType::Text, "b c")
            .token(NodeType::Gt, ">")
            .finish_node()
            .token(NodeType::Whitespace, " ")
            .start_node(NodeType::LinkTitle)
            .token(NodeType::DoubleQuote, "\"")
            .token(NodeType::Text, "T&x")
            .token(NodeType::DoubleQuote, "\"")
            .finish_node()
            .finish_node();
        let tree = builder.finish().unwrap();

        let map = LinkMap::collect(tree.root(), source);
        let reference = map.get("a").unwrap();
        assert_eq!(reference.destination, "b c");
        assert_eq!(reference.title.as_deref(), Some("T&amp;x"));
    }
}
