//! Node type → provider registry.

use std::collections::HashMap;

use mdhtml_ast::NodeType;

use crate::provider::Provider;

/// Error raised when registering providers.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A provider is already registered for this node type.
    #[error("Provider already registered for {0}")]
    Duplicate(NodeType),
}

/// Immutable-after-construction map from node type to [`Provider`].
///
/// Lookup is by exact type; there is no fallback between entries. Types
/// without an entry are handled by the visitor's structural descent.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: HashMap<NodeType, Provider>,
}

impl ProviderRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard HTML providers.
    #[must_use]
    pub fn html() -> Self {
        let mut registry = Self::new();
        for (kind, provider) in html_providers() {
            let previous = registry.providers.insert(kind, provider);
            debug_assert!(previous.is_none(), "duplicate built-in provider for {kind}");
        }
        registry
    }

    /// Register a provider for a node type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the type already has one.
    pub fn register(&mut self, kind: NodeType, provider: Provider) -> Result<(), RegistryError> {
        if self.providers.contains_key(&kind) {
            return Err(RegistryError::Duplicate(kind));
        }
        self.providers.insert(kind, provider);
        Ok(())
    }

    /// Provider for a node type.
    #[must_use]
    pub fn get(&self, kind: NodeType) -> Option<&Provider> {
        self.providers.get(&kind)
    }

    #[must_use]
    pub fn contains(&self, kind: NodeType) -> bool {
        self.providers.contains_key(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

const HEADINGS: [NodeType; 8] = [
    NodeType::Setext1,
    NodeType::Setext2,
    NodeType::Atx1,
    NodeType::Atx2,
    NodeType::Atx3,
    NodeType::Atx4,
    NodeType::Atx5,
    NodeType::Atx6,
];

fn heading_provider(kind: NodeType) -> Option<(NodeType, Provider)> {
    let level = usize::from(kind.heading_level()?);
    let tag = *HEADING_TAGS.get(level.checked_sub(1)?)?;
    Some((kind, Provider::SimpleTag(tag)))
}

fn html_providers() -> Vec<(NodeType, Provider)> {
    let mut providers = vec![
        (NodeType::Document, Provider::SimpleTag("body")),
        (NodeType::HtmlBlock, Provider::RawHtml),
        (NodeType::HtmlTag, Provider::RawHtml),
        (NodeType::BlockQuote, Provider::SimpleTag("blockquote")),
        (NodeType::OrderedList, Provider::SimpleTag("ol")),
        (NodeType::UnorderedList, Provider::SimpleTag("ul")),
        (NodeType::ListItem, Provider::ListItem),
        (NodeType::SetextContent, Provider::TrimmingTransparent),
        (NodeType::AtxContent, Provider::TrimmingTransparent),
        (NodeType::Autolink, Provider::Autolink),
        (NodeType::EmailAutolink, Provider::EmailAutolink),
        (NodeType::LinkLabel, Provider::transparent(1, -1)),
        (NodeType::LinkTitle, Provider::transparent(1, -1)),
        (NodeType::LinkText, Provider::transparent(1, -1)),
        (NodeType::LinkDestination, Provider::LinkDestination),
        (NodeType::InlineLink, Provider::InlineLink),
        (NodeType::FullReferenceLink, Provider::ReferenceLink),
        (NodeType::ShortReferenceLink, Provider::ReferenceLink),
        (NodeType::LinkDefinition, Provider::Silent),
        (NodeType::Image, Provider::Image),
        (NodeType::CodeFence, Provider::CodeFence),
        (NodeType::CodeBlock, Provider::CodeBlock),
        (NodeType::HorizontalRule, Provider::HorizontalRule),
        (NodeType::HardLineBreak, Provider::HardLineBreak),
        (NodeType::Paragraph, Provider::inline_tag("p")),
        (NodeType::Emph, Provider::delimited("em", 1)),
        (NodeType::Strong, Provider::delimited("strong", 2)),
        (NodeType::CodeSpan, Provider::CodeSpan),
    ];
    providers.extend(HEADINGS.into_iter().filter_map(heading_provider));
    providers
}
