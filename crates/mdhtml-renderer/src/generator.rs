//! HTML generator entry point.

use std::sync::LazyLock;

use mdhtml_ast::{Node, SyntaxTree};

use crate::links::LinkMap;
use crate::registry::ProviderRegistry;
use crate::visitor::HtmlVisitor;

static HTML_PROVIDERS: LazyLock<ProviderRegistry> = LazyLock::new(ProviderRegistry::html);

/// Rendering options that do not change the node → provider mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Emit `class="<prefix><lang>"` on fenced code with an info string.
    pub code_language_class: bool,
    /// Prefix for the fenced code language class.
    pub language_class_prefix: String,
    /// Tab stop used when stripping code indentation.
    pub tab_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            code_language_class: true,
            language_class_prefix: "language-".to_owned(),
            tab_width: 4,
        }
    }
}

/// Output of a render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Degraded constructs encountered during the render.
    ///
    /// Warnings never affect `html`.
    pub warnings: Vec<String>,
}

/// Renders a syntax tree to HTML.
///
/// Each render owns a fresh output buffer; the registry and options are only
/// read, so one generator can render any number of times with identical
/// results.
///
/// # Example
///
/// ```
/// use mdhtml_ast::{NodeType, TreeBuilder};
/// use mdhtml_renderer::HtmlGenerator;
///
/// let source = "Hi *there*";
/// let mut builder = TreeBuilder::new(source);
/// builder
///     .start_node(NodeType::Document)
///     .start_node(NodeType::Paragraph)
///     .token(NodeType::Text, "Hi ")
///     .start_node(NodeType::Emph)
///     .token(NodeType::EmphDelimiter, "*")
///     .token(NodeType::Text, "there")
///     .token(NodeType::EmphDelimiter, "*")
///     .finish_node()
///     .finish_node()
///     .finish_node();
/// let tree = builder.finish().unwrap();
///
/// let html = HtmlGenerator::new(source, &tree).generate_html();
/// assert_eq!(html, "<body><p>Hi <em>there</em></p></body>");
/// ```
pub struct HtmlGenerator<'a> {
    source: &'a str,
    tree: &'a SyntaxTree,
    registry: &'a ProviderRegistry,
    options: GeneratorOptions,
    links: LinkMap,
}

impl<'a> HtmlGenerator<'a> {
    /// Generator with the standard HTML providers and default options.
    #[must_use]
    pub fn new(source: &'a str, tree: &'a SyntaxTree) -> Self {
        let links = LinkMap::collect(tree.root(), source);
        Self {
            source,
            tree,
            registry: &HTML_PROVIDERS,
            options: GeneratorOptions::default(),
            links,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a caller-built registry instead of the standard one.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Link definitions collected from the tree.
    #[must_use]
    pub fn links(&self) -> &LinkMap {
        &self.links
    }

    /// Render the whole tree.
    #[must_use]
    pub fn render(&self) -> RenderResult {
        tracing::debug!(
            nodes = self.tree.len(),
            link_definitions = self.links.len(),
            "Rendering tree"
        );
        self.render_node(self.tree.root())
    }

    /// Render one node of the tree as a standalone fragment.
    ///
    /// Link references still resolve against definitions from the whole tree.
    #[must_use]
    pub fn render_node(&self, node: Node<'_>) -> RenderResult {
        let mut visitor = HtmlVisitor::new(
            self.source,
            self.registry,
            &self.options,
            &self.links,
            node.range().len(),
        );
        visitor.visit(node);
        let (html, warnings) = visitor.finish();
        RenderResult { html, warnings }
    }

    /// Render the whole tree and return only the HTML.
    #[must_use]
    pub fn generate_html(&self) -> String {
        self.render().html
    }
}
