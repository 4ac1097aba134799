//! Provider-driven HTML generation for markdown syntax trees.
//!
//! The generator walks a [`mdhtml_ast::SyntaxTree`] depth-first. For every
//! node it looks up a [`Provider`] by node type in a [`ProviderRegistry`]:
//! registered nodes are rendered by their provider, unregistered nodes emit
//! nothing themselves and have their children visited. All output goes into
//! a single buffer owned by the render, so the HTML always follows document
//! order.
//!
//! Leaf text is entity-escaped everywhere except raw HTML nodes, which pass
//! through verbatim.
//!
//! # Example
//!
//! ```
//! use mdhtml_ast::{NodeType, TreeBuilder};
//! use mdhtml_renderer::HtmlGenerator;
//!
//! let source = "# Hello";
//! let mut builder = TreeBuilder::new(source);
//! builder
//!     .start_node(NodeType::Document)
//!     .start_node(NodeType::Atx1)
//!     .token(NodeType::AtxHeader, "#")
//!     .start_node(NodeType::AtxContent)
//!     .token(NodeType::Whitespace, " ")
//!     .token(NodeType::Text, "Hello")
//!     .finish_node()
//!     .finish_node()
//!     .finish_node();
//! let tree = builder.finish().unwrap();
//!
//! let result = HtmlGenerator::new(source, &tree).render();
//! assert_eq!(result.html, "<body><h1>Hello</h1></body>");
//! assert!(result.warnings.is_empty());
//! ```

mod escape;
mod generator;
mod handlers;
mod indent;
mod links;
mod provider;
mod range;
mod registry;
mod visitor;

pub use escape::escape_html;
pub use generator::{GeneratorOptions, HtmlGenerator, RenderResult};
pub use indent::trim_indents;
pub use links::{LinkMap, LinkReference, normalize_label};
pub use provider::{GeneratingProvider, Provider, inline_holder, open_close, trimmed_children};
pub use range::{ChildRange, resolve};
pub use registry::{ProviderRegistry, RegistryError};
pub use visitor::{HtmlVisitor, leaf_text, plain_text};
