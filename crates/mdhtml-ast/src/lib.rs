//! Read-only markdown syntax tree.
//!
//! Nodes carry a [`NodeType`] tag, ordered children and a byte span into the
//! source text they were parsed from. The tree never owns the source; callers
//! pass it back in when they need a node's text.
//!
//! Trees are built either programmatically with [`TreeBuilder`] or from a
//! JSON [`TreeDocument`] produced by an external parser. Both paths validate
//! spans up front, so consumers can slice the source without further checks.
//!
//! # Example
//!
//! ```
//! use mdhtml_ast::{NodeType, TreeBuilder};
//!
//! let source = "`code`";
//! let mut builder = TreeBuilder::new(source);
//! builder
//!     .start_node(NodeType::CodeSpan)
//!     .token(NodeType::Backtick, "`")
//!     .token(NodeType::Text, "code")
//!     .token(NodeType::Backtick, "`")
//!     .finish_node();
//! let tree = builder.finish().unwrap();
//!
//! let text = tree.root().find_child_of_type(NodeType::Text).unwrap();
//! assert_eq!(text.text(source), "code");
//! ```

mod builder;
mod document;
mod error;
mod kind;
mod tree;

pub use builder::TreeBuilder;
pub use document::{NodeSpec, TreeDocument};
pub use error::TreeError;
pub use kind::NodeType;
pub use tree::{Children, Descendants, Node, NodeId, SyntaxTree, TextRange, Visitor, walk_children};
