//! JSON tree documents.
//!
//! A tree document is the serialized output of an external parser:
//!
//! ```json
//! {
//!   "source": "Hi",
//!   "root": {
//!     "type": "document", "start": 0, "end": 2,
//!     "children": [
//!       { "type": "paragraph", "start": 0, "end": 2,
//!         "children": [{ "type": "text", "start": 0, "end": 2 }] }
//!     ]
//!   }
//! }
//! ```
//!
//! The `source` field is optional; callers that keep the source in a separate
//! file pass it to [`TreeDocument::build_tree`] directly.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::kind::NodeType;
use crate::tree::{NodeData, NodeId, SyntaxTree, TextRange};

/// Serialized tree with an optional embedded source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDocument {
    /// Source text the spans refer to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Root node.
    pub root: NodeSpec,
}

/// One serialized node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl TreeDocument {
    /// Parse a tree document from JSON.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the document against `source` and build the tree.
    ///
    /// Every span must lie within `source` on character boundaries, children
    /// must lie within their parent, and siblings must not overlap.
    pub fn build_tree(&self, source: &str) -> Result<SyntaxTree, TreeError> {
        let mut nodes = Vec::new();
        push_node(&self.root, None, source, &mut nodes)?;
        Ok(SyntaxTree::from_nodes(nodes))
    }
}

fn push_node(
    spec: &NodeSpec,
    parent: Option<NodeId>,
    source: &str,
    nodes: &mut Vec<NodeData>,
) -> Result<NodeId, TreeError> {
    let invalid = |reason| TreeError::InvalidSpan {
        kind: spec.kind,
        start: spec.start,
        end: spec.end,
        reason,
    };

    if spec.start > spec.end {
        return Err(invalid("start is after end"));
    }
    if spec.end > source.len() {
        return Err(invalid("span exceeds source length"));
    }
    if !source.is_char_boundary(spec.start) || !source.is_char_boundary(spec.end) {
        return Err(invalid("span is not on a character boundary"));
    }

    let id = NodeId::new(nodes.len());
    nodes.push(NodeData {
        kind: spec.kind,
        range: TextRange::new(spec.start, spec.end),
        parent,
        children: Vec::with_capacity(spec.children.len()),
    });

    let mut cursor = spec.start;
    for child in &spec.children {
        if child.start < cursor || child.end > spec.end {
            return Err(TreeError::InvalidSpan {
                kind: child.kind,
                start: child.start,
                end: child.end,
                reason: "child overlaps a sibling or leaves its parent",
            });
        }
        let child_id = push_node(child, Some(id), source, nodes)?;
        nodes[id.index()].children.push(child_id);
        cursor = child.end;
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DOC: &str = r#"{
        "source": "Hi *x*",
        "root": {
            "type": "document", "start": 0, "end": 6,
            "children": [{
                "type": "paragraph", "start": 0, "end": 6,
                "children": [
                    { "type": "text", "start": 0, "end": 2 },
                    { "type": "whitespace", "start": 2, "end": 3 },
                    { "type": "emph", "start": 3, "end": 6, "children": [
                        { "type": "emph_delimiter", "start": 3, "end": 4 },
                        { "type": "text", "start": 4, "end": 5 },
                        { "type": "emph_delimiter", "start": 5, "end": 6 }
                    ]}
                ]
            }]
        }
    }"#;

    #[test]
    fn test_load_embedded_source() {
        let doc = TreeDocument::from_json(DOC).unwrap();
        let source = doc.source.clone().unwrap();
        let tree = doc.build_tree(&source).unwrap();

        assert_eq!(tree.len(), 8);
        let emph = tree.root().find_descendant_of_type(NodeType::Emph).unwrap();
        assert_eq!(emph.text(&source), "*x*");
        assert_eq!(emph.parent().unwrap().kind(), NodeType::Paragraph);
    }

    #[test]
    fn test_span_past_source() {
        let doc = TreeDocument::from_json(DOC).unwrap();
        let err = doc.build_tree("Hi").unwrap_err();
        assert!(
            matches!(err, TreeError::InvalidSpan { kind: NodeType::Document, .. }),
            "Expected InvalidSpan, got {err:?}"
        );
    }

    #[test]
    fn test_overlapping_siblings() {
        let json = r#"{"root": {"type": "paragraph", "start": 0, "end": 4, "children": [
            {"type": "text", "start": 0, "end": 3},
            {"type": "text", "start": 2, "end": 4}
        ]}}"#;
        let doc = TreeDocument::from_json(json).unwrap();
        let err = doc.build_tree("abcd").unwrap_err();
        assert!(err.to_string().contains("overlaps"));
    }

    #[test]
    fn test_char_boundary() {
        let json = r#"{"root": {"type": "text", "start": 0, "end": 1}}"#;
        let doc = TreeDocument::from_json(json).unwrap();
        assert!(doc.build_tree("é").is_err());
        assert!(doc.build_tree("e").is_ok());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"root": {"type": "table", "start": 0, "end": 0}}"#;
        assert!(matches!(
            TreeDocument::from_json(json),
            Err(TreeError::Json(_))
        ));
    }
}
