//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod tree;

use std::path::Path;

use mdhtml_ast::{SyntaxTree, TreeDocument};

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use tree::TreeArgs;

/// Syntax tree together with the source text its spans refer to.
pub(crate) struct LoadedTree {
    pub(crate) source: String,
    pub(crate) tree: SyntaxTree,
}

/// Read a JSON tree document and build its tree.
///
/// `source_path` wins over a source embedded in the document.
pub(crate) fn load_tree(tree_path: &Path, source_path: Option<&Path>) -> Result<LoadedTree, CliError> {
    let json = std::fs::read_to_string(tree_path)?;
    let document = TreeDocument::from_json(&json)?;

    let source = match (source_path, document.source.as_deref()) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(embedded)) => embedded.to_owned(),
        (None, None) => {
            return Err(CliError::Validation(format!(
                "{} has no embedded source; pass --source",
                tree_path.display()
            )));
        }
    };

    let tree = document.build_tree(&source)?;
    tracing::info!(path = %tree_path.display(), nodes = tree.len(), "Loaded syntax tree");
    Ok(LoadedTree { source, tree })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TREE: &str = r#"{
        "root": {
            "type": "document", "start": 0, "end": 2,
            "children": [{ "type": "text", "start": 0, "end": 2 }]
        }
    }"#;

    #[test]
    fn test_load_tree_with_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let tree_path = dir.path().join("tree.json");
        let source_path = dir.path().join("doc.md");
        std::fs::write(&tree_path, TREE).unwrap();
        std::fs::write(&source_path, "Hi").unwrap();

        let loaded = load_tree(&tree_path, Some(&source_path)).unwrap();
        assert_eq!(loaded.source, "Hi");
        assert_eq!(loaded.tree.len(), 2);
    }

    #[test]
    fn test_load_tree_embedded_source() {
        let dir = tempfile::tempdir().unwrap();
        let tree_path = dir.path().join("tree.json");
        let json = TREE.replacen('{', r#"{ "source": "Yo","#, 1);
        std::fs::write(&tree_path, json).unwrap();

        let loaded = load_tree(&tree_path, None).unwrap();
        assert_eq!(loaded.source, "Yo");
    }

    #[test]
    fn test_load_tree_without_source() {
        let dir = tempfile::tempdir().unwrap();
        let tree_path = dir.path().join("tree.json");
        std::fs::write(&tree_path, TREE).unwrap();

        let err = load_tree(&tree_path, None).err().unwrap();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_load_tree_span_outside_source() {
        let dir = tempfile::tempdir().unwrap();
        let tree_path = dir.path().join("tree.json");
        let source_path = dir.path().join("doc.md");
        std::fs::write(&tree_path, TREE).unwrap();
        std::fs::write(&source_path, "H").unwrap();

        let err = load_tree(&tree_path, Some(&source_path)).err().unwrap();
        assert!(matches!(err, CliError::Tree(_)));
    }
}
