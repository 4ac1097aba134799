//! `mdhtml tree` command implementation.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mdhtml_ast::Node;

use super::load_tree;
use crate::error::CliError;

/// Longest leaf text shown in the outline, in characters.
const PREVIEW_CHARS: usize = 40;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// JSON syntax tree to print.
    tree: PathBuf,

    /// Source text the tree spans refer to (default: the tree's embedded source).
    #[arg(short, long)]
    source: Option<PathBuf>,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let loaded = load_tree(&self.tree, self.source.as_deref())?;
        let text = outline(&loaded.source, loaded.tree.root());

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// One line per node: kind and span, plus a text preview for leaves.
fn outline(source: &str, root: Node<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, source, root, 0);
    out
}

fn write_node(out: &mut String, source: &str, node: Node<'_>, depth: usize) {
    write!(out, "{:indent$}{} {}", "", node.kind(), node.range(), indent = depth * 2).unwrap();
    if node.is_leaf() {
        write!(out, " {:?}", preview(node.text(source))).unwrap();
    }
    out.push('\n');
    for child in node.children() {
        write_node(out, source, child, depth + 1);
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_owned();
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS).collect();
    short.push('…');
    short
}
