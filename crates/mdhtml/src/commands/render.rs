//! `mdhtml render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mdhtml_config::{CliSettings, Config};
use mdhtml_renderer::{GeneratorOptions, HtmlGenerator, escape_html};

use super::load_tree;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON syntax tree to render.
    tree: PathBuf,

    /// Source text the tree spans refer to (default: the tree's embedded source).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the fragment in a full HTML document (overrides config).
    #[arg(long)]
    standalone: bool,

    /// Title of the standalone document (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Omit the language class on fenced code (overrides config).
    #[arg(long)]
    no_language_class: bool,

    /// Path to configuration file (default: auto-discover mdhtml.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show debug logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            standalone: self.standalone.then_some(true),
            title: self.title,
            code_language_class: self.no_language_class.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let loaded = load_tree(&self.tree, self.source.as_deref())?;
        let options = GeneratorOptions {
            code_language_class: config.render.code_language_class,
            language_class_prefix: config.render.language_class_prefix.clone(),
            tab_width: config.render.tab_width,
        };
        let result = HtmlGenerator::new(&loaded.source, &loaded.tree)
            .with_options(options)
            .render();

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let html = if config.output.standalone {
            standalone_document(&config.output.title, &result.html)
        } else {
            let mut html = result.html;
            html.push('\n');
            html
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                tracing::info!(path = %path.display(), "Wrote HTML");
                output.success(&format!("Rendered to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Wrap a rendered fragment in a complete HTML document.
///
/// Fragments rendered from a document root already carry `<body>`; any other
/// fragment is wrapped in one.
fn standalone_document(title: &str, fragment: &str) -> String {
    let body = if fragment.starts_with("<body>") {
        fragment.to_owned()
    } else {
        format!("<body>{fragment}</body>")
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n{body}\n</html>\n",
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_standalone_document_keeps_body() {
        assert_eq!(
            standalone_document("A & B", "<body><p>x</p></body>"),
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>A &amp; B</title>\n</head>\n<body><p>x</p></body>\n</html>\n"
        );
    }

    #[test]
    fn test_standalone_document_wraps_fragment() {
        let html = standalone_document("T", "<p>x</p>");
        assert!(html.contains("\n<body><p>x</p></body>\n"));
    }
}
