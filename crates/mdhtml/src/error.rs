//! CLI error types.

use mdhtml_ast::TreeError;
use mdhtml_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Validation(String),
}
