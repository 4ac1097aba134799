//! Configuration management for mdhtml.
//!
//! Parses `mdhtml.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override standalone document output.
    pub standalone: Option<bool>,
    /// Override the standalone document title.
    pub title: Option<String>,
    /// Override the fenced code language class flag.
    pub code_language_class: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdhtml.toml";

/// Largest accepted `render.tab_width`.
const MAX_TAB_WIDTH: usize = 16;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML rendering options.
    pub render: RenderConfig,
    /// Output document options.
    pub output: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Emit a language class on fenced code blocks.
    pub code_language_class: bool,
    /// Prefix of the fenced code language class.
    pub language_class_prefix: String,
    /// Tab stop used when stripping code indentation.
    pub tab_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            code_language_class: true,
            language_class_prefix: "language-".to_owned(),
            tab_width: 4,
        }
    }
}

/// Output document configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Wrap the rendered fragment in a full HTML document.
    pub standalone: bool,
    /// `<title>` of standalone documents.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            title: "Document".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to be safe inside a double-quoted HTML attribute.
fn require_attribute_safe(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.contains(['"', '<', '>']) {
        return Err(ConfigError::Validation(format!(
            "{field} cannot contain '\"', '<' or '>'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdhtml.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(standalone) = settings.standalone {
            self.output.standalone = standalone;
        }
        if let Some(title) = &settings.title {
            self.output.title.clone_from(title);
        }
        if let Some(code_language_class) = settings.code_language_class {
            self.render.code_language_class = code_language_class;
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_output()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        require_attribute_safe(
            &self.render.language_class_prefix,
            "render.language_class_prefix",
        )?;

        let tab_width = self.render.tab_width;
        if tab_width == 0 {
            return Err(ConfigError::Validation(
                "render.tab_width must be greater than 0".to_owned(),
            ));
        }
        if tab_width > MAX_TAB_WIDTH {
            return Err(ConfigError::Validation(format!(
                "render.tab_width cannot exceed {MAX_TAB_WIDTH}"
            )));
        }

        Ok(())
    }

    fn validate_output(&self) -> Result<(), ConfigError> {
        if self.output.standalone {
            require_non_empty(&self.output.title, "output.title")?;
        }
        Ok(())
    }
}
