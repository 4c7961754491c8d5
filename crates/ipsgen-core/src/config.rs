//! Project configuration (`ipsproject.toml`)

use crate::message::{Message, MessageList};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File name of the project configuration at the project root.
pub const PROJECT_FILE: &str = "ipsproject.toml";

/// Errors while loading the project configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `ipsproject.toml` structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpsProjectConfig {
    pub project: ProjectSection,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub name: String,

    /// Java package all generated classes are placed under.
    pub base_package: String,

    /// Directory holding one TOML file per model object, relative to the
    /// project root.
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
}

/// Switches that change what the generator emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Emit JAXB field annotations (`@XmlJavaTypeAdapter` and friends).
    #[serde(default)]
    pub generate_jaxb_support: bool,

    /// Allow enum value sets to refine range value sets in subtypes.
    #[serde(default)]
    pub unified_value_sets: bool,

    /// Emit `@IpsPublishedInterface` on generated classes.
    #[serde(default)]
    pub generate_published_interfaces: bool,

    /// Emit `@IpsChangingOverTime` on product component classes.
    #[serde(default = "default_true")]
    pub changes_over_time: bool,

    /// Locale of the documentation bundle referenced by `@IpsDocumented`.
    #[serde(default = "default_locale")]
    pub locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_model_dir() -> String {
    "model".to_string()
}

fn default_true() -> bool {
    true
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_jaxb_support: false,
            unified_value_sets: false,
            generate_published_interfaces: false,
            changes_over_time: default_true(),
            locale: default_locale(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl IpsProjectConfig {
    /// Create a configuration with default generator and logging settings.
    pub fn new(name: impl Into<String>, base_package: impl Into<String>) -> Self {
        Self {
            project: ProjectSection {
                name: name.into(),
                base_package: base_package.into(),
                model_dir: default_model_dir(),
            },
            generator: GeneratorConfig::default(),
            logging: LoggingSection::default(),
        }
    }

    /// Load the configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&content)
    }

    /// Parse the configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Check the configuration. Problems are reported, not raised.
    pub fn validate(&self, project_root: Option<&Path>) -> MessageList {
        let mut messages = MessageList::new();

        if self.project.name.trim().is_empty() {
            messages.add(
                Message::error("PROJECT-NAME_EMPTY", "The project name must not be empty")
                    .with_property(PROJECT_FILE, "project.name"),
            );
        }

        if !naming::is_valid_java_package(&self.project.base_package) {
            messages.add(
                Message::error(
                    "PROJECT-INVALID_BASE_PACKAGE",
                    format!(
                        "'{}' is not a valid Java package name",
                        self.project.base_package
                    ),
                )
                .with_property(PROJECT_FILE, "project.base_package"),
            );
        }

        if let Some(root) = project_root {
            let model_dir = root.join(&self.project.model_dir);
            if !model_dir.is_dir() {
                messages.add(
                    Message::error(
                        "PROJECT-MODEL_DIR_MISSING",
                        format!("Model directory {} does not exist", model_dir.display()),
                    )
                    .with_property(PROJECT_FILE, "project.model_dir"),
                );
            }
        }

        if self.generator.locale.trim().is_empty() {
            messages.add(
                Message::warning("PROJECT-LOCALE_EMPTY", "No documentation locale configured")
                    .with_property(PROJECT_FILE, "generator.locale"),
            );
        }

        messages
    }
}
