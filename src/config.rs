//! Configuration types for the setup advisor

use crate::contact::{DEFAULT_LINK_HOST, DEFAULT_MESSAGE_TEMPLATE};
use crate::wizard::DEFAULT_PLACEHOLDER_FEATURE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the setup advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file (TOML); the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// Host used in contact deep-links
    pub link_host: String,

    /// Outreach message template with `{structure}` and `{category}` placeholders
    pub message_template: String,

    /// Feature text shown when a structure has no features listed
    pub placeholder_feature: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            link_host: DEFAULT_LINK_HOST.to_string(),
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
            placeholder_feature: DEFAULT_PLACEHOLDER_FEATURE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            source: e,
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Setup Advisor Configuration File
# This file uses TOML format (https://toml.io)

# Catalog of categories, structures, features and contact routing.
# Leave unset to use the built-in catalog (see --dump-catalog).
# catalog_path = "catalog.toml"

# Host used for the contact deep-link: https://<host>/<identifier>?text=<message>
link_host = "wa.me"

# Pre-filled outreach message. {structure} and {category} are replaced verbatim.
message_template = "Hello! I need help setting up {structure} for {category}. Please contact me."

# Shown in place of the feature list when a structure has none in the catalog
placeholder_feature = "Details coming soon."
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}
