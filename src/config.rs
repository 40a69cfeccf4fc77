use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::engine::AmbiguityPolicy;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    #[default]
    Java,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Separator between a record and its nested names.
    pub fn path_separator(&self) -> &'static str {
        match self {
            Language::Cpp => "::",
            Language::Java => ".",
        }
    }
}

/// Handling of a second variable, field, parameter or record with the same
/// name in one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first declaration, record and warn about the rest.
    #[default]
    KeepFirst,
    /// Abort the translation unit.
    Fatal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub language: Language,
    pub duplicate_policy: DuplicatePolicy,
    pub ambiguity_policy: AmbiguityPolicy,
}

impl ResolverConfig {
    pub fn separator(&self) -> &'static str {
        self.language.path_separator()
    }

    /// Loads a config file; the format follows the extension (json, yaml, yml).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading resolver config");

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::read_error(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| ConfigError::parse_error(path, e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::parse_error(path, e.to_string())),
            _ => Err(ConfigError::unsupported_format(extension)),
        }
    }
}
