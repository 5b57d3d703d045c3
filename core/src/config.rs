#![deny(missing_docs)]

//! # Converter Configuration
//!
//! Options controlling a conversion. Loadable from YAML; every field has a
//! default so partial files are accepted.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The media type whose bodies are synthesized by default.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Options for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConverterConfig {
    /// Seed for the value source. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Media type selected from `content` maps.
    pub media_type: String,
    /// Whether a `Content-Type` header is added next to synthesized bodies.
    pub content_type_header: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            seed: None,
            media_type: JSON_MEDIA_TYPE.to_string(),
            content_type_header: true,
        }
    }
}

impl ConverterConfig {
    /// Parses a YAML configuration string.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads a YAML configuration file.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read config {:?}: {}", path, e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Returns a copy with `seed` set.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}
