#![deny(missing_docs)]

//! # Contract Converter
//!
//! The public entry point: decides whether a file is an OpenAPI document
//! and converts documents into contracts.

use crate::config::ConverterConfig;
use crate::contract::Contract;
use crate::error::AppResult;
use crate::fixtures::source::{RandomValueSource, ValueSource};
use crate::oas::document::OpenApiDocument;
use crate::oas::routes::assemble;
use std::path::Path;
use tracing::{debug, info};

const ACCEPTED_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Converts OpenAPI documents into contracts.
#[derive(Debug, Clone, Default)]
pub struct ContractConverter {
    config: ConverterConfig,
}

impl ContractConverter {
    /// Creates a converter with the given options.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// The active options.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Returns true if `path` names a YAML file holding a non-empty mapping
    /// with a non-null `openapi` field.
    ///
    /// Never fails: unreadable or unparsable files are simply not accepted.
    pub fn is_accepted(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            });
        if !has_extension {
            return false;
        }

        match OpenApiDocument::from_path(path) {
            Ok(_) => true,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "file not accepted");
                false
            }
        }
    }

    /// Reads and converts the document at `path`.
    pub fn convert_file(&self, path: &Path) -> AppResult<Vec<Contract>> {
        let document = OpenApiDocument::from_path(path)?;
        self.convert(&document)
    }

    /// Parses and converts a YAML (or JSON) document.
    pub fn convert_str(&self, content: &str) -> AppResult<Vec<Contract>> {
        let document = OpenApiDocument::from_yaml_str(content)?;
        self.convert(&document)
    }

    /// Converts `document` with a value source built from the configured seed.
    pub fn convert(&self, document: &OpenApiDocument) -> AppResult<Vec<Contract>> {
        let mut source = RandomValueSource::from_seed_option(self.config.seed);
        self.convert_with(document, &mut source)
    }

    /// Converts `document` drawing every generated value from `source`.
    pub fn convert_with(
        &self,
        document: &OpenApiDocument,
        source: &mut dyn ValueSource,
    ) -> AppResult<Vec<Contract>> {
        let contracts = assemble(document, &self.config, source)?;
        info!(
            openapi = %document.version(),
            title = document.title().unwrap_or_default(),
            contracts = contracts.len(),
            "converted document"
        );
        Ok(contracts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DOC: &str = "openapi: 3.0.0\npaths:\n  /ping:\n    get:\n      responses:\n        '200': {description: pong}\n";

    #[test]
    fn test_acceptance() {
        let dir = tempfile::tempdir().unwrap();
        let converter = ContractConverter::default();

        let good = dir.path().join("api.yaml");
        fs::write(&good, DOC).unwrap();
        assert!(converter.is_accepted(&good));

        let upper = dir.path().join("api.YML");
        fs::write(&upper, DOC).unwrap();
        assert!(converter.is_accepted(&upper));

        let wrong_ext = dir.path().join("api.json");
        fs::write(&wrong_ext, DOC).unwrap();
        assert!(!converter.is_accepted(&wrong_ext));

        let not_openapi = dir.path().join("other.yml");
        fs::write(&not_openapi, "name: something\n").unwrap();
        assert!(!converter.is_accepted(&not_openapi));

        let empty = dir.path().join("empty.yml");
        fs::write(&empty, "").unwrap();
        assert!(!converter.is_accepted(&empty));

        assert!(!converter.is_accepted(&dir.path().join("missing.yml")));
    }

    #[test]
    fn test_seeded_conversion_is_reproducible() {
        let converter = ContractConverter::new(ConverterConfig::default().with_seed(Some(3)));
        assert_eq!(
            converter.convert_str(DOC).unwrap(),
            converter.convert_str(DOC).unwrap()
        );
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.yml");
        fs::write(&path, DOC).unwrap();
        let contracts = ContractConverter::default().convert_file(&path).unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].name, "get_ping_200");
    }
}
