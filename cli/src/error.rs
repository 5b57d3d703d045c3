#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use oas_contract_core::AppError;
use std::path::PathBuf;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Conversion failure from the core library.
    #[display("{}", _0)]
    Core(AppError),

    /// YAML rendering failure.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// JSON rendering failure.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// The input is not an OpenAPI document.
    #[display("Not an OpenAPI document: {}", _0.display())]
    #[from(ignore)]
    Rejected(PathBuf),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` holds a `String`, which does not implement
/// `std::error::Error`, so `source()` cannot be derived.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CliError::Rejected(PathBuf::from("compose.yml"));
        assert_eq!(err.to_string(), "Not an OpenAPI document: compose.yml");

        let err: CliError = AppError::MalformedDocument("bad".into()).into();
        assert!(matches!(err, CliError::Core(_)));
    }
}
