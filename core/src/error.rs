//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Engine failures are fatal for the document being converted: no partial
//! contract list is ever returned alongside one of them.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The YAML parser rejected the input.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// A `$ref` points at nothing inside the document.
    #[from(ignore)]
    #[display("Unresolved reference '{reference}' at {pointer}")]
    UnresolvedReference {
        /// The raw `$ref` value.
        reference: String,
        /// Location of the node holding the `$ref`.
        pointer: String,
    },

    /// An `enum` keyword with no values.
    #[from(ignore)]
    #[display("Enum at {pointer} declares no values")]
    EmptyEnum {
        /// Location of the enum schema.
        pointer: String,
    },

    /// An array schema without `items`.
    #[from(ignore)]
    #[display("Array schema at {pointer} has no 'items'")]
    MissingArrayItems {
        /// Location of the array schema.
        pointer: String,
    },

    /// An operation with an empty or absent `responses` map.
    #[from(ignore)]
    #[display("Operation {method} {path} declares no responses")]
    NoResponsesDefined {
        /// Upper-case HTTP method.
        method: String,
        /// Path template of the operation.
        path: String,
    },

    /// A node had a different shape than the accessor expected.
    #[from(ignore)]
    #[display("Expected {expected} at {pointer}")]
    ShapeMismatch {
        /// Human readable expected shape (e.g. "mapping").
        expected: &'static str,
        /// Location of the offending node.
        pointer: String,
    },

    /// The input is not an OpenAPI document this engine can take.
    #[from(ignore)]
    #[display("Malformed Document: {_0}")]
    MalformedDocument(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// The JSON pointer of the schema node that caused the failure, when known.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            AppError::UnresolvedReference { pointer, .. }
            | AppError::EmptyEnum { pointer }
            | AppError::MissingArrayItems { pointer }
            | AppError::ShapeMismatch { pointer, .. } => Some(pointer),
            _ => None,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
