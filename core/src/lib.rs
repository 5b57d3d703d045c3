#![deny(missing_docs)]

//! # OAS Contract Core
//!
//! Converts OpenAPI v3 documents into consumer-driven contracts: one
//! request/response pair per operation and response status, with
//! synthesized example bodies and the matchers that validate them.

/// Shared error types.
pub mod error;

/// Conversion options.
pub mod config;

/// Contract output records.
pub mod contract;

/// Document to contract conversion entry point.
pub mod converter;

/// Example value generation.
pub mod fixtures;

/// Body matcher generation.
pub mod matchers;

/// OpenAPI (OAS) document walking and resolution.
pub mod oas;

pub use config::ConverterConfig;
pub use contract::{Contract, ContractRequest, ContractResponse, Header, QueryParameter};
pub use converter::ContractConverter;
pub use error::{AppError, AppResult};
pub use fixtures::{synthesize, RandomValueSource, ValueSource};
pub use matchers::{generate_matchers, ExamplePolicy, MatchRule, MatcherEntry};
pub use oas::{Descriptor, OpenApiDocument, ParamSource, Shape};
