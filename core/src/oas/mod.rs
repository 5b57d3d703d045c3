#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **document**: The parsed tree and pointer-aware node views.
//! - **models**: Resolved schema descriptors.
//! - **ref_utils**: JSON Pointer helpers for local `$ref`s.
//! - **resolver**: Schema, parameter, body and response resolution.
//! - **routes**: Walking paths/operations into contracts.

pub mod document;
pub mod models;
pub mod ref_utils;
pub mod resolver;
pub mod routes;

pub use document::{Node, OpenApiDocument};
pub use models::{Descriptor, ParamSource, PrimitiveKind, Shape};
pub use resolver::{resolve_schema, SchemaResolver};
pub use routes::{assemble, HTTP_METHODS};
