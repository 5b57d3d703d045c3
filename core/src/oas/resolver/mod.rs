#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving OpenAPI nodes into descriptors.
//!
//! Handles:
//! - Schema resolution (`$ref`, `allOf`, `oneOf`/`anyOf`, types, enums).
//! - Parameter collection and merging (path item + operation).
//! - Request/response body media selection and examples.
//! - Response ordering and header resolution.

pub mod body;
pub(crate) mod compose;
pub mod params;
pub mod responses;
pub mod schema;

pub use body::{declared_example, request_body_content, select_media, MediaPayload};
pub use params::{resolve_parameters, ResolvedParameter};
pub use responses::{ordered_responses, response_headers, StatusResponse};
pub use schema::{resolve_schema, ResolutionPath, SchemaResolver};
