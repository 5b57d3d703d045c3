#![deny(missing_docs)]

//! # Response Resolution
//!
//! Orders an operation's responses by status and resolves response headers.

use crate::error::{AppError, AppResult};
use crate::oas::document::{Node, OpenApiDocument};
use crate::oas::models::{Descriptor, PrimitiveKind};
use crate::oas::resolver::body::declared_example;
use crate::oas::resolver::schema::SchemaResolver;
use tracing::warn;

/// A response with a concrete numeric status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse<'d> {
    /// HTTP status code.
    pub status: u16,
    /// The Response Object (already dereferenced).
    pub node: Node<'d>,
}

/// Returns the responses of `operation` in ascending status order.
///
/// Fails when the operation declares no responses at all. Range and
/// `default` keys have no concrete status and are skipped, so an operation
/// declaring only those yields an empty list.
pub fn ordered_responses<'d>(
    document: &'d OpenApiDocument,
    operation: &Node<'d>,
    method: &str,
    path: &str,
) -> AppResult<Vec<StatusResponse<'d>>> {
    let entries = match operation.get("responses") {
        Some(responses) => responses.entries()?,
        None => Vec::new(),
    };
    if entries.is_empty() {
        return Err(AppError::NoResponsesDefined {
            method: method.to_uppercase(),
            path: path.to_string(),
        });
    }

    let mut ordered = Vec::with_capacity(entries.len());
    for (key, node) in entries {
        match key.parse::<u16>() {
            Ok(status) => ordered.push(StatusResponse {
                status,
                node: document.deref(node)?,
            }),
            Err(_) if key.starts_with("x-") => {}
            Err(_) => warn!(
                pointer = node.pointer(),
                status = key,
                "response has no concrete status, skipped"
            ),
        }
    }
    if ordered.is_empty() {
        warn!(
            method = %method.to_uppercase(),
            path,
            "operation has no concrete response status, no contracts emitted"
        );
    }
    ordered.sort_by_key(|r| r.status);
    Ok(ordered)
}

/// Resolves the `headers` map of a Response Object.
///
/// `Content-Type` entries are dropped; the content type comes from the
/// selected media type instead.
pub fn response_headers<'d>(
    resolver: &SchemaResolver<'d>,
    response: &Node<'d>,
) -> AppResult<Vec<(String, Descriptor)>> {
    let Some(headers) = response.get("headers") else {
        return Ok(Vec::new());
    };

    let document = resolver.document();
    let mut resolved = Vec::new();
    for (name, raw) in headers.entries()? {
        if name.eq_ignore_ascii_case("content-type") {
            continue;
        }
        let header = document.deref(raw)?;
        let descriptor = match header.get("schema") {
            Some(schema) => resolver.resolve_root(&schema)?,
            None => Descriptor::primitive(PrimitiveKind::Any, None, header.pointer()),
        };
        let descriptor = match declared_example(document, &header)? {
            Some(example) => descriptor.with_example(Some(example)),
            None => descriptor,
        };
        resolved.push((name.to_string(), descriptor));
    }
    Ok(resolved)
}
