#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Collects the Parameter Objects that apply to an operation and resolves
//! their schemas.
//!
//! Path-item-level parameters come first; an operation-level parameter with
//! the same `name` and `in` replaces it in place.

use crate::error::{AppError, AppResult};
use crate::oas::document::Node;
use crate::oas::models::{Descriptor, ParamSource, PrimitiveKind};
use crate::oas::resolver::body::declared_example;
use crate::oas::resolver::schema::SchemaResolver;
use tracing::warn;

/// A parameter with its schema resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    pub source: ParamSource,
    /// Resolved schema. A parameter-level example is attached here and
    /// overrides one declared in the schema.
    pub descriptor: Descriptor,
}

/// Resolves the parameters of `operation`, merged with those of `path_item`.
pub fn resolve_parameters<'d>(
    resolver: &SchemaResolver<'d>,
    path_item: &Node<'d>,
    operation: &Node<'d>,
) -> AppResult<Vec<ResolvedParameter>> {
    let mut merged: Vec<ResolvedParameter> = Vec::new();

    for list in [path_item.get("parameters"), operation.get("parameters")]
        .into_iter()
        .flatten()
    {
        for raw in list.items()? {
            let Some(param) = resolve_parameter(resolver, raw)? else {
                continue;
            };
            match merged
                .iter_mut()
                .find(|p| p.name == param.name && p.source == param.source)
            {
                Some(slot) => *slot = param,
                None => merged.push(param),
            }
        }
    }

    Ok(merged)
}

fn resolve_parameter<'d>(
    resolver: &SchemaResolver<'d>,
    raw: Node<'d>,
) -> AppResult<Option<ResolvedParameter>> {
    let document = resolver.document();
    let param = document.deref(raw)?;

    let name = param
        .str_field("name")?
        .ok_or_else(|| AppError::ShapeMismatch {
            expected: "parameter with a 'name'",
            pointer: param.pointer().to_string(),
        })?;
    let location = param.str_field("in")?.unwrap_or("query");
    let Some(source) = ParamSource::parse(location) else {
        warn!(pointer = param.pointer(), location, "unsupported parameter location");
        return Ok(None);
    };

    let descriptor = match parameter_schema(&param)? {
        Some(schema) => resolver.resolve_root(&schema)?,
        None => Descriptor::primitive(PrimitiveKind::Any, None, param.pointer()),
    };
    let descriptor = match declared_example(document, &param)? {
        Some(example) => descriptor.with_example(Some(example)),
        None => descriptor,
    };

    Ok(Some(ResolvedParameter {
        name: name.to_string(),
        source,
        descriptor,
    }))
}

/// `schema`, or the schema of the first `content` entry.
fn parameter_schema<'d>(param: &Node<'d>) -> AppResult<Option<Node<'d>>> {
    if let Some(schema) = param.get("schema") {
        return Ok(Some(schema));
    }
    let Some(content) = param.get("content") else {
        return Ok(None);
    };
    Ok(content
        .entries()?
        .into_iter()
        .next()
        .and_then(|(_, media)| media.get("schema")))
}
