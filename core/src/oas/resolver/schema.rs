#![deny(missing_docs)]

//! # Schema Resolution
//!
//! Turns a Schema Object node into a [`Descriptor`].
//!
//! - `$ref` is followed through the document; a pointer already on the
//!   current [`ResolutionPath`] yields a [`Shape::Cycle`] placeholder.
//! - `allOf` is merged (see [`crate::oas::resolver::compose`]).
//! - `oneOf` / `anyOf` resolve their first branch only.
//! - `type` drives the rest; OAS 3.1 type arrays use the first non-`null` entry.
//!
//! Resolution is pure: the same node with the same path state always yields
//! an equal descriptor. Nothing is cached between calls because an `allOf`
//! may merge the same referenced schema differently per call site.

use crate::error::{AppError, AppResult};
use crate::oas::document::{Node, OpenApiDocument};
use crate::oas::models::{Descriptor, PrimitiveKind, Shape};
use crate::oas::ref_utils::extract_ref_name;
use crate::oas::resolver::compose::merge_all_of;
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::debug;

/// The `$ref` pointers currently being expanded, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPath {
    stack: Vec<String>,
}

impl ResolutionPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `reference` is already being expanded.
    pub fn contains(&self, reference: &str) -> bool {
        self.stack.iter().any(|r| r == reference)
    }

    /// Enters a reference.
    pub fn push(&mut self, reference: &str) {
        self.stack.push(reference.to_string());
    }

    /// Leaves the innermost reference.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Number of references being expanded.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Resolves schema nodes of a single document.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'d> {
    document: &'d OpenApiDocument,
}

impl<'d> SchemaResolver<'d> {
    /// Creates a resolver over `document`.
    pub fn new(document: &'d OpenApiDocument) -> Self {
        Self { document }
    }

    /// The document references are resolved against.
    pub fn document(&self) -> &'d OpenApiDocument {
        self.document
    }

    /// Resolves `node` starting from an empty resolution path.
    pub fn resolve_root(&self, node: &Node<'d>) -> AppResult<Descriptor> {
        self.resolve(node, &mut ResolutionPath::new())
    }

    /// Resolves `node` with an explicit resolution path.
    ///
    /// The path is restored to its input state before returning, on success
    /// and on error alike.
    pub fn resolve(&self, node: &Node<'d>, path: &mut ResolutionPath) -> AppResult<Descriptor> {
        let example = node.get("example").map(|n| n.value().clone());

        if let Some(reference) = node.str_field("$ref")? {
            return self
                .resolve_reference(node, reference, path)
                .map(|d| override_example(d, example));
        }

        if node.has("allOf") {
            return merge_all_of(self, node, path).map(|d| override_example(d, example));
        }

        for keyword in ["oneOf", "anyOf"] {
            if let Some(branches) = node.get(keyword) {
                if let Some(first) = branches.items()?.into_iter().next() {
                    debug!(pointer = node.pointer(), keyword, "using first composition branch");
                    return self
                        .resolve(&first, path)
                        .map(|d| override_example(d, example));
                }
            }
        }

        let descriptor = match declared_type(node)? {
            Some("object") => self.resolve_object(node, path)?,
            Some("array") => self.resolve_array(node, path)?,
            Some(name) => match PrimitiveKind::from_type_name(name) {
                Some(kind) => resolve_scalar(node, kind)?,
                None => Descriptor::primitive(PrimitiveKind::Any, None, node.pointer()),
            },
            None if node.has("properties") => self.resolve_object(node, path)?,
            None if node.has("items") => self.resolve_array(node, path)?,
            None => resolve_scalar(node, PrimitiveKind::Any)?,
        };

        Ok(descriptor.with_example(example))
    }

    /// Resolves the `properties` / `required` keywords of `node` as an object.
    pub(crate) fn resolve_object(
        &self,
        node: &Node<'d>,
        path: &mut ResolutionPath,
    ) -> AppResult<Descriptor> {
        let mut properties = IndexMap::new();
        if let Some(props) = node.get("properties") {
            for (name, prop) in props.entries()? {
                properties.insert(name.to_string(), self.resolve(&prop, path)?);
            }
        }

        let mut required = IndexSet::new();
        if let Some(names) = node.get("required") {
            for name in names.items()? {
                required.insert(name.as_str()?.to_string());
            }
        }

        Ok(Descriptor::new(
            Shape::Object {
                properties,
                required,
            },
            node.pointer(),
        ))
    }

    fn resolve_array(&self, node: &Node<'d>, path: &mut ResolutionPath) -> AppResult<Descriptor> {
        let items = node.get("items").ok_or_else(|| AppError::MissingArrayItems {
            pointer: node.pointer().to_string(),
        })?;
        let item = self.resolve(&items, path)?;
        Ok(Descriptor::new(
            Shape::Array {
                items: Box::new(item),
            },
            node.pointer(),
        ))
    }

    fn resolve_reference(
        &self,
        node: &Node<'d>,
        reference: &str,
        path: &mut ResolutionPath,
    ) -> AppResult<Descriptor> {
        if path.contains(reference) {
            debug!(
                pointer = node.pointer(),
                schema = %extract_ref_name(reference),
                "cyclic $ref, emitting placeholder"
            );
            return Ok(Descriptor::new(
                Shape::Cycle {
                    reference: reference.to_string(),
                },
                node.pointer(),
            ));
        }

        let target = self.document.lookup(reference, node.pointer())?;
        debug!(pointer = node.pointer(), reference, depth = path.depth(), "following $ref");
        path.push(reference);
        let resolved = self.resolve(&target, path);
        path.pop();
        resolved
    }
}

/// Convenience wrapper: resolves `node` of `document` from an empty path.
pub fn resolve_schema<'d>(document: &'d OpenApiDocument, node: &Node<'d>) -> AppResult<Descriptor> {
    SchemaResolver::new(document).resolve_root(node)
}

/// Reads `type`, accepting a plain name or an OAS 3.1 type array.
fn declared_type<'a>(node: &Node<'a>) -> AppResult<Option<&'a str>> {
    let Some(ty) = node.get("type") else {
        return Ok(None);
    };
    match ty.value() {
        Value::String(name) => Ok(Some(name.as_str())),
        Value::Array(names) => Ok(names
            .iter()
            .filter_map(Value::as_str)
            .find(|name| *name != "null")),
        _ => Err(AppError::ShapeMismatch {
            expected: "type name or list of type names",
            pointer: ty.pointer().to_string(),
        }),
    }
}

fn resolve_scalar(node: &Node<'_>, kind: PrimitiveKind) -> AppResult<Descriptor> {
    if let Some(values) = node.get("enum") {
        return Ok(Descriptor::new(
            Shape::Enum {
                values: values.as_sequence()?.to_vec(),
            },
            node.pointer(),
        ));
    }
    let format = node.str_field("format")?;
    Ok(Descriptor::primitive(kind, format, node.pointer()))
}

/// An example written next to a `$ref` or composition keyword wins over the
/// one carried by the resolved target.
fn override_example(mut descriptor: Descriptor, example: Option<Value>) -> Descriptor {
    if example.is_some() {
        descriptor.example = example;
    }
    descriptor
}
