#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Intermediate Representation (IR) produced by the schema resolver.
//!
//! A [`Descriptor`] is the normalized, cycle-safe view of one schema node:
//! `$ref`s are followed, `allOf` is merged and `oneOf`/`anyOf` narrowed to a
//! single branch. Both the value synthesizer and the matcher generator read it.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use std::fmt;

/// Primitive JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// No usable `type`; matches anything.
    Any,
}

impl PrimitiveKind {
    /// Maps a JSON Schema `type` name to a primitive kind.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveKind::String),
            "integer" => Some(PrimitiveKind::Integer),
            "number" => Some(PrimitiveKind::Number),
            "boolean" => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Any => "any",
        };
        f.write_str(name)
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// Path template variable.
    Path,
    /// Query string.
    Query,
    /// Header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamSource {
    /// Parses the `in` field of a Parameter Object.
    pub fn parse(location: &str) -> Option<Self> {
        match location {
            "path" => Some(ParamSource::Path),
            "query" => Some(ParamSource::Query),
            "header" => Some(ParamSource::Header),
            "cookie" => Some(ParamSource::Cookie),
            _ => None,
        }
    }
}

/// The normalized shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A scalar with an optional `format` modifier.
    Primitive {
        /// Scalar type.
        kind: PrimitiveKind,
        /// `format` (e.g. `int64`, `uuid`).
        format: Option<String>,
    },
    /// A closed set of allowed scalar values.
    Enum {
        /// Allowed values in declaration order.
        values: Vec<Value>,
    },
    /// A mapping with named properties.
    Object {
        /// Properties in declaration order.
        properties: IndexMap<String, Descriptor>,
        /// Names listed in `required`.
        required: IndexSet<String>,
    },
    /// A homogeneous sequence.
    Array {
        /// The item schema.
        items: Box<Descriptor>,
    },
    /// A `$ref` back-reference to a pointer already being expanded.
    Cycle {
        /// The pointer that closed the cycle.
        reference: String,
    },
}

/// A resolved schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// The normalized shape.
    pub shape: Shape,
    /// Author-declared `example` at this node.
    pub example: Option<Value>,
    /// JSON pointer of the schema node this was resolved from.
    pub pointer: String,
}

impl Descriptor {
    /// Creates a descriptor without an example.
    pub fn new(shape: Shape, pointer: impl Into<String>) -> Self {
        Self {
            shape,
            example: None,
            pointer: pointer.into(),
        }
    }

    /// Attaches an example.
    pub fn with_example(mut self, example: Option<Value>) -> Self {
        self.example = example;
        self
    }

    /// Shorthand for a primitive descriptor.
    pub fn primitive(kind: PrimitiveKind, format: Option<&str>, pointer: impl Into<String>) -> Self {
        Self::new(
            Shape::Primitive {
                kind,
                format: format.map(str::to_string),
            },
            pointer,
        )
    }

    /// Returns the property map if this is an object.
    pub fn properties(&self) -> Option<&IndexMap<String, Descriptor>> {
        match &self.shape {
            Shape::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }
}
