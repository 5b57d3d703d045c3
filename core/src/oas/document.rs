#![deny(missing_docs)]

//! # OpenAPI Document Model
//!
//! A read-only, order-preserving view over a parsed YAML/JSON OpenAPI document.
//!
//! The tree itself is a `serde_json::Value` (built with `preserve_order`, so
//! mapping keys keep their declaration order). Traversal goes through [`Node`],
//! which remembers the JSON pointer it was reached by and fails with
//! [`AppError::ShapeMismatch`] instead of silently casting.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::{child_pointer, lookup_local, ROOT_POINTER};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Name of the top-level key marking an OpenAPI 3.x document.
pub const OPENAPI_MARKER: &str = "openapi";

/// A parsed OpenAPI document.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    root: Value,
}

impl OpenApiDocument {
    /// Parses a YAML (or JSON, which is a YAML subset) string.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let root: Value = serde_yaml::from_str(content).map_err(|e| {
            AppError::MalformedDocument(format!("Failed to parse OpenAPI YAML: {}", e))
        })?;
        Self::from_value(root)
    }

    /// Reads and parses a document from disk.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Wraps an already parsed tree.
    ///
    /// The tree must be a non-empty mapping carrying a non-null `openapi` key.
    pub fn from_value(root: Value) -> AppResult<Self> {
        match &root {
            Value::Object(map) if !map.is_empty() => {}
            _ => {
                return Err(AppError::MalformedDocument(
                    "Yaml file is not correct: expected a non-empty mapping".into(),
                ))
            }
        }
        if root.get(OPENAPI_MARKER).map_or(true, Value::is_null) {
            return Err(AppError::MalformedDocument(format!(
                "missing '{}' version field",
                OPENAPI_MARKER
            )));
        }
        Ok(Self { root })
    }

    /// The `openapi` version string (e.g. `3.0.1`), rendered as text.
    pub fn version(&self) -> String {
        match self.root.get(OPENAPI_MARKER) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// The document title from `info.title`, if present.
    pub fn title(&self) -> Option<&str> {
        self.root
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
    }

    /// The root node.
    pub fn root(&self) -> Node<'_> {
        Node::new(&self.root, ROOT_POINTER.to_string())
    }

    /// Looks up a local `$ref` target.
    ///
    /// `at` is the pointer of the node holding the reference, used for errors.
    pub fn lookup(&self, reference: &str, at: &str) -> AppResult<Node<'_>> {
        lookup_local(&self.root, reference)
            .map(|value| Node::new(value, reference.to_string()))
            .ok_or_else(|| AppError::UnresolvedReference {
                reference: reference.to_string(),
                pointer: at.to_string(),
            })
    }

    /// Follows a chain of `$ref`s until a node without `$ref` is reached.
    ///
    /// Used for non-schema objects (parameters, request bodies, responses,
    /// headers) where a cycle can only come from a broken document.
    pub fn deref<'a>(&'a self, node: Node<'a>) -> AppResult<Node<'a>> {
        let mut current = node;
        let mut seen: Vec<String> = Vec::new();
        while let Some(reference) = current.str_field("$ref")? {
            if seen.iter().any(|s| s == reference) {
                return Err(AppError::UnresolvedReference {
                    reference: reference.to_string(),
                    pointer: current.pointer().to_string(),
                });
            }
            seen.push(reference.to_string());
            current = self.lookup(reference, current.pointer())?;
        }
        Ok(current)
    }
}

/// A borrowed node of the document tree plus its JSON pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    value: &'a Value,
    pointer: String,
}

impl<'a> Node<'a> {
    /// Creates a node for `value` located at `pointer`.
    pub fn new(value: &'a Value, pointer: String) -> Self {
        Self { value, pointer }
    }

    /// JSON pointer of this node (e.g. `#/components/schemas/User`).
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// The raw value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Returns the child under `key`, treating explicit `null` as absent.
    ///
    /// Non-mapping nodes have no children.
    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        self.value
            .get(key)
            .filter(|v| !v.is_null())
            .map(|v| Node::new(v, child_pointer(&self.pointer, key)))
    }

    /// Returns true if the mapping holds a non-null `key`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Views the node as a mapping.
    pub fn as_mapping(&self) -> AppResult<&'a Map<String, Value>> {
        self.value.as_object().ok_or_else(|| self.mismatch("mapping"))
    }

    /// Views the node as a sequence.
    pub fn as_sequence(&self) -> AppResult<&'a [Value]> {
        self.value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mismatch("sequence"))
    }

    /// Views the node as a string scalar.
    pub fn as_str(&self) -> AppResult<&'a str> {
        self.value.as_str().ok_or_else(|| self.mismatch("string"))
    }

    /// Reads an optional string field.
    pub fn str_field(&self, key: &str) -> AppResult<Option<&'a str>> {
        self.get(key).map(|n| n.as_str()).transpose()
    }

    /// Mapping entries in declaration order.
    pub fn entries(&self) -> AppResult<Vec<(&'a str, Node<'a>)>> {
        Ok(self
            .as_mapping()?
            .iter()
            .map(|(k, v)| (k.as_str(), Node::new(v, child_pointer(&self.pointer, k))))
            .collect())
    }

    /// Sequence items in order.
    pub fn items(&self) -> AppResult<Vec<Node<'a>>> {
        Ok(self
            .as_sequence()?
            .iter()
            .enumerate()
            .map(|(i, v)| Node::new(v, format!("{}/{}", self.pointer, i)))
            .collect())
    }

    fn mismatch(&self, expected: &'static str) -> AppError {
        AppError::ShapeMismatch {
            expected,
            pointer: self.pointer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"
openapi: 3.0.1
info: {title: Games, version: 1.0.0}
paths:
  /games/{gameId}:
    get:
      parameters:
        - $ref: '#/components/parameters/GameId'
      responses:
        '200': {description: OK}
components:
  parameters:
    GameId:
      $ref: '#/components/parameters/RealGameId'
    RealGameId:
      name: gameId
      in: path
      schema: {type: integer}
"#;

    #[test]
    fn test_parse_keeps_declaration_order() {
        let doc = OpenApiDocument::from_yaml_str(
            "openapi: 3.0.0\npaths: {}\nzeta: 1\nalpha: 2\n",
        )
        .unwrap();
        let keys: Vec<&str> = doc.root().entries().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["openapi", "paths", "zeta", "alpha"]);
        assert_eq!(doc.version(), "3.0.0");
    }

    #[test]
    fn test_missing_marker_is_malformed() {
        let res = OpenApiDocument::from_yaml_str("swagger: '2.0'\npaths: {}\n");
        assert!(matches!(res, Err(AppError::MalformedDocument(_))));

        let res = OpenApiDocument::from_yaml_str("openapi: ~\npaths: {}\n");
        assert!(matches!(res, Err(AppError::MalformedDocument(_))));
    }

    #[test]
    fn test_empty_and_unparseable_are_malformed() {
        assert!(matches!(
            OpenApiDocument::from_yaml_str(""),
            Err(AppError::MalformedDocument(_))
        ));
        assert!(matches!(
            OpenApiDocument::from_yaml_str("openapi: [3.0"),
            Err(AppError::MalformedDocument(_))
        ));
        assert!(matches!(
            OpenApiDocument::from_value(json!(["openapi"])),
            Err(AppError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_child_pointers() {
        let doc = OpenApiDocument::from_yaml_str(DOC).unwrap();
        let op = doc
            .root()
            .get("paths")
            .and_then(|p| p.get("/games/{gameId}"))
            .and_then(|p| p.get("get"))
            .unwrap();
        assert_eq!(op.pointer(), "#/paths/~1games~1{gameId}/get");
        let params = op.get("parameters").unwrap().items().unwrap();
        assert_eq!(params[0].pointer(), "#/paths/~1games~1{gameId}/get/parameters/0");
    }

    #[test]
    fn test_deref_follows_chains() {
        let doc = OpenApiDocument::from_yaml_str(DOC).unwrap();
        let param = doc
            .root()
            .get("paths")
            .and_then(|p| p.get("/games/{gameId}"))
            .and_then(|p| p.get("get"))
            .and_then(|op| op.get("parameters"))
            .unwrap()
            .items()
            .unwrap()
            .remove(0);
        let resolved = doc.deref(param).unwrap();
        assert_eq!(resolved.str_field("name").unwrap(), Some("gameId"));
        assert_eq!(resolved.pointer(), "#/components/parameters/RealGameId");
    }

    #[test]
    fn test_deref_reports_dangling_ref() {
        let doc = OpenApiDocument::from_yaml_str(
            "openapi: 3.0.0\nx-param: {$ref: '#/components/parameters/Ghost'}\n",
        )
        .unwrap();
        let err = doc.deref(doc.root().get("x-param").unwrap()).unwrap_err();
        match err {
            AppError::UnresolvedReference { reference, pointer } => {
                assert_eq!(reference, "#/components/parameters/Ghost");
                assert_eq!(pointer, "#/x-param");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let doc = OpenApiDocument::from_yaml_str("openapi: 3.0.0\npaths: [1, 2]\n").unwrap();
        let err = doc.root().get("paths").unwrap().as_mapping().unwrap_err();
        assert!(matches!(
            err,
            AppError::ShapeMismatch { expected: "mapping", ref pointer } if pointer == "#/paths"
        ));
    }
}
