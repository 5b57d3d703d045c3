#![deny(missing_docs)]

//! # allOf Composition
//!
//! Merges the branches of an `allOf` into one object descriptor.
//!
//! Properties are unioned in branch order; a later branch's property replaces
//! an earlier one of the same name (keeping the first position). `required`
//! is the union of all branches. Inline `properties` / `required` written
//! next to the `allOf` keyword are merged last.

use crate::error::AppResult;
use crate::oas::document::Node;
use crate::oas::models::{Descriptor, Shape};
use crate::oas::resolver::schema::{ResolutionPath, SchemaResolver};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

#[derive(Default)]
struct Merged {
    properties: IndexMap<String, Descriptor>,
    required: IndexSet<String>,
    objects: usize,
}

impl Merged {
    fn absorb(&mut self, properties: IndexMap<String, Descriptor>, required: IndexSet<String>) {
        self.objects += 1;
        for (name, descriptor) in properties {
            self.properties.insert(name, descriptor);
        }
        self.required.extend(required);
    }
}

/// Resolves every `allOf` branch of `node` and merges them.
///
/// Non-object branches cannot contribute properties. When no branch is an
/// object, the last non-object branch is returned as-is so that
/// `allOf: [{$ref: '#/components/schemas/Id'}]` behaves like a plain `$ref`.
pub(crate) fn merge_all_of<'d>(
    resolver: &SchemaResolver<'d>,
    node: &Node<'d>,
    path: &mut ResolutionPath,
) -> AppResult<Descriptor> {
    let mut merged = Merged::default();
    let mut scalar_branch = None;

    if let Some(branches) = node.get("allOf") {
        for branch in branches.items()? {
            let descriptor = resolver.resolve(&branch, path)?;
            match descriptor.shape {
                Shape::Object {
                    properties,
                    required,
                } => merged.absorb(properties, required),
                Shape::Cycle { ref reference } => {
                    debug!(pointer = branch.pointer(), reference, "skipping cyclic allOf branch");
                }
                _ => {
                    warn!(pointer = branch.pointer(), "allOf branch is not an object");
                    scalar_branch = Some(descriptor);
                }
            }
        }
    }

    if node.has("properties") || node.has("required") {
        if let Shape::Object {
            properties,
            required,
        } = resolver.resolve_object(node, path)?.shape
        {
            merged.absorb(properties, required);
        }
    }

    if merged.objects == 0 {
        if let Some(descriptor) = scalar_branch {
            return Ok(descriptor);
        }
    }

    Ok(Descriptor::new(
        Shape::Object {
            properties: merged.properties,
            required: merged.required,
        },
        node.pointer(),
    ))
}

#[cfg(test)]
mod tests {
    use crate::oas::document::OpenApiDocument;
    use crate::oas::models::{PrimitiveKind, Shape};
    use crate::oas::resolver::schema::resolve_schema;

    fn resolve(yaml: &str, name: &str) -> crate::oas::models::Descriptor {
        let doc = OpenApiDocument::from_yaml_str(yaml).unwrap();
        let node = doc
            .lookup(&format!("#/components/schemas/{}", name), "#")
            .unwrap();
        resolve_schema(&doc, &node).unwrap()
    }

    fn kind_of(d: &crate::oas::models::Descriptor) -> PrimitiveKind {
        match d.shape {
            Shape::Primitive { kind, .. } => kind,
            ref other => panic!("expected primitive, got {:?}", other),
        }
    }

    #[test]
    fn test_union_of_branches() {
        let merged = resolve(
            r#"
openapi: 3.0.0
components:
  schemas:
    Both:
      allOf:
        - type: object
          required: [a]
          properties: {a: {type: integer}}
        - type: object
          required: [b]
          properties: {b: {type: string}}
"#,
            "Both",
        );
        let Shape::Object { properties, required } = &merged.shape else {
            panic!("expected object");
        };
        assert_eq!(kind_of(&properties["a"]), PrimitiveKind::Integer);
        assert_eq!(kind_of(&properties["b"]), PrimitiveKind::String);
        assert!(required.contains("a") && required.contains("b"));
    }

    #[test]
    fn test_later_branch_overrides() {
        let merged = resolve(
            r#"
openapi: 3.0.0
components:
  schemas:
    Override:
      allOf:
        - type: object
          properties: {x: {type: integer}, y: {type: boolean}}
        - type: object
          properties: {x: {type: string}}
"#,
            "Override",
        );
        let props = merged.properties().unwrap();
        assert_eq!(kind_of(&props["x"]), PrimitiveKind::String);
        let names: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_refs_and_inline_siblings() {
        let merged = resolve(
            r#"
openapi: 3.0.0
components:
  schemas:
    Game:
      type: object
      properties:
        gameId: {type: integer}
        gameName: {type: string}
    Room:
      type: object
      properties:
        roomId: {type: integer}
    NewGame:
      allOf:
        - $ref: '#/components/schemas/Game'
        - $ref: '#/components/schemas/Room'
        - type: object
          properties:
            newGameId: {type: integer}
      properties:
        playerName: {type: string}
"#,
            "NewGame",
        );
        let names: Vec<&str> = merged
            .properties()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            names,
            vec!["gameId", "gameName", "roomId", "newGameId", "playerName"]
        );
    }

    #[test]
    fn test_cycle_through_all_of() {
        let merged = resolve(
            r#"
openapi: 3.0.0
components:
  schemas:
    Tree:
      allOf:
        - $ref: '#/components/schemas/Tree'
        - type: object
          properties:
            label: {type: string}
            children:
              type: array
              items: {$ref: '#/components/schemas/Tree'}
"#,
            "Tree",
        );
        let props = merged.properties().unwrap();
        assert_eq!(kind_of(&props["label"]), PrimitiveKind::String);
        let Shape::Array { items } = &props["children"].shape else {
            panic!("expected array");
        };
        assert!(matches!(items.shape, Shape::Object { .. }));
    }

    #[test]
    fn test_single_scalar_branch_passes_through() {
        let merged = resolve(
            r#"
openapi: 3.0.0
components:
  schemas:
    Id: {type: integer, format: int32}
    Alias:
      allOf:
        - $ref: '#/components/schemas/Id'
"#,
            "Alias",
        );
        assert_eq!(kind_of(&merged), PrimitiveKind::Integer);
    }
}
