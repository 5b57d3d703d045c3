#![deny(missing_docs)]

//! # Body Resolution
//!
//! Locates request/response payload definitions and their examples.
//!
//! Only one media type (by default `application/json`) is synthesized; other
//! content types are skipped with a warning.

use crate::error::AppResult;
use crate::oas::document::{Node, OpenApiDocument};
use serde_json::Value;
use tracing::warn;

/// The selected media type entry of a `content` map.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPayload<'d> {
    /// The key it was found under (e.g. `application/json; charset=utf-8`).
    pub media_type: String,
    /// Media-type-level example; taken as the exact body when present.
    pub example: Option<Value>,
    /// The Schema Object, if declared.
    pub schema: Option<Node<'d>>,
}

/// Returns the `content` map of an operation's request body, following `$ref`.
pub fn request_body_content<'d>(
    document: &'d OpenApiDocument,
    operation: &Node<'d>,
) -> AppResult<Option<Node<'d>>> {
    let Some(body) = operation.get("requestBody") else {
        return Ok(None);
    };
    Ok(document.deref(body)?.get("content"))
}

/// Picks the entry of `content` whose media type essence equals `media_type`.
///
/// Parameters such as `; charset=utf-8` are ignored when comparing.
pub fn select_media<'d>(
    document: &'d OpenApiDocument,
    content: &Node<'d>,
    media_type: &str,
) -> AppResult<Option<MediaPayload<'d>>> {
    let entries = content.entries()?;
    let found = entries
        .iter()
        .find(|(key, _)| media_type_essence(key).eq_ignore_ascii_case(media_type));

    let Some((key, media)) = found else {
        if !entries.is_empty() {
            let declared: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
            warn!(
                pointer = content.pointer(),
                ?declared,
                "no {} content, body synthesis skipped",
                media_type
            );
        }
        return Ok(None);
    };

    Ok(Some(MediaPayload {
        media_type: key.to_string(),
        example: declared_example(document, media)?,
        schema: media.get("schema"),
    }))
}

/// Reads the example declared on a Parameter, Header or Media Type Object.
///
/// `example` wins; otherwise the `value` of the first `examples` entry is
/// used (Example Objects may be `$ref`s).
pub fn declared_example(document: &OpenApiDocument, node: &Node<'_>) -> AppResult<Option<Value>> {
    if let Some(example) = node.get("example") {
        return Ok(Some(example.value().clone()));
    }
    let Some(examples) = node.get("examples") else {
        return Ok(None);
    };
    let Some((_, first)) = examples.entries()?.into_iter().next() else {
        return Ok(None);
    };
    let resolved = document.deref(first)?;
    Ok(resolved.get("value").map(|v| v.value().clone()))
}

fn media_type_essence(key: &str) -> &str {
    key.split(';').next().unwrap_or(key).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"
openapi: 3.0.0
paths:
  /games:
    post:
      requestBody:
        $ref: '#/components/requestBodies/NewGame'
      responses:
        '201':
          description: Created
          content:
            text/plain:
              schema: {type: string}
            application/json; charset=utf-8:
              schema: {type: object}
              examples:
                first: {$ref: '#/components/examples/Created'}
                second: {value: {id: 2}}
components:
  requestBodies:
    NewGame:
      content:
        application/json:
          schema: {type: object}
          example: {gameName: hangman}
  examples:
    Created:
      value: {id: 1}
"#;

    fn operation(doc: &OpenApiDocument) -> Node<'_> {
        doc.root()
            .get("paths")
            .and_then(|p| p.get("/games"))
            .and_then(|p| p.get("post"))
            .unwrap()
    }

    #[test]
    fn test_request_body_through_ref() {
        let doc = OpenApiDocument::from_yaml_str(DOC).unwrap();
        let content = request_body_content(&doc, &operation(&doc)).unwrap().unwrap();
        let media = select_media(&doc, &content, "application/json").unwrap().unwrap();
        assert_eq!(media.example, Some(json!({"gameName": "hangman"})));
        assert!(media.schema.is_some());
    }

    #[test]
    fn test_media_parameters_and_examples_map() {
        let doc = OpenApiDocument::from_yaml_str(DOC).unwrap();
        let content = operation(&doc)
            .get("responses")
            .and_then(|r| r.get("201"))
            .and_then(|r| r.get("content"))
            .unwrap();
        let media = select_media(&doc, &content, "application/json").unwrap().unwrap();
        assert_eq!(media.media_type, "application/json; charset=utf-8");
        assert_eq!(media.example, Some(json!({"id": 1})));
    }

    #[test]
    fn test_unsupported_media_type_is_skipped() {
        let doc = OpenApiDocument::from_yaml_str(DOC).unwrap();
        let content = operation(&doc)
            .get("responses")
            .and_then(|r| r.get("201"))
            .and_then(|r| r.get("content"))
            .unwrap();
        assert!(select_media(&doc, &content, "application/xml").unwrap().is_none());
    }

    #[test]
    fn test_missing_request_body() {
        let doc = OpenApiDocument::from_yaml_str(
            "openapi: 3.0.0\npaths: {/a: {get: {responses: {'200': {description: OK}}}}}\n",
        )
        .unwrap();
        let op = doc
            .root()
            .get("paths")
            .and_then(|p| p.get("/a"))
            .and_then(|p| p.get("get"))
            .unwrap();
        assert!(request_body_content(&doc, &op).unwrap().is_none());
    }
}
