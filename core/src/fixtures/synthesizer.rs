#![deny(missing_docs)]

//! # Value Synthesis
//!
//! Builds a concrete example value from a [`Descriptor`].
//!
//! An example found at a node (passed explicitly or carried by the
//! descriptor) is copied verbatim and nothing below it is generated, so the
//! outermost example always wins. Objects include optional properties;
//! arrays always hold exactly one element.

use crate::error::{AppError, AppResult};
use crate::fixtures::formats::LiteralClass;
use crate::fixtures::source::ValueSource;
use crate::oas::models::{Descriptor, Shape};
use serde_json::{Map, Value};

/// Synthesizes a value for `descriptor`.
///
/// `explicit` overrides any example attached to the descriptor itself.
pub fn synthesize(
    descriptor: &Descriptor,
    explicit: Option<&Value>,
    source: &mut dyn ValueSource,
) -> AppResult<Value> {
    if let Some(example) = explicit.or(descriptor.example.as_ref()) {
        return Ok(example.clone());
    }

    match &descriptor.shape {
        Shape::Primitive { kind, format } => {
            Ok(source.literal(LiteralClass::of(*kind, format.as_deref())))
        }
        Shape::Enum { values } => {
            if values.is_empty() {
                return Err(AppError::EmptyEnum {
                    pointer: descriptor.pointer.clone(),
                });
            }
            Ok(values[source.pick(values.len())].clone())
        }
        Shape::Object { properties, .. } => {
            let mut map = Map::new();
            for (name, property) in properties {
                map.insert(name.clone(), synthesize(property, None, source)?);
            }
            Ok(Value::Object(map))
        }
        Shape::Array { items } => Ok(Value::Array(vec![synthesize(items, None, source)?])),
        Shape::Cycle { .. } => Ok(Value::Object(Map::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::PrimitiveKind;
    use indexmap::{IndexMap, IndexSet};
    use serde_json::json;

    /// Scripted source: fixed picks, literals named after their class.
    struct Scripted {
        picks: Vec<usize>,
    }

    impl ValueSource for Scripted {
        fn pick(&mut self, _len: usize) -> usize {
            self.picks.remove(0)
        }

        fn literal(&mut self, class: LiteralClass) -> Value {
            match class {
                LiteralClass::PositiveInt => json!(1),
                LiteralClass::Decimal => json!(1.5),
                LiteralClass::Boolean => json!(true),
                _ => json!("abc"),
            }
        }
    }

    fn scripted() -> Scripted {
        Scripted { picks: vec![1] }
    }

    fn prim(kind: PrimitiveKind) -> Descriptor {
        Descriptor::primitive(kind, None, "#/x")
    }

    fn object(props: Vec<(&str, Descriptor)>) -> Descriptor {
        let properties: IndexMap<String, Descriptor> =
            props.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        Descriptor::new(
            Shape::Object {
                properties,
                required: IndexSet::new(),
            },
            "#/o",
        )
    }

    #[test]
    fn test_object_in_declaration_order() {
        let d = object(vec![
            ("b", prim(PrimitiveKind::Integer)),
            ("a", prim(PrimitiveKind::String)),
            ("c", prim(PrimitiveKind::Boolean)),
        ]);
        let v = synthesize(&d, None, &mut scripted()).unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"b":1,"a":"abc","c":true}"#);
    }

    #[test]
    fn test_enum_uses_pick() {
        let d = Descriptor::new(
            Shape::Enum {
                values: vec![json!("hola"), json!("adios")],
            },
            "#/e",
        );
        assert_eq!(synthesize(&d, None, &mut scripted()).unwrap(), json!("adios"));
    }

    #[test]
    fn test_empty_enum_fails() {
        let d = Descriptor::new(Shape::Enum { values: vec![] }, "#/e");
        let err = synthesize(&d, None, &mut scripted()).unwrap_err();
        assert!(matches!(err, AppError::EmptyEnum { ref pointer } if pointer == "#/e"));
    }

    #[test]
    fn test_nested_arrays_have_one_element() {
        let inner = Descriptor::new(
            Shape::Array {
                items: Box::new(prim(PrimitiveKind::String)),
            },
            "#/i",
        );
        let outer = Descriptor::new(
            Shape::Array {
                items: Box::new(inner),
            },
            "#/a",
        );
        assert_eq!(
            synthesize(&outer, None, &mut scripted()).unwrap(),
            json!([["abc"]])
        );
    }

    #[test]
    fn test_outermost_example_wins() {
        let inner = prim(PrimitiveKind::String).with_example(Some(json!("inner")));
        let d = object(vec![("name", inner)]).with_example(Some(json!({"name": "outer"})));
        assert_eq!(
            synthesize(&d, None, &mut scripted()).unwrap(),
            json!({"name": "outer"})
        );

        let explicit = json!({"name": "explicit"});
        assert_eq!(
            synthesize(&d, Some(&explicit), &mut scripted()).unwrap(),
            explicit
        );
    }

    #[test]
    fn test_nested_example_used_when_parent_has_none() {
        let d = object(vec![
            ("rooms", prim(PrimitiveKind::Integer).with_example(Some(json!(4)))),
            ("open", prim(PrimitiveKind::Boolean)),
        ]);
        assert_eq!(
            synthesize(&d, None, &mut scripted()).unwrap(),
            json!({"rooms": 4, "open": true})
        );
    }

    #[test]
    fn test_cycle_placeholder_is_empty_mapping() {
        let d = Descriptor::new(
            Shape::Cycle {
                reference: "#/components/schemas/Node".into(),
            },
            "#/n",
        );
        assert_eq!(synthesize(&d, None, &mut scripted()).unwrap(), json!({}));
    }
}
