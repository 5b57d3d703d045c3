#![deny(missing_docs)]

//! # Body Matchers
//!
//! Derives the structural rules a conforming value must satisfy from a
//! [`Descriptor`], independently of any concrete example value.
//!
//! Paths are `.`-joined property names. Arrays contribute no path segment:
//! only one representative element is ever generated, so the item rules are
//! reported at the array's own path. A top-level scalar is reported at
//! [`ROOT_PATH`].

use crate::error::{AppError, AppResult};
use crate::fixtures::formats::LiteralClass;
use crate::oas::models::{Descriptor, Shape};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Path used for rules on a scalar document root.
pub const ROOT_PATH: &str = "$";

/// How a leaf rule is checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum MatchRule {
    /// The textual form of the value must fully match the pattern.
    Regex(String),
    /// The value must equal the literal.
    EqualTo(Value),
}

impl MatchRule {
    /// Checks `value` against the rule.
    ///
    /// Regexes are anchored at both ends. Non-scalar values never match a
    /// regex rule.
    pub fn matches(&self, value: &Value) -> AppResult<bool> {
        match self {
            MatchRule::EqualTo(expected) => Ok(expected == value),
            MatchRule::Regex(pattern) => {
                let Some(text) = scalar_text(value) else {
                    return Ok(false);
                };
                let re = Regex::new(&format!("^(?:{})$", pattern))
                    .map_err(|e| AppError::General(format!("Invalid matcher regex: {}", e)))?;
                Ok(re.is_match(&text))
            }
        }
    }
}

/// A rule bound to a field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatcherEntry {
    /// Dotted property path.
    pub path: String,
    /// The rule.
    pub rule: MatchRule,
}

/// What to do with a node that carries an author example.
///
/// Either way nothing below such a node is visited: the synthesizer copies
/// the example verbatim, so its subtree has no generated leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExamplePolicy {
    /// Examples are taken as-is and carry no rule.
    #[default]
    Verbatim,
    /// Examples are binding; emit an equality rule on the literal.
    Exact,
}

/// Generates the rules for every generated primitive leaf under `descriptor`.
///
/// `base_path` is the path of `descriptor` itself; pass `""` for a body root.
pub fn generate_matchers(
    descriptor: &Descriptor,
    base_path: &str,
    policy: ExamplePolicy,
) -> AppResult<Vec<MatcherEntry>> {
    let mut out = Vec::new();
    collect(descriptor, base_path, policy, &mut out)?;
    Ok(out)
}

fn collect(
    descriptor: &Descriptor,
    path: &str,
    policy: ExamplePolicy,
    out: &mut Vec<MatcherEntry>,
) -> AppResult<()> {
    if let Some(example) = &descriptor.example {
        if policy == ExamplePolicy::Exact {
            out.push(leaf(path, MatchRule::EqualTo(example.clone())));
        }
        return Ok(());
    }

    match &descriptor.shape {
        Shape::Primitive { kind, format } => {
            let pattern = LiteralClass::of(*kind, format.as_deref()).regex();
            out.push(leaf(path, MatchRule::Regex(pattern.into())));
        }
        Shape::Enum { values } => {
            if values.is_empty() {
                return Err(AppError::EmptyEnum {
                    pointer: descriptor.pointer.clone(),
                });
            }
            out.push(leaf(path, MatchRule::Regex(enum_alternation(values))));
        }
        Shape::Object { properties, .. } => {
            for (name, property) in properties {
                collect(property, &join_path(path, name), policy, out)?;
            }
        }
        Shape::Array { items } => collect(items, path, policy, out)?,
        Shape::Cycle { .. } => {}
    }
    Ok(())
}

/// Joins a property name onto a dotted path.
pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn leaf(path: &str, rule: MatchRule) -> MatcherEntry {
    let path = if path.is_empty() { ROOT_PATH } else { path };
    MatcherEntry {
        path: path.to_string(),
        rule,
    }
}

fn enum_alternation(values: &[Value]) -> String {
    let alternatives: Vec<String> = values
        .iter()
        .map(|v| regex::escape(&scalar_text(v).unwrap_or_else(|| v.to_string())))
        .collect();
    format!("({})", alternatives.join("|"))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
