#![deny(missing_docs)]

//! # Reference Utilities
//!
//! JSON Pointer helpers shared by the document model and the resolver.
//!
//! Only in-document references (`#/...`) are followed. A reference with a
//! document part (`other.yaml#/...`, `https://...`) is never fetched.

use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Pointer of the document root.
pub const ROOT_POINTER: &str = "#";

/// Returns true if the reference targets the current document.
pub fn is_local_ref(reference: &str) -> bool {
    reference == ROOT_POINTER || reference.starts_with("#/")
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Escapes a mapping key so it can be appended to a JSON Pointer.
pub fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Appends a (raw, unescaped) segment to a pointer.
///
/// e.g. `#/paths` + `/games/{id}` -> `#/paths/~1games~1{id}`
pub fn child_pointer(base: &str, segment: &str) -> String {
    format!("{}/{}", base, encode_pointer_segment(segment))
}

/// Follows a local reference from the document root.
///
/// Mapping segments are matched by key, sequence segments by index.
/// Returns `None` for external references and for pointers with no target.
pub fn lookup_local<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    if !is_local_ref(reference) {
        return None;
    }
    let path = reference.trim_start_matches('#');
    if path.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for raw in path.trim_start_matches('/').split('/') {
        let segment = decode_pointer_segment(raw);
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`
pub fn extract_ref_name(reference: &str) -> String {
    reference
        .rsplit('/')
        .next()
        .map(decode_pointer_segment)
        .unwrap_or_default()
}
