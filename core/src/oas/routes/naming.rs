#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for deriving contract names and descriptions from
//! OpenAPI paths and Operation IDs.

/// Derives a base name from the HTTP Method and URL path when `operationId` is missing.
///
/// e.g. `GET /users/{id}` -> `get_users_id`
pub fn derive_operation_name(method: &str, path: &str) -> String {
    let clean_path = path.replace(['{', '}'], "").replace(['/', '-', '.'], "_");
    let clean_path = clean_path.trim_matches('_');
    if clean_path.is_empty() {
        method.to_lowercase()
    } else {
        format!("{}_{}", method.to_lowercase(), clean_path)
    }
}

/// `<operationId or derived name>_<status>`.
pub fn contract_name(operation_id: Option<&str>, method: &str, path: &str, status: u16) -> String {
    let base = match operation_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => derive_operation_name(method, path),
    };
    format!("{}_{}", base, status)
}

/// The operation `summary`, else its `description`, else `METHOD path -> status`.
pub fn contract_description(
    summary: Option<&str>,
    description: Option<&str>,
    method: &str,
    path: &str,
    status: u16,
) -> String {
    summary
        .or(description)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("{} {} -> {}", method.to_uppercase(), path, status))
}
