#![deny(missing_docs)]

//! # Contract Records
//!
//! The output model: one request/response pair with matchers per documented
//! operation and response status. Records serialize (camelCase) for
//! consumption by a contract-testing runtime.

use crate::matchers::{MatchRule, MatcherEntry};
use crate::oas::models::ParamSource;
use serde::Serialize;
use serde_json::Value;

/// A consumer-driven contract for one operation × response status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Unique name (e.g. `getGame_200`).
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// Expected request.
    pub request: ContractRequest,
    /// Expected response.
    pub response: ContractResponse,
}

/// The request side of a contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRequest {
    /// Upper-case HTTP method.
    pub method: String,
    /// Path template with `{param}` placeholders preserved.
    pub url_path: String,
    /// Request headers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    /// Path and query parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<QueryParameter>,
    /// Example body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Structural rules on the body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_matchers: Vec<MatcherEntry>,
}

impl ContractRequest {
    /// Finds a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&Header> {
        find_header(&self.headers, name)
    }

    /// Finds a parameter by name.
    pub fn query_parameter(&self, name: &str) -> Option<&QueryParameter> {
        self.query_parameters.iter().find(|p| p.name == name)
    }
}

/// The response side of a contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    /// Example body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Structural rules on the body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_matchers: Vec<MatcherEntry>,
}

impl ContractResponse {
    /// Finds a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&Header> {
        find_header(&self.headers, name)
    }
}

/// A header with the value sent by the consumer and the one the provider
/// must produce. Both sides start out identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Consumer-side value.
    pub client_value: Value,
    /// Provider-side value.
    pub server_value: Value,
}

impl Header {
    /// A header whose client and server values are both `value`.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            client_value: value.clone(),
            server_value: value,
        }
    }
}

/// A URL parameter and the rule its value must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    /// Parameter name.
    pub name: String,
    /// Where the parameter was declared (`path` or `query`).
    pub source: ParamSource,
    /// Exact value or type-class regex.
    pub value: MatchRule,
}

fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a Header> {
    headers.iter().find(|h| h.name.eq_ignore_ascii_case(name))
}
