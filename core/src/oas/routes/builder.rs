#![deny(missing_docs)]

//! # Contract Builder
//!
//! Turns one operation into one contract per response status.
//!
//! Every schema goes through the same pipeline: resolve to a descriptor,
//! then synthesize a value and generate matchers from it independently.

use crate::config::ConverterConfig;
use crate::contract::{Contract, ContractRequest, ContractResponse, Header, QueryParameter};
use crate::error::AppResult;
use crate::fixtures::source::ValueSource;
use crate::fixtures::synthesizer::synthesize;
use crate::matchers::{generate_matchers, ExamplePolicy, MatchRule, MatcherEntry};
use crate::oas::document::{Node, OpenApiDocument};
use crate::oas::models::{Descriptor, ParamSource, Shape};
use crate::oas::resolver::{
    ordered_responses, request_body_content, resolve_parameters, response_headers, select_media,
    SchemaResolver, StatusResponse,
};
use crate::oas::routes::naming::{contract_name, contract_description};
use serde_json::Value;
use tracing::debug;

/// The operation being converted.
#[derive(Debug, Clone)]
pub(crate) struct OperationContext<'d> {
    /// Path template (e.g. `/games/{gameId}`).
    pub path: &'d str,
    /// Lower-case method key (e.g. `get`).
    pub method: &'static str,
    /// The (dereferenced) Path Item Object.
    pub path_item: Node<'d>,
    /// The Operation Object.
    pub operation: Node<'d>,
}

/// A synthesized body with its matchers.
#[derive(Debug, Default)]
struct Payload {
    media_type: Option<String>,
    body: Option<Value>,
    matchers: Vec<MatcherEntry>,
}

impl Payload {
    fn content_type(&self, config: &ConverterConfig) -> Option<Header> {
        match (&self.media_type, &self.body) {
            (Some(media_type), Some(_)) if config.content_type_header => Some(Header::new(
                "Content-Type",
                Value::String(media_type.clone()),
            )),
            _ => None,
        }
    }
}

/// Builds contracts for the operations of one document.
pub(crate) struct ContractBuilder<'d, 's> {
    resolver: SchemaResolver<'d>,
    config: &'s ConverterConfig,
    source: &'s mut dyn ValueSource,
}

impl<'d, 's> ContractBuilder<'d, 's> {
    pub(crate) fn new(
        document: &'d OpenApiDocument,
        config: &'s ConverterConfig,
        source: &'s mut dyn ValueSource,
    ) -> Self {
        Self {
            resolver: SchemaResolver::new(document),
            config,
            source,
        }
    }

    /// One contract per declared numeric response status, ascending.
    pub(crate) fn build(&mut self, op: &OperationContext<'d>) -> AppResult<Vec<Contract>> {
        let document = self.resolver.document();
        let responses = ordered_responses(document, &op.operation, op.method, op.path)?;
        let request = self.build_request(op)?;

        let operation_id = op.operation.str_field("operationId")?;
        let summary = op.operation.str_field("summary")?;
        let description = op.operation.str_field("description")?;

        let mut contracts = Vec::with_capacity(responses.len());
        for response in &responses {
            let name = contract_name(operation_id, op.method, op.path, response.status);
            debug!(contract = %name, "assembling contract");
            contracts.push(Contract {
                description: contract_description(
                    summary,
                    description,
                    op.method,
                    op.path,
                    response.status,
                ),
                name,
                request: request.clone(),
                response: self.build_response(response)?,
            });
        }
        Ok(contracts)
    }

    fn build_request(&mut self, op: &OperationContext<'d>) -> AppResult<ContractRequest> {
        let mut headers = Vec::new();
        let mut query_parameters = Vec::new();

        for param in resolve_parameters(&self.resolver, &op.path_item, &op.operation)? {
            match param.source {
                ParamSource::Path | ParamSource::Query => {
                    let value = self.parameter_rule(&param.descriptor)?;
                    query_parameters.push(QueryParameter {
                        name: param.name,
                        source: param.source,
                        value,
                    });
                }
                ParamSource::Header => {
                    let value = synthesize(&param.descriptor, None, &mut *self.source)?;
                    headers.push(Header::new(param.name, value));
                }
                ParamSource::Cookie => {
                    debug!(name = %param.name, "cookie parameters are not part of contracts");
                }
            }
        }

        let payload = match request_body_content(self.resolver.document(), &op.operation)? {
            Some(content) => self.build_payload(&content)?,
            None => Payload::default(),
        };
        if let Some(header) = payload.content_type(self.config) {
            headers.insert(0, header);
        }

        Ok(ContractRequest {
            method: op.method.to_uppercase(),
            url_path: op.path.to_string(),
            headers,
            query_parameters,
            body: payload.body,
            body_matchers: payload.matchers,
        })
    }

    fn build_response(&mut self, response: &StatusResponse<'d>) -> AppResult<ContractResponse> {
        let mut headers = Vec::new();
        for (name, descriptor) in response_headers(&self.resolver, &response.node)? {
            let value = synthesize(&descriptor, None, &mut *self.source)?;
            headers.push(Header::new(name, value));
        }

        let payload = match response.node.get("content") {
            Some(content) => self.build_payload(&content)?,
            None => Payload::default(),
        };
        if let Some(header) = payload.content_type(self.config) {
            headers.insert(0, header);
        }

        Ok(ContractResponse {
            status: response.status,
            headers,
            body: payload.body,
            body_matchers: payload.matchers,
        })
    }

    /// A media-type-level example is the exact body and carries no matchers.
    fn build_payload(&mut self, content: &Node<'d>) -> AppResult<Payload> {
        let document = self.resolver.document();
        let Some(media) = select_media(document, content, &self.config.media_type)? else {
            return Ok(Payload::default());
        };

        if let Some(example) = media.example {
            return Ok(Payload {
                media_type: Some(media.media_type),
                body: Some(example),
                matchers: Vec::new(),
            });
        }

        let Some(schema) = media.schema else {
            return Ok(Payload {
                media_type: Some(media.media_type),
                ..Payload::default()
            });
        };

        let descriptor = self.resolver.resolve_root(&schema)?;
        let body = synthesize(&descriptor, None, &mut *self.source)?;
        let matchers = generate_matchers(&descriptor, "", ExamplePolicy::Verbatim)?;
        Ok(Payload {
            media_type: Some(media.media_type),
            body: Some(body),
            matchers,
        })
    }

    /// Scalars get an equality rule when an example exists, a type-class
    /// regex otherwise. Structured parameters are pinned to a synthesized value.
    fn parameter_rule(&mut self, descriptor: &Descriptor) -> AppResult<MatchRule> {
        if matches!(descriptor.shape, Shape::Primitive { .. } | Shape::Enum { .. }) {
            if let Some(entry) = generate_matchers(descriptor, "", ExamplePolicy::Exact)?
                .into_iter()
                .next()
            {
                return Ok(entry.rule);
            }
        }
        Ok(MatchRule::EqualTo(synthesize(
            descriptor,
            None,
            &mut *self.source,
        )?))
    }
}
