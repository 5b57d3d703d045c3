#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for walking OpenAPI `paths`.
//! Orchestrates Path Items -> Operations -> Builder -> Contracts.

pub mod builder;
pub mod naming;

use crate::config::ConverterConfig;
use crate::contract::Contract;
use crate::error::AppResult;
use crate::fixtures::source::ValueSource;
use crate::oas::document::OpenApiDocument;
use crate::oas::routes::builder::{ContractBuilder, OperationContext};
use tracing::{debug, info};

/// Operation keys of a Path Item, in the order contracts are emitted.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Builds every contract of `document`.
///
/// Paths are visited in document order, methods in [`HTTP_METHODS`] order,
/// and statuses ascending. A document without `paths` yields no contracts.
pub fn assemble(
    document: &OpenApiDocument,
    config: &ConverterConfig,
    source: &mut dyn ValueSource,
) -> AppResult<Vec<Contract>> {
    let Some(paths) = document.root().get("paths") else {
        info!("document declares no paths");
        return Ok(Vec::new());
    };

    let mut builder = ContractBuilder::new(document, config, source);
    let mut contracts = Vec::new();

    for (path, raw_item) in paths.entries()? {
        if path.starts_with("x-") {
            continue;
        }
        let path_item = document.deref(raw_item)?;

        let mut operations = 0usize;
        for method in HTTP_METHODS {
            let Some(operation) = path_item.get(method) else {
                continue;
            };
            operations += 1;
            let op = OperationContext {
                path,
                method,
                path_item: path_item.clone(),
                operation,
            };
            contracts.extend(builder.build(&op)?);
        }

        if operations == 0 {
            debug!(path, "path item has no operations, skipped");
        }
    }

    Ok(contracts)
}
