#![deny(missing_docs)]

//! # Convert Command
//!
//! Converts a document and writes the contracts as YAML or JSON.

use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;
use oas_contract_core::{Contract, ContractConverter};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Output serialization.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML sequence of contracts.
    #[default]
    Yaml,
    /// Pretty-printed JSON array of contracts.
    Json,
}

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the OpenAPI document.
    pub file: PathBuf,

    /// Output file. Contracts are printed to stdout when omitted.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Output serialization.
    #[clap(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Executes the conversion.
pub fn execute(args: &ConvertArgs, converter: &ContractConverter) -> CliResult<()> {
    if !args.file.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            args.file
        )));
    }

    let contracts = converter.convert_file(&args.file)?;
    let rendered = render(&contracts, args.format)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            info!(output = %path.display(), contracts = contracts.len(), "contracts written");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Serializes `contracts` in `format`.
pub fn render(contracts: &[Contract], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(contracts)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(contracts)?;
            json.push('\n');
            Ok(json)
        }
    }
}
