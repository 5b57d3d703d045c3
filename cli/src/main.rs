#![deny(missing_docs)]

//! # OAS Contract CLI
//!
//! Command Line Interface for the OpenAPI to contract converter.
//!
//! Supported Commands:
//! - `check`: Reports whether a file is an OpenAPI document.
//! - `convert`: Writes the contracts of a document as YAML or JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oas_contract_core::{ContractConverter, ConverterConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

mod check;
mod convert;
mod error;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to contract converter")]
struct Cli {
    /// Converter options file (YAML).
    #[clap(long, global = true, env = "OAS_CONTRACT_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for generated values; overrides the config file.
    #[clap(long, global = true, env = "OAS_CONTRACT_SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log filter directive (e.g. `oas_contract_core=debug`); wins over `-v`.
    #[clap(long, global = true, env = "OAS_CONTRACT_LOG")]
    log: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a file is an OpenAPI document.
    Check(check::CheckArgs),
    /// Convert an OpenAPI document into contracts.
    Convert(convert::ConvertArgs),
}

impl Cli {
    fn filter(&self) -> CliResult<EnvFilter> {
        let Some(directive) = self.log.as_deref() else {
            let fallback = match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            return Ok(EnvFilter::new(fallback));
        };
        EnvFilter::try_new(directive).map_err(|e| {
            CliError::General(format!("Invalid log directive '{}': {}", directive, e))
        })
    }

    fn converter(&self) -> CliResult<ContractConverter> {
        let config = match &self.config {
            Some(path) => ConverterConfig::from_path(path)?,
            None => ConverterConfig::default(),
        };
        Ok(ContractConverter::new(config.with_seed(self.seed)))
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(cli.filter()?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let converter = cli.converter()?;

    match &cli.command {
        Commands::Check(args) => check::execute(args, &converter)?,
        Commands::Convert(args) => convert::execute(args, &converter)?,
    }

    Ok(())
}
