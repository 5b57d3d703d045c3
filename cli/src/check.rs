#![deny(missing_docs)]

//! # Check Command
//!
//! Reports whether a file would be picked up as an OpenAPI document.

use std::path::PathBuf;

use oas_contract_core::ContractConverter;
use tracing::info;

use crate::error::{CliError, CliResult};

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the candidate document.
    pub file: PathBuf,
}

/// Executes the acceptance check. A rejected file is an error.
pub fn execute(args: &CheckArgs, converter: &ContractConverter) -> CliResult<()> {
    if !converter.is_accepted(&args.file) {
        return Err(CliError::Rejected(args.file.clone()));
    }
    info!(file = %args.file.display(), "accepted");
    println!("{}: accepted", args.file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check() {
        let dir = tempfile::tempdir().unwrap();
        let converter = ContractConverter::default();

        let good = dir.path().join("api.yml");
        fs::write(&good, "openapi: 3.0.0\npaths: {}\n").unwrap();
        assert!(execute(&CheckArgs { file: good }, &converter).is_ok());

        let bad = dir.path().join("api.txt");
        fs::write(&bad, "openapi: 3.0.0\n").unwrap();
        assert!(matches!(
            execute(&CheckArgs { file: bad }, &converter),
            Err(CliError::Rejected(_))
        ));
    }
}
