//! The `check` subcommand: validate a specification without writing artifacts.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::{
    generate::{generate, GenerationError},
    loader::{LoaderError, SpecLoader},
};

/// Errors that can occur while executing the `check` subcommand.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure to load the specification file.
    #[error("Spec loading error: {0}")]
    Loading(#[from] LoaderError),
    /// The specification was rejected by validation.
    #[error("{0}")]
    Generation(#[from] GenerationError),
}

/// Arguments of the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the monitoring specification YAML file.
    #[arg(short, long)]
    pub spec: PathBuf,
}

/// Executes the `check` subcommand: a full generation pass whose bundle is discarded.
pub fn execute(args: CheckArgs) -> Result<(), Error> {
    let spec = SpecLoader::new(args.spec).load()?;
    let bundle = generate(&spec)?;

    tracing::info!(
        scrape_jobs = bundle.scrape_config.scrape_configs.len(),
        rule_documents = bundle.rule_documents.len(),
        tcp_ports = bundle.firewall.tcp.len(),
        "Specification is valid."
    );
    Ok(())
}
