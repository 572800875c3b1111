//! The `generate` subcommand: load a specification, synthesize the bundle, and write the
//! artifact files to an output directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use thiserror::Error;

use crate::{
    artifacts::{ArtifactBundle, RenderError},
    generate::{generate, GenerationError},
    loader::{LoaderError, SpecLoader},
};

/// Errors that can occur while executing the `generate` subcommand.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while writing artifact files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failure to load the specification file.
    #[error("Spec loading error: {0}")]
    Loading(#[from] LoaderError),
    /// The specification was rejected by validation.
    #[error("{0}")]
    Generation(#[from] GenerationError),
    /// Failure to render an artifact to text.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Arguments of the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the monitoring specification YAML file.
    #[arg(short, long)]
    pub spec: PathBuf,
    /// Directory the artifact files are written to.
    #[arg(short, long, default_value = "out")]
    pub out_dir: PathBuf,
}

/// Executes the `generate` subcommand.
pub fn execute(args: GenerateArgs) -> Result<(), Error> {
    tracing::debug!(spec = %args.spec.display(), "Loading monitoring specification...");
    let spec = SpecLoader::new(args.spec).load()?;

    let bundle = generate(&spec)?;

    // The master switch produces no artifacts at all, not even empty files.
    if !spec.enabled {
        tracing::info!("Monitoring is disabled; nothing to write.");
        return Ok(());
    }

    write_bundle(&bundle, &args.out_dir)?;

    tracing::info!(out_dir = %args.out_dir.display(), "Artifact bundle written.");
    Ok(())
}

/// Writes every present artifact of the bundle under `out_dir`.
fn write_bundle(bundle: &ArtifactBundle, out_dir: &Path) -> Result<(), Error> {
    let write = |relative: &str, content: String| -> Result<(), Error> {
        let path = out_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "Wrote artifact.");
        Ok(())
    };

    write("prometheus/scrape-configs.yml", bundle.scrape_config.render()?)?;
    write("firewall.json", bundle.firewall.render()?)?;

    if !bundle.exporters.is_empty() {
        let exporters =
            serde_json::to_string_pretty(&bundle.exporters).map_err(RenderError::Json)?;
        write("exporters.json", exporters)?;
    }

    for document in &bundle.rule_documents {
        write(&format!("prometheus/rules/{}.yml", document.file_stem()), document.render()?)?;
    }

    if let Some(dashboard) = &bundle.dashboard {
        write("grafana/overview.json", dashboard.render()?)?;
    }

    if let Some(health_check) = &bundle.health_check {
        write("healthcheck/healthcheck.sh", health_check.script.clone())?;
        tracing::info!(interval = %health_check.interval_spec(), "Health-check recurrence.");
    }

    if let Some(pipeline) = &bundle.log_pipeline {
        write("loki/loki.yml", pipeline.ingestor.render()?)?;
        write("promtail/promtail.yml", pipeline.shipper.render()?)?;
    }

    if let Some(notification) = &bundle.notification {
        write("alerting/receivers.yml", notification.render()?)?;
    }

    Ok(())
}
