//! Loading of monitoring specification documents from YAML files.

use std::{fs, path::PathBuf};

use config::{Config, File, FileFormat};
use thiserror::Error;

use crate::models::MonitoringSpec;

/// The top-level key the specification lives under in the YAML document.
const SPEC_KEY: &str = "monitoring";

/// Errors that can occur during specification loading.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Error when reading the specification file.
    #[error("Failed to read specification file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error when parsing the specification file.
    #[error("Failed to parse specification: {0}")]
    ParseError(#[from] config::ConfigError),

    /// Error when the specification format is unsupported.
    #[error("Unsupported specification format")]
    UnsupportedFormat,
}

/// A loader for YAML specification files.
pub struct SpecLoader {
    path: PathBuf,
}

impl SpecLoader {
    /// Creates a new `SpecLoader`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads a [`MonitoringSpec`] from the YAML file.
    ///
    /// The document must carry the specification under a top-level `monitoring` key.
    pub fn load(&self) -> Result<MonitoringSpec, LoaderError> {
        if !self.is_yaml_file() {
            return Err(LoaderError::UnsupportedFormat);
        }

        let spec_str = fs::read_to_string(&self.path)?;

        let config =
            Config::builder().add_source(File::from_str(&spec_str, FileFormat::Yaml)).build()?;

        let spec = config.get(SPEC_KEY)?;

        Ok(spec)
    }

    /// Checks if the file has a YAML extension.
    fn is_yaml_file(&self) -> bool {
        matches!(self.path.extension().and_then(|ext| ext.to_str()), Some("yaml") | Some("yml"))
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write, path::PathBuf};

    use tempfile::TempDir;

    use super::*;

    fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
        let path = dir.path().join(filename);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_load_success() {
        let dir = TempDir::new().unwrap();
        let content = r#"
monitoring:
  enabled: true
  prometheus:
    enable: true
    port: 9090
  exporters:
    node:
      enable: true
    systemd:
      enable: true
      port: 9559
  system_health:
    enable: true
    check_interval: 120
    checks:
      - disk-space
      - memory-usage
"#;
        let path = create_test_file(&dir, "monitoring.yaml", content);
        let spec = SpecLoader::new(path).load().unwrap();

        assert!(spec.enabled);
        assert!(spec.prometheus.enable);
        assert_eq!(spec.exporters.len(), 2);
        assert_eq!(spec.exporters["systemd"].port, Some(9559));
        assert_eq!(spec.exporters["node"].port, None);
        assert_eq!(spec.system_health.checks, vec!["disk-space", "memory-usage"]);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "monitoring.toml", "monitoring = {}");
        let result = SpecLoader::new(path).load();
        assert!(matches!(result, Err(LoaderError::UnsupportedFormat)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SpecLoader::new(PathBuf::from("/nonexistent/monitoring.yaml")).load();
        assert!(matches!(result, Err(LoaderError::IoError(_))));
    }

    #[test]
    fn test_load_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(&dir, "monitoring.yaml", "something_else: {}");
        let result = SpecLoader::new(path).load();
        assert!(matches!(result, Err(LoaderError::ParseError(_))));
    }
}
