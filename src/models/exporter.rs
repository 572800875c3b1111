//! This module defines per-exporter override specifications.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// User-supplied overrides for a single exporter.
///
/// Every field other than `enable` is optional: an unset field inherits the default from the
/// exporter catalog during resolution. "Unset" is represented by `Option`/emptiness rather
/// than sentinel values, so an explicit `port: 0` is distinguishable from "inherit".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ExporterSpec {
    /// Whether this exporter participates in the build.
    pub enable: bool,

    /// Listen port. Inherits the catalog default when unset.
    pub port: Option<u16>,

    /// Listen address. Inherits the catalog default when unset.
    pub listen_address: Option<String>,

    /// Extra command-line flags appended to the exporter invocation.
    pub extra_flags: Vec<String>,

    /// Free-form exporter-specific settings, passed through opaquely.
    pub extra_config: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_leaves_fields_unset() {
        let spec: ExporterSpec = serde_json::from_str("{}").unwrap();
        assert!(!spec.enable);
        assert_eq!(spec.port, None);
        assert_eq!(spec.listen_address, None);
        assert!(spec.extra_flags.is_empty());
        assert!(spec.extra_config.is_empty());
    }

    #[test]
    fn test_explicit_overrides_are_preserved() {
        let json = r#"{
            "enable": true,
            "port": 9101,
            "listen_address": "127.0.0.1",
            "extra_flags": ["--collector.textfile"]
        }"#;
        let spec: ExporterSpec = serde_json::from_str(json).unwrap();
        assert!(spec.enable);
        assert_eq!(spec.port, Some(9101));
        assert_eq!(spec.listen_address.as_deref(), Some("127.0.0.1"));
        assert_eq!(spec.extra_flags, vec!["--collector.textfile"]);
    }
}
