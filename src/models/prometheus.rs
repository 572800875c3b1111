//! This module defines the metrics-collector section of the specification.

use serde::{Deserialize, Serialize};
use url::Url;

/// Specification for the metrics collector itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrometheusSpec {
    /// Whether the collector runs at all.
    pub enable: bool,

    /// Port the collector's own HTTP endpoint listens on.
    pub port: u16,

    /// Address the collector's own HTTP endpoint binds to.
    pub listen_address: String,

    /// How long collected samples are kept (collector-native duration string, e.g. "15d").
    pub retention: String,

    /// Interval between scrapes (duration string, e.g. "15s").
    pub scrape_interval: String,

    /// Interval between rule evaluations (duration string, e.g. "15s").
    pub evaluation_interval: String,

    /// Alerting rule configuration.
    pub alerting: AlertingSpec,

    /// Remote-write targets samples are forwarded to.
    pub remote_write: Vec<RemoteWriteTarget>,
}

impl Default for PrometheusSpec {
    fn default() -> Self {
        Self {
            enable: false,
            port: 9090,
            listen_address: "0.0.0.0".to_string(),
            retention: "15d".to_string(),
            scrape_interval: "15s".to_string(),
            evaluation_interval: "15s".to_string(),
            alerting: AlertingSpec::default(),
            remote_write: Vec::new(),
        }
    }
}

/// Alerting rule configuration nested under the collector spec.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AlertingSpec {
    /// Whether the fixed baseline rule group is emitted.
    pub enable: bool,

    /// Raw user-supplied rule text, emitted verbatim as a second rule document.
    /// The generator never parses or validates this text; malformed rules surface
    /// when the consuming engine loads the document.
    pub custom_rules: String,
}

/// A single remote-write destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteWriteTarget {
    /// Endpoint the samples are written to.
    pub url: Url,
    /// Optional name for the queue, surfaced in collector metrics.
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = PrometheusSpec::default();
        assert!(!spec.enable);
        assert_eq!(spec.port, 9090);
        assert_eq!(spec.listen_address, "0.0.0.0");
        assert_eq!(spec.retention, "15d");
        assert_eq!(spec.scrape_interval, "15s");
        assert_eq!(spec.evaluation_interval, "15s");
        assert!(!spec.alerting.enable);
        assert!(spec.alerting.custom_rules.is_empty());
        assert!(spec.remote_write.is_empty());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{"enable": true, "port": 9099}"#;
        let spec: PrometheusSpec = serde_json::from_str(json).unwrap();
        assert!(spec.enable);
        assert_eq!(spec.port, 9099);
        assert_eq!(spec.retention, "15d");
    }

    #[test]
    fn test_remote_write_parses_urls() {
        let json = r#"{
            "enable": true,
            "remote_write": [{"url": "https://mimir.example.org/api/v1/push", "name": "mimir"}]
        }"#;
        let spec: PrometheusSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.remote_write.len(), 1);
        assert_eq!(spec.remote_write[0].name.as_deref(), Some("mimir"));
        assert_eq!(spec.remote_write[0].url.host_str(), Some("mimir.example.org"));
    }
}
