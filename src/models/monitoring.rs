//! This module defines the root `MonitoringSpec`, the single input document of the generator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    ExporterSpec, GrafanaSpec, HealthSpec, LogSpec, NotificationSpec, PrometheusSpec,
};

/// The root monitoring specification.
///
/// Every subsystem section defaults to its disabled state, so a minimal document only needs
/// to set `enabled: true` and the sections it cares about. Exporters are keyed by name in a
/// `BTreeMap` so that generation iterates them in a stable order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MonitoringSpec {
    /// Master switch. When false, no artifacts are produced at all.
    pub enabled: bool,

    /// The metrics collector (scrape loop, retention, alerting entry point).
    pub prometheus: PrometheusSpec,

    /// Per-exporter overrides, keyed by exporter name (e.g. "node", "systemd").
    pub exporters: BTreeMap<String, ExporterSpec>,

    /// Dashboard frontend and panel declarations.
    pub grafana: GrafanaSpec,

    /// Periodic local health checks outside the metrics pipeline.
    pub system_health: HealthSpec,

    /// Log ingestion endpoint and journal shipping agent.
    pub log_aggregation: LogSpec,

    /// Alert delivery channels.
    pub notification: NotificationSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_parses() {
        let spec: MonitoringSpec = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(spec.enabled);
        assert!(spec.exporters.is_empty());
        assert!(!spec.prometheus.enable);
        assert!(!spec.system_health.enable);
        assert!(!spec.log_aggregation.enable);
        assert!(!spec.notification.enable);
    }

    #[test]
    fn test_default_is_disabled() {
        let spec = MonitoringSpec::default();
        assert!(!spec.enabled);
    }

    #[test]
    fn test_exporters_iterate_in_name_order() {
        let json = r#"{
            "enabled": true,
            "exporters": {
                "systemd": {"enable": true},
                "node": {"enable": true}
            }
        }"#;
        let spec: MonitoringSpec = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = spec.exporters.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["node", "systemd"]);
    }
}
