//! The composition controller: orchestrates the subsystem generators, aggregates firewall
//! port requirements, and performs final cross-component validation.
//!
//! Generation is atomic: either every artifact is produced, or a single
//! [`GenerationError`] enumerating every violation is returned and nothing is emitted.

pub mod alerts;
pub mod dashboard;
pub mod error;
pub mod exporters;
pub mod healthcheck;
pub mod logs;

pub use error::{GenerationError, ValidationError};

use crate::{
    artifacts::{
        ArtifactBundle, FirewallPorts, GlobalScrapeOptions, NotificationConfig, Receiver,
        ScrapeConfig, ScrapeJob,
    },
    generate::exporters::PortClaim,
    models::MonitoringSpec,
};

/// A subsystem's participation in the build.
enum Section<'a, T> {
    Disabled,
    Enabled(&'a T),
}

fn section<T>(enabled: bool, config: &T) -> Section<'_, T> {
    if enabled {
        Section::Enabled(config)
    } else {
        Section::Disabled
    }
}

/// Generates the full artifact bundle from a monitoring specification.
///
/// When the spec's master switch is off, an empty bundle is returned and nothing is
/// produced. All build-time validation failures across every subsystem are collected and
/// returned together.
pub fn generate(spec: &MonitoringSpec) -> Result<ArtifactBundle, GenerationError> {
    if !spec.enabled {
        tracing::info!("Monitoring is disabled; producing no artifacts.");
        return Ok(ArtifactBundle::default());
    }

    let mut errors = Vec::new();

    // Exporters: resolution plus conflicts among the exporters themselves.
    let composed = exporters::compose(&spec.exporters, &mut errors);
    let exporter_claim_count = composed.claims.len();
    let mut claims = composed.claims.clone();

    let mut scrape_config = ScrapeConfig::default();
    let mut firewall = FirewallPorts::default();

    for claim in &composed.claims {
        firewall.tcp.insert(claim.port);
    }

    let rule_documents = match section(spec.prometheus.enable, &spec.prometheus) {
        Section::Enabled(prometheus) => {
            claims.push(PortClaim {
                owner: "prometheus".to_string(),
                listen_address: prometheus.listen_address.clone(),
                port: prometheus.port,
            });
            firewall.tcp.insert(prometheus.port);

            scrape_config.global = Some(GlobalScrapeOptions {
                scrape_interval: prometheus.scrape_interval.clone(),
                evaluation_interval: prometheus.evaluation_interval.clone(),
            });
            scrape_config.scrape_configs.push(ScrapeJob::single(
                "prometheus",
                format!("{}:{}", prometheus.listen_address, prometheus.port),
            ));
            scrape_config.remote_write = prometheus.remote_write.clone();

            alerts::synthesize(&prometheus.alerting)
        }
        Section::Disabled => Vec::new(),
    };
    scrape_config.scrape_configs.extend(composed.scrape_jobs);

    let dashboard = match section(spec.grafana.enable, &spec.grafana) {
        Section::Enabled(grafana) => {
            claims.push(PortClaim {
                owner: "grafana".to_string(),
                listen_address: grafana.listen_address.clone(),
                port: grafana.port,
            });
            firewall.tcp.insert(grafana.port);
            Some(dashboard::synthesize(&grafana.dashboard, &mut errors))
        }
        Section::Disabled => None,
    };

    let health_check = healthcheck::build(&spec.system_health, &mut errors);

    let log_pipeline = logs::wire(&spec.log_aggregation);
    if log_pipeline.is_some() {
        for (owner, port) in [
            ("log ingestion endpoint", logs::INGEST_PORT),
            ("log shipping agent", logs::SHIPPER_PORT),
        ] {
            claims.push(PortClaim {
                owner: owner.to_string(),
                listen_address: "0.0.0.0".to_string(),
                port,
            });
            firewall.tcp.insert(port);
        }
    }

    let notification = match section(spec.notification.enable, &spec.notification) {
        Section::Enabled(notification) if !notification.has_target() => {
            errors.push(ValidationError::MissingNotificationTarget);
            None
        }
        Section::Enabled(notification) => {
            let mut receivers = Vec::new();
            if let Some(url) = &notification.webhook {
                receivers.push(Receiver::Webhook { url: url.clone() });
            }
            if let Some(email) = &notification.email {
                receivers.push(Receiver::Email {
                    to: email.to.clone(),
                    from: email.from.clone(),
                    smtp_host: email.smtp_host.clone(),
                });
            }
            Some(NotificationConfig { receivers })
        }
        Section::Disabled => None,
    };

    // Cross-component conflicts; exporter-exporter pairs were checked during composition.
    errors.extend(exporters::detect_port_conflicts(&claims, exporter_claim_count));

    if !errors.is_empty() {
        tracing::warn!(violations = errors.len(), "Generation rejected by validation.");
        return Err(GenerationError { errors });
    }

    tracing::info!(
        scrape_jobs = scrape_config.scrape_configs.len(),
        rule_documents = rule_documents.len(),
        tcp_ports = firewall.tcp.len(),
        "Generated artifact bundle."
    );

    Ok(ArtifactBundle {
        exporters: composed.resolved,
        scrape_config,
        rule_documents,
        dashboard,
        health_check,
        firewall,
        log_pipeline,
        notification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExporterSpec, NotificationSpec};

    #[test]
    fn test_disabled_spec_produces_empty_bundle() {
        let spec = MonitoringSpec {
            enabled: false,
            notification: NotificationSpec { enable: true, webhook: None, email: None },
            ..MonitoringSpec::default()
        };
        // Master switch off: not even validation runs, nothing is produced.
        let bundle = generate(&spec).unwrap();
        assert_eq!(bundle, ArtifactBundle::default());
    }

    #[test]
    fn test_violations_across_subsystems_are_reported_together() {
        let mut spec = MonitoringSpec { enabled: true, ..MonitoringSpec::default() };
        spec.exporters.insert(
            "teapot".to_string(),
            ExporterSpec { enable: true, ..ExporterSpec::default() },
        );
        spec.system_health.enable = true;
        spec.system_health.checks = vec!["swap-usage".to_string()];
        spec.notification.enable = true;

        let error = generate(&spec).unwrap_err();
        assert_eq!(error.errors.len(), 3);
        assert!(error
            .errors
            .contains(&ValidationError::UnknownExporter { name: "teapot".to_string() }));
        assert!(error
            .errors
            .contains(&ValidationError::InvalidCheckKind { name: "swap-usage".to_string() }));
        assert!(error.errors.contains(&ValidationError::MissingNotificationTarget));
    }

    #[test]
    fn test_prometheus_port_conflicts_with_exporter() {
        let mut spec = MonitoringSpec { enabled: true, ..MonitoringSpec::default() };
        spec.prometheus.enable = true;
        spec.prometheus.port = 9100;
        spec.exporters.insert(
            "node".to_string(),
            ExporterSpec { enable: true, ..ExporterSpec::default() },
        );

        let error = generate(&spec).unwrap_err();
        assert_eq!(error.errors.len(), 1);
        assert!(matches!(
            &error.errors[0],
            ValidationError::PortConflict { port: 9100, first, second, .. }
                if first == "exporter 'node'" && second == "prometheus"
        ));
    }

    #[test]
    fn test_log_pipeline_ports_join_the_firewall_set() {
        let mut spec = MonitoringSpec { enabled: true, ..MonitoringSpec::default() };
        spec.log_aggregation.enable = true;

        let bundle = generate(&spec).unwrap();
        assert!(bundle.firewall.tcp.contains(&3100));
        assert!(bundle.firewall.tcp.contains(&9080));
        assert!(bundle.firewall.udp.is_empty());
    }
}
