//! Alert rule synthesis: the fixed baseline group plus verbatim custom rule text.

use std::collections::BTreeMap;

use crate::{
    artifacts::{AlertRule, RuleDocument, RuleGroup},
    models::AlertingSpec,
};

/// Name of the fixed baseline rule group.
pub const BASELINE_GROUP_NAME: &str = "watchsmith-baseline";

fn rule(
    alert: &str,
    expr: &str,
    for_: &str,
    severity: &str,
    summary: &str,
    description: &str,
) -> AlertRule {
    let mut labels = BTreeMap::new();
    labels.insert("severity".to_string(), severity.to_string());
    let mut annotations = BTreeMap::new();
    annotations.insert("summary".to_string(), summary.to_string());
    annotations.insert("description".to_string(), description.to_string());
    AlertRule {
        alert: alert.to_string(),
        expr: expr.to_string(),
        for_: for_.to_string(),
        labels,
        annotations,
    }
}

/// The fixed baseline rules. Names are stable and never duplicated by user rules in the
/// same document, because user rules always land in a separate document.
pub fn baseline_rules() -> Vec<AlertRule> {
    vec![
        rule(
            "HighCpuUsage",
            "100 - (avg by (instance) (rate(node_cpu_seconds_total{mode=\"idle\"}[5m])) * 100) \
             > 90",
            "10m",
            "warning",
            "High CPU usage on {{ $labels.instance }}",
            "CPU usage is above 90% for more than 10 minutes (current value: {{ $value }}%).",
        ),
        rule(
            "HighMemoryUsage",
            "(1 - (node_memory_MemAvailable_bytes / node_memory_MemTotal_bytes)) * 100 > 90",
            "5m",
            "warning",
            "High memory usage on {{ $labels.instance }}",
            "Memory usage is above 90% for more than 5 minutes (current value: {{ $value }}%).",
        ),
        rule(
            "LowDiskSpace",
            "(node_filesystem_avail_bytes{fstype!~\"tmpfs|ramfs\"} / \
             node_filesystem_size_bytes{fstype!~\"tmpfs|ramfs\"}) * 100 < 15",
            "10m",
            "critical",
            "Low disk space on {{ $labels.instance }}",
            "Filesystem {{ $labels.mountpoint }} has less than 15% space available (current \
             value: {{ $value }}%).",
        ),
        rule(
            "SystemdUnitFailed",
            "node_systemd_unit_state{state=\"failed\"} == 1",
            "5m",
            "critical",
            "Systemd unit failed on {{ $labels.instance }}",
            "Unit {{ $labels.name }} has been in the failed state for more than 5 minutes.",
        ),
        rule(
            "HighLoadAverage",
            "node_load15 / count without (cpu, mode) (node_cpu_seconds_total{mode=\"idle\"}) > \
             1.5",
            "15m",
            "warning",
            "High load average on {{ $labels.instance }}",
            "The 15-minute load average exceeds 1.5 per core (current value: {{ $value }}).",
        ),
    ]
}

/// Synthesizes zero, one, or two rule documents from the alerting spec.
///
/// The baseline group is included iff `enable` is set; non-empty custom rule text is
/// emitted as a second, separate document without parsing or validation.
pub fn synthesize(alerting: &AlertingSpec) -> Vec<RuleDocument> {
    let mut documents = Vec::new();

    if alerting.enable {
        documents.push(RuleDocument::Baseline(RuleGroup {
            name: BASELINE_GROUP_NAME.to_string(),
            rules: baseline_rules(),
        }));
    }

    if !alerting.custom_rules.trim().is_empty() {
        documents.push(RuleDocument::Custom(alerting.custom_rules.clone()));
    }

    tracing::debug!(documents = documents.len(), "Synthesized alert rule documents.");
    documents
}
