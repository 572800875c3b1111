//! Typed output artifacts and their deterministic text rendering.
//!
//! Every artifact is a plain serde structure with ordered collections only (`Vec`,
//! `BTreeMap`, `BTreeSet`), so rendering the same bundle twice produces byte-identical
//! text. Rendering is infallible for well-formed artifacts; serialization errors are
//! surfaced as [`RenderError`] rather than panics.

use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{
    config::{deserialize_duration_from_seconds, serialize_duration_to_seconds},
    models::RemoteWriteTarget,
};

/// Errors that can occur while rendering an artifact to text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// YAML serialization failed.
    #[error("Failed to render YAML artifact: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failed.
    #[error("Failed to render JSON artifact: {0}")]
    Json(#[from] serde_json::Error),
}

/// The complete set of artifacts produced by one generation pass.
///
/// A disabled specification yields the default value: every field empty or `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtifactBundle {
    /// The enabled-exporter set, fully resolved, in name order.
    pub exporters: Vec<ResolvedExporter>,

    /// Scrape targets for the metrics collector.
    pub scrape_config: ScrapeConfig,

    /// Zero, one, or two alerting rule documents.
    pub rule_documents: Vec<RuleDocument>,

    /// The synthesized dashboard document, when the frontend is enabled.
    pub dashboard: Option<Dashboard>,

    /// The generated health-check script and its recurrence, when enabled.
    pub health_check: Option<HealthCheckScript>,

    /// Aggregated firewall port requirements across all enabled components.
    pub firewall: FirewallPorts,

    /// Log ingestion endpoint and shipping agent configs, when enabled.
    pub log_pipeline: Option<LogPipeline>,

    /// Alert receiver wiring, when notifications are enabled.
    pub notification: Option<NotificationConfig>,
}

/// A fully resolved exporter: every field settled from either the user spec or the catalog.
///
/// This is the enabled-exporter set the consuming engine launches exporter services from;
/// the scrape jobs and firewall ports are derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedExporter {
    /// Exporter name.
    pub name: String,
    /// Resolved listen port.
    pub port: u16,
    /// Resolved listen address.
    pub listen_address: String,
    /// Extra command-line flags from the user spec.
    pub extra_flags: Vec<String>,
    /// Resolved collector set (catalog default; the catalog is the only source today).
    pub collectors: Vec<String>,
}

impl ResolvedExporter {
    /// The scrape job name for this exporter.
    pub fn job_name(&self) -> String {
        format!("exporter-{}", self.name)
    }

    /// The scrape target as a `host:port` string.
    pub fn target(&self) -> String {
        format!("{}:{}", self.listen_address, self.port)
    }
}

/// Scrape configuration: global intervals plus an ordered job list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScrapeConfig {
    /// Global scrape options, present when the collector itself is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalScrapeOptions>,

    /// The scrape jobs, in deterministic order (self-scrape first, then exporters by name).
    pub scrape_configs: Vec<ScrapeJob>,

    /// Remote-write destinations, forwarded from the specification.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub remote_write: Vec<RemoteWriteTarget>,
}

impl ScrapeConfig {
    /// Renders the scrape configuration as YAML.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Collector-global scrape and evaluation intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalScrapeOptions {
    /// Interval between scrapes (duration string).
    pub scrape_interval: String,
    /// Interval between rule evaluations (duration string).
    pub evaluation_interval: String,
}

/// One named scrape target list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapeJob {
    /// The job name (e.g. "exporter-node").
    pub job_name: String,
    /// The static targets, as `host:port` strings.
    pub static_configs: Vec<StaticConfig>,
}

impl ScrapeJob {
    /// Creates a job with a single target.
    pub fn single(job_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            static_configs: vec![StaticConfig { targets: vec![target.into()] }],
        }
    }
}

/// A static target group within a scrape job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticConfig {
    /// Targets as `host:port` strings.
    pub targets: Vec<String>,
}

/// A single alerting rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRule {
    /// Unique rule name within its group.
    pub alert: String,
    /// The query expression (opaque to the generator).
    pub expr: String,
    /// How long the expression must hold before the alert fires (duration string).
    #[serde(rename = "for")]
    pub for_: String,
    /// Labels attached to the fired alert (e.g. severity).
    pub labels: BTreeMap<String, String>,
    /// Templated annotations attached to the fired alert.
    pub annotations: BTreeMap<String, String>,
}

/// A named group of alerting rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleGroup {
    /// Group name.
    pub name: String,
    /// The rules, in fixed order.
    pub rules: Vec<AlertRule>,
}

/// One emitted rule document.
///
/// The baseline document is fully typed; user-supplied custom rules are carried verbatim
/// and never merged into the baseline group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleDocument {
    /// The fixed baseline rule group, rendered as a `{groups: [...]}` document.
    Baseline(RuleGroup),
    /// Raw user-supplied rule text, emitted without parsing or validation.
    Custom(String),
}

impl RuleDocument {
    /// The file stem this document is written under.
    pub fn file_stem(&self) -> &'static str {
        match self {
            RuleDocument::Baseline(_) => "baseline.rules",
            RuleDocument::Custom(_) => "custom.rules",
        }
    }

    /// Renders the document as rule-file text.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            RuleDocument::Baseline(group) => {
                #[derive(Serialize)]
                struct RuleFile<'a> {
                    groups: [&'a RuleGroup; 1],
                }
                Ok(serde_yaml::to_string(&RuleFile { groups: [group] })?)
            }
            RuleDocument::Custom(text) => Ok(text.clone()),
        }
    }
}

/// The synthesized dashboard document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    /// Dashboard title.
    pub title: String,
    /// Dashboard tags.
    pub tags: Vec<String>,
    /// Translated panels, in declaration order.
    pub panels: Vec<DashboardPanel>,
    /// Displayed time range.
    pub time: TimeRange,
    /// Auto-refresh interval (duration string).
    pub refresh: String,
    /// Emitted schema version; fixed so consumers see one schema regardless of panel count.
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
}

impl Dashboard {
    /// Renders the dashboard as pretty-printed JSON.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Displayed time range of a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    /// Range start (relative expression, e.g. "now-6h").
    pub from: String,
    /// Range end.
    pub to: String,
}

/// A translated dashboard panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardPanel {
    /// Panel identifier, unique within the dashboard.
    pub id: u32,
    /// Panel title.
    pub title: String,
    /// Panel visualization type.
    #[serde(rename = "type")]
    pub panel_type: String,
    /// The data source every panel is wired to.
    pub datasource: String,
    /// Query targets; exactly one per panel.
    pub targets: Vec<PanelTarget>,
    /// Field display defaults.
    #[serde(rename = "fieldConfig")]
    pub field_config: FieldConfig,
    /// Position and size on the dashboard grid.
    #[serde(rename = "gridPos")]
    pub grid_pos: PanelGridPos,
}

/// A panel query target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelTarget {
    /// The query expression.
    pub expr: String,
}

/// Field display defaults of a panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    /// Default field options.
    pub defaults: FieldDefaults,
}

/// Default field options of a panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldDefaults {
    /// Display unit, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Grid position in the output document's key order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelGridPos {
    /// Height in grid rows.
    pub h: u32,
    /// Width in grid columns.
    pub w: u32,
    /// Column offset.
    pub x: u32,
    /// Row offset.
    pub y: u32,
}

/// The generated health-check script plus its recurrence spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthCheckScript {
    /// The shell-executable script body.
    pub script: String,
    /// How often the external scheduler should run the script.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds"
    )]
    pub interval: Duration,
}

impl HealthCheckScript {
    /// The recurrence spec handed to the scheduler, as a seconds-based interval string.
    pub fn interval_spec(&self) -> String {
        format!("{}s", self.interval.as_secs())
    }
}

/// Aggregated firewall port requirements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallPorts {
    /// TCP ports that must be reachable.
    pub tcp: BTreeSet<u16>,
    /// UDP ports that must be reachable.
    pub udp: BTreeSet<u16>,
}

impl FirewallPorts {
    /// Renders the port set as JSON.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The log pipeline config pair: ingestion endpoint plus shipping agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogPipeline {
    /// The ingestion endpoint configuration.
    pub ingestor: IngestorConfig,
    /// The journal shipping agent configuration.
    pub shipper: ShipperConfig,
}

/// Configuration of the log ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestorConfig {
    /// Whether per-tenant authentication is enabled. Always false for a single-host setup.
    pub auth_enabled: bool,
    /// HTTP server settings.
    pub server: HttpServerBlock,
    /// Ingestion limits, including the retention policy.
    pub limits_config: LimitsConfig,
    /// Storage table management, including its own copy of the retention period.
    pub table_manager: TableManagerConfig,
}

impl IngestorConfig {
    /// Renders the endpoint configuration as YAML.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Configuration of the journal shipping agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipperConfig {
    /// HTTP server settings of the agent itself.
    pub server: HttpServerBlock,
    /// Push endpoints the agent forwards to.
    pub clients: Vec<ShipperClient>,
    /// Journal scrape definitions.
    pub scrape_configs: Vec<JournalScrape>,
}

impl ShipperConfig {
    /// Renders the agent configuration as YAML.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// An HTTP listen block shared by the ingestion endpoint and the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpServerBlock {
    /// The HTTP listen port.
    pub http_listen_port: u16,
}

/// Ingestion limits of the log endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// How long ingested data is kept (duration string).
    pub retention_period: String,
}

/// Storage table management of the log endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableManagerConfig {
    /// Whether expired tables are deleted.
    pub retention_deletes_enabled: bool,
    /// How long tables are kept; always equal to the limits retention period.
    pub retention_period: String,
}

/// A push destination of the shipping agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipperClient {
    /// Push endpoint URL.
    pub url: String,
}

/// A journal scrape definition of the shipping agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalScrape {
    /// Scrape job name.
    pub job_name: String,
    /// Journal reading settings.
    pub journal: JournalSettings,
}

/// Journal reading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalSettings {
    /// Labels attached to every shipped stream.
    pub labels: BTreeMap<String, String>,
}

/// Alert receiver wiring for the notification channels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// The configured receivers, webhook first, then email.
    pub receivers: Vec<Receiver>,
}

impl NotificationConfig {
    /// Renders the receiver wiring as YAML.
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// One alert delivery receiver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// Deliver alerts by POSTing to a webhook.
    Webhook {
        /// The webhook endpoint.
        url: Url,
    },
    /// Deliver alerts by email.
    Email {
        /// Recipient address.
        to: String,
        /// Sender address.
        from: String,
        /// SMTP relay host.
        smtp_host: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_config_renders_jobs_in_order() {
        let config = ScrapeConfig {
            global: None,
            scrape_configs: vec![
                ScrapeJob::single("prometheus", "0.0.0.0:9090"),
                ScrapeJob::single("exporter-node", "0.0.0.0:9100"),
            ],
            remote_write: Vec::new(),
        };
        let text = config.render().unwrap();
        let prom = text.find("job_name: prometheus").unwrap();
        let node = text.find("job_name: exporter-node").unwrap();
        assert!(prom < node);
        assert!(!text.contains("remote_write"));
    }

    #[test]
    fn test_rule_document_custom_is_verbatim() {
        let text = "groups:\n  - name: mine\n    rules: []\n";
        let doc = RuleDocument::Custom(text.to_string());
        assert_eq!(doc.render().unwrap(), text);
        assert_eq!(doc.file_stem(), "custom.rules");
    }

    #[test]
    fn test_alert_rule_serializes_for_keyword() {
        let rule = AlertRule {
            alert: "HighCpuUsage".to_string(),
            expr: "cpu > 90".to_string(),
            for_: "10m".to_string(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        };
        let yaml = serde_yaml::to_string(&rule).unwrap();
        assert!(yaml.contains("for: 10m"));
        assert!(!yaml.contains("for_"));
    }

    #[test]
    fn test_health_check_interval_spec() {
        let artifact = HealthCheckScript {
            script: "#!/usr/bin/env bash\n".to_string(),
            interval: Duration::from_secs(120),
        };
        assert_eq!(artifact.interval_spec(), "120s");
    }

    #[test]
    fn test_firewall_ports_render_sorted() {
        let mut ports = FirewallPorts::default();
        ports.tcp.insert(9558);
        ports.tcp.insert(9090);
        ports.tcp.insert(9100);
        let json = ports.render().unwrap();
        let i9090 = json.find("9090").unwrap();
        let i9100 = json.find("9100").unwrap();
        let i9558 = json.find("9558").unwrap();
        assert!(i9090 < i9100 && i9100 < i9558);
    }
}
