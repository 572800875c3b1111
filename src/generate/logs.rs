//! Log pipeline wiring: ingestion endpoint plus journal shipping agent.

use std::collections::BTreeMap;

use crate::{
    artifacts::{
        HttpServerBlock, IngestorConfig, JournalScrape, JournalSettings, LimitsConfig,
        LogPipeline, ShipperClient, ShipperConfig, TableManagerConfig,
    },
    models::LogSpec,
};

/// Fixed HTTP port of the log ingestion endpoint.
pub const INGEST_PORT: u16 = 3100;

/// Fixed HTTP port of the journal shipping agent.
pub const SHIPPER_PORT: u16 = 9080;

/// Job label attached to every shipped journal stream.
const JOURNAL_JOB: &str = "systemd-journal";

/// Wires the log pipeline when log aggregation is enabled.
///
/// The single `retention` value from the spec is written into both the endpoint's limits
/// and its table manager from the same source, so the two settings cannot diverge.
pub fn wire(spec: &LogSpec) -> Option<LogPipeline> {
    if !spec.enable {
        return None;
    }

    let retention = spec.retention.clone();

    let ingestor = IngestorConfig {
        auth_enabled: false,
        server: HttpServerBlock { http_listen_port: INGEST_PORT },
        limits_config: LimitsConfig { retention_period: retention.clone() },
        table_manager: TableManagerConfig {
            retention_deletes_enabled: true,
            retention_period: retention,
        },
    };

    let mut labels = BTreeMap::new();
    labels.insert("job".to_string(), JOURNAL_JOB.to_string());
    labels.insert("host".to_string(), "${HOSTNAME}".to_string());

    let shipper = ShipperConfig {
        server: HttpServerBlock { http_listen_port: SHIPPER_PORT },
        clients: vec![ShipperClient {
            url: format!("http://127.0.0.1:{INGEST_PORT}/loki/api/v1/push"),
        }],
        scrape_configs: vec![JournalScrape {
            job_name: "journal".to_string(),
            journal: JournalSettings { labels },
        }],
    };

    tracing::debug!(ingest_port = INGEST_PORT, shipper_port = SHIPPER_PORT, "Wired log pipeline.");
    Some(LogPipeline { ingestor, shipper })
}
