//! This module defines the log-aggregation section of the specification.

use serde::{Deserialize, Serialize};

/// Specification for the log ingestion endpoint and shipping agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSpec {
    /// Whether the log pipeline (ingestion endpoint + journal shipper) is wired up.
    pub enable: bool,

    /// How long ingested log data is kept (duration string, e.g. "336h").
    ///
    /// This single value is propagated to both the endpoint's retention policy and its
    /// table manager; the two settings cannot diverge.
    pub retention: String,
}

impl Default for LogSpec {
    fn default() -> Self {
        Self { enable: false, retention: "336h".to_string() }
    }
}
