//! This module defines the system health-check section of the specification.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{deserialize_duration_from_seconds, serialize_duration_to_seconds};

/// Specification for the generated periodic health-check script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthSpec {
    /// Whether the health-check script is generated and scheduled.
    pub enable: bool,

    /// How often the script runs, in seconds.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds"
    )]
    pub check_interval: Duration,

    /// Names of the checks to include. Kept as raw strings in the input model so that an
    /// unknown name becomes a collected build error instead of a fail-fast parse error.
    pub checks: Vec<String>,
}

impl Default for HealthSpec {
    fn default() -> Self {
        Self { enable: false, check_interval: Duration::from_secs(300), checks: Vec::new() }
    }
}

/// The known health-check kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Filesystem usage per mount point.
    DiskSpace,
    /// Memory usage percentage.
    MemoryUsage,
    /// Maximum reported CPU core temperature.
    CpuTemperature,
    /// Failed service units.
    ServiceStatus,
    /// Reachability of an external address.
    NetworkConnectivity,
    /// Certificates approaching expiry.
    CertificateExpiry,
}

impl CheckKind {
    /// The canonical emission order of check blocks in the generated script.
    ///
    /// This order is fixed regardless of the order the input names the checks in.
    pub const CANONICAL_ORDER: [CheckKind; 6] = [
        CheckKind::DiskSpace,
        CheckKind::MemoryUsage,
        CheckKind::ServiceStatus,
        CheckKind::CpuTemperature,
        CheckKind::NetworkConnectivity,
        CheckKind::CertificateExpiry,
    ];

    /// The kebab-case wire name of this check kind.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::DiskSpace => "disk-space",
            CheckKind::MemoryUsage => "memory-usage",
            CheckKind::CpuTemperature => "cpu-temperature",
            CheckKind::ServiceStatus => "service-status",
            CheckKind::NetworkConnectivity => "network-connectivity",
            CheckKind::CertificateExpiry => "certificate-expiry",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a check name does not match any known kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown health check kind: '{0}'")]
pub struct UnknownCheckKind(pub String);

impl FromStr for CheckKind {
    type Err = UnknownCheckKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disk-space" => Ok(CheckKind::DiskSpace),
            "memory-usage" => Ok(CheckKind::MemoryUsage),
            "cpu-temperature" => Ok(CheckKind::CpuTemperature),
            "service-status" => Ok(CheckKind::ServiceStatus),
            "network-connectivity" => Ok(CheckKind::NetworkConnectivity),
            "certificate-expiry" => Ok(CheckKind::CertificateExpiry),
            other => Err(UnknownCheckKind(other.to_string())),
        }
    }
}
