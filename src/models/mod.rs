//! This module contains the input data model for the monitoring specification.

pub mod exporter;
pub mod grafana;
pub mod health;
pub mod logs;
pub mod monitoring;
pub mod notification;
pub mod prometheus;

pub use exporter::ExporterSpec;
pub use grafana::{DashboardSpec, GrafanaSpec, GridPos, Panel};
pub use health::{CheckKind, HealthSpec, UnknownCheckKind};
pub use logs::LogSpec;
pub use monitoring::MonitoringSpec;
pub use notification::{EmailConfig, NotificationSpec};
pub use prometheus::{AlertingSpec, PrometheusSpec, RemoteWriteTarget};
