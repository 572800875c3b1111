//! This module defines the dashboard frontend section of the specification.

use serde::{Deserialize, Serialize};

/// Specification for the dashboard frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrafanaSpec {
    /// Whether the dashboard frontend runs and a dashboard document is synthesized.
    pub enable: bool,

    /// Port the frontend listens on.
    pub port: u16,

    /// Address the frontend binds to.
    pub listen_address: String,

    /// The dashboard to synthesize.
    pub dashboard: DashboardSpec,
}

impl Default for GrafanaSpec {
    fn default() -> Self {
        Self {
            enable: false,
            port: 3000,
            listen_address: "0.0.0.0".to_string(),
            dashboard: DashboardSpec::default(),
        }
    }
}

/// An ordered list of panels plus dashboard-level presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardSpec {
    /// Dashboard title.
    pub title: String,

    /// Dashboard tags.
    pub tags: Vec<String>,

    /// Auto-refresh interval (duration string, e.g. "30s").
    pub refresh: String,

    /// The panels, in declaration order. Panel ids must be unique.
    pub panels: Vec<Panel>,
}

impl Default for DashboardSpec {
    fn default() -> Self {
        Self {
            title: "System overview".to_string(),
            tags: vec!["watchsmith".to_string()],
            refresh: "30s".to_string(),
            panels: Vec::new(),
        }
    }
}

/// A single dashboard panel, translated verbatim into the output document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Panel {
    /// Panel identifier, unique within the dashboard.
    pub id: u32,
    /// Panel title.
    pub title: String,
    /// Panel visualization type (e.g. "timeseries", "gauge").
    #[serde(rename = "type")]
    pub panel_type: String,
    /// The query expression the panel visualizes (opaque to the generator).
    pub query_expr: String,
    /// Optional display unit (e.g. "percent", "bytes").
    #[serde(default)]
    pub unit: Option<String>,
    /// Position and size on the dashboard grid.
    pub grid_pos: GridPos,
}

/// Grid position and size of a panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridPos {
    /// Column offset.
    pub x: u32,
    /// Row offset.
    pub y: u32,
    /// Width in grid columns.
    pub w: u32,
    /// Height in grid rows.
    pub h: u32,
}
