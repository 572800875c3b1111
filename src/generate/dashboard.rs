//! Dashboard synthesis: verbatim translation of the declared panel list into a single
//! schema-versioned document.

use std::collections::BTreeMap;

use crate::{
    artifacts::{
        Dashboard, DashboardPanel, FieldConfig, FieldDefaults, PanelGridPos, PanelTarget,
        TimeRange,
    },
    generate::error::ValidationError,
    models::DashboardSpec,
};

/// The single data source every panel is wired to.
const DATASOURCE: &str = "prometheus";

/// The emitted dashboard schema version, fixed regardless of panel count.
const SCHEMA_VERSION: u32 = 39;

/// Synthesizes the dashboard document from the panel list.
///
/// Panels are translated one-to-one with no merging. Duplicate panel ids are appended to
/// `errors` as `DuplicatePanelId`.
pub fn synthesize(spec: &DashboardSpec, errors: &mut Vec<ValidationError>) -> Dashboard {
    let mut seen: BTreeMap<u32, &str> = BTreeMap::new();
    for panel in &spec.panels {
        if let Some(first) = seen.get(&panel.id) {
            errors.push(ValidationError::DuplicatePanelId {
                id: panel.id,
                first: first.to_string(),
                second: panel.title.clone(),
            });
        } else {
            seen.insert(panel.id, panel.title.as_str());
        }
    }

    let panels = spec
        .panels
        .iter()
        .map(|panel| DashboardPanel {
            id: panel.id,
            title: panel.title.clone(),
            panel_type: panel.panel_type.clone(),
            datasource: DATASOURCE.to_string(),
            targets: vec![PanelTarget { expr: panel.query_expr.clone() }],
            field_config: FieldConfig { defaults: FieldDefaults { unit: panel.unit.clone() } },
            grid_pos: PanelGridPos {
                h: panel.grid_pos.h,
                w: panel.grid_pos.w,
                x: panel.grid_pos.x,
                y: panel.grid_pos.y,
            },
        })
        .collect();

    Dashboard {
        title: spec.title.clone(),
        tags: spec.tags.clone(),
        panels,
        time: TimeRange { from: "now-6h".to_string(), to: "now".to_string() },
        refresh: spec.refresh.clone(),
        schema_version: SCHEMA_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridPos, Panel};

    fn panel(id: u32, title: &str) -> Panel {
        Panel {
            id,
            title: title.to_string(),
            panel_type: "timeseries".to_string(),
            query_expr: "up".to_string(),
            unit: Some("percent".to_string()),
            grid_pos: GridPos { x: 0, y: 0, w: 12, h: 8 },
        }
    }

    #[test]
    fn test_panels_are_translated_verbatim_in_order() {
        let spec = DashboardSpec {
            panels: vec![panel(1, "CPU"), panel(2, "Memory")],
            ..DashboardSpec::default()
        };
        let mut errors = Vec::new();
        let dashboard = synthesize(&spec, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(dashboard.panels.len(), 2);
        assert_eq!(dashboard.panels[0].title, "CPU");
        assert_eq!(dashboard.panels[1].title, "Memory");
        assert_eq!(dashboard.panels[0].datasource, "prometheus");
        assert_eq!(dashboard.panels[0].targets[0].expr, "up");
        assert_eq!(dashboard.panels[0].field_config.defaults.unit.as_deref(), Some("percent"));
        assert_eq!(dashboard.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_duplicate_panel_id_is_collected() {
        let spec = DashboardSpec {
            panels: vec![panel(1, "CPU"), panel(1, "Memory")],
            ..DashboardSpec::default()
        };
        let mut errors = Vec::new();
        synthesize(&spec, &mut errors);

        assert_eq!(
            errors,
            vec![ValidationError::DuplicatePanelId {
                id: 1,
                first: "CPU".to_string(),
                second: "Memory".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_panel_list_still_yields_one_document() {
        let mut errors = Vec::new();
        let dashboard = synthesize(&DashboardSpec::default(), &mut errors);
        assert!(errors.is_empty());
        assert!(dashboard.panels.is_empty());
        assert_eq!(dashboard.title, "System overview");
    }
}
