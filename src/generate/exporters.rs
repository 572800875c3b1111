//! Exporter composition: overlaying user overrides on the default catalog and deriving
//! scrape jobs and port requirements.

use std::collections::BTreeMap;

use crate::{
    artifacts::{ResolvedExporter, ScrapeJob},
    catalog,
    generate::error::ValidationError,
    models::ExporterSpec,
};

/// A port binding requested by one component, used for conflict detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortClaim {
    /// Human-readable owner, named in conflict errors (e.g. "exporter 'node'").
    pub owner: String,
    /// The listen address of the binding.
    pub listen_address: String,
    /// The port of the binding.
    pub port: u16,
}

/// The output of exporter composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedExporters {
    /// Resolved exporters, in name order.
    pub resolved: Vec<ResolvedExporter>,
    /// Scrape jobs, one per resolved exporter, in name order.
    pub scrape_jobs: Vec<ScrapeJob>,
    /// Port claims of the resolved exporters.
    pub claims: Vec<PortClaim>,
}

/// Returns true when the address is a wildcard bind.
fn is_wildcard(address: &str) -> bool {
    address == "0.0.0.0" || address == "::" || address == "[::]"
}

/// Returns true when two claims cannot coexist.
///
/// Equal ports conflict when the addresses are equal or either side is a wildcard, since a
/// wildcard bind excludes every other bind on that port.
fn binds_conflict(a: &PortClaim, b: &PortClaim) -> bool {
    a.port == b.port
        && (a.listen_address == b.listen_address
            || is_wildcard(&a.listen_address)
            || is_wildcard(&b.listen_address))
}

/// Detects conflicts among all claim pairs, skipping pairs already checked elsewhere.
///
/// Pairs where both indices fall below `checked_prefix` are assumed to have been examined
/// by an earlier pass and are not re-reported.
pub fn detect_port_conflicts(claims: &[PortClaim], checked_prefix: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for i in 0..claims.len() {
        for j in (i + 1)..claims.len() {
            if j < checked_prefix {
                continue;
            }
            if binds_conflict(&claims[i], &claims[j]) {
                let address = if is_wildcard(&claims[i].listen_address) {
                    claims[i].listen_address.clone()
                } else {
                    claims[j].listen_address.clone()
                };
                errors.push(ValidationError::PortConflict {
                    port: claims[i].port,
                    listen_address: address,
                    first: claims[i].owner.clone(),
                    second: claims[j].owner.clone(),
                });
            }
        }
    }
    errors
}

/// Resolves a single exporter by layering the user spec over the catalog defaults.
///
/// User-set fields win; unset fields inherit the catalog entry. An exporter absent from
/// the catalog resolves only when the user supplies an explicit port.
fn resolve(name: &str, spec: &ExporterSpec) -> Result<ResolvedExporter, ValidationError> {
    let entry = catalog::lookup(name);

    let port = match (spec.port, entry) {
        (Some(port), _) => port,
        (None, Some(entry)) => entry.default_port,
        (None, None) => {
            return Err(ValidationError::UnknownExporter { name: name.to_string() });
        }
    };

    let listen_address = spec
        .listen_address
        .clone()
        .unwrap_or_else(|| entry.map_or("0.0.0.0", |e| e.default_listen_address).to_string());

    let collectors = entry
        .map(|e| e.default_collectors.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    Ok(ResolvedExporter {
        name: name.to_string(),
        port,
        listen_address,
        extra_flags: spec.extra_flags.clone(),
        collectors,
    })
}

/// Composes the enabled exporter set.
///
/// Resolution failures and port conflicts among the exporters themselves are appended to
/// `errors`; composition continues past failures so every violation is reported at once.
pub fn compose(
    exporters: &BTreeMap<String, ExporterSpec>,
    errors: &mut Vec<ValidationError>,
) -> ComposedExporters {
    let mut composed = ComposedExporters::default();

    for (name, spec) in exporters {
        if !spec.enable {
            continue;
        }
        match resolve(name, spec) {
            Ok(resolved) => {
                tracing::debug!(
                    exporter = %resolved.name,
                    target = %resolved.target(),
                    "Resolved exporter."
                );
                composed.scrape_jobs.push(ScrapeJob::single(resolved.job_name(), resolved.target()));
                composed.claims.push(PortClaim {
                    owner: format!("exporter '{}'", resolved.name),
                    listen_address: resolved.listen_address.clone(),
                    port: resolved.port,
                });
                composed.resolved.push(resolved);
            }
            Err(error) => errors.push(error),
        }
    }

    errors.extend(detect_port_conflicts(&composed.claims, 0));

    composed
}
