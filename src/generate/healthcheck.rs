//! Health-check script assembly from a fixed library of check templates.
//!
//! The script is built by concatenating the selected check blocks, in canonical order,
//! onto a fixed prologue that defines the `log_metric`/`log_alert` helpers. Each block
//! guards its external probe tool with a `command -v` test, so a missing tool degrades to
//! a skipped metric instead of aborting the remaining checks.

use std::collections::BTreeSet;

use crate::{
    artifacts::HealthCheckScript,
    generate::error::ValidationError,
    models::{CheckKind, HealthSpec},
};

/// The fixed script prologue defining the output helpers.
const PROLOGUE: &str = r#"#!/usr/bin/env bash
# Generated health-check script. Do not edit; regenerate from the monitoring spec.
set -u

log_metric() {
    echo "metric $1"
}

log_alert() {
    echo "alert $1"
    logger -t healthcheck "ALERT: $1" 2>/dev/null || true
}

skip_check() {
    echo "skip $1 ($2 not available)"
}
"#;

const DISK_SPACE: &str = r#"
# check: disk-space
if command -v df >/dev/null 2>&1; then
    while read -r usage mount; do
        usage="${usage%\%}"
        log_metric "disk_usage_percent{mountpoint=\"${mount}\"}=${usage}"
        if [ "${usage}" -gt 85 ]; then
            log_alert "disk usage on ${mount} is ${usage}% (threshold 85%)"
        fi
    done < <(df --output=pcent,target -x tmpfs -x devtmpfs | tail -n +2)
else
    skip_check "disk-space" "df"
fi
"#;

const MEMORY_USAGE: &str = r#"
# check: memory-usage
if command -v free >/dev/null 2>&1; then
    usage=$(free | awk '/^Mem:/ { printf "%d", $3 / $2 * 100 }')
    log_metric "memory_usage_percent=${usage}"
    if [ "${usage}" -gt 90 ]; then
        log_alert "memory usage is ${usage}% (threshold 90%)"
    fi
else
    skip_check "memory-usage" "free"
fi
"#;

const SERVICE_STATUS: &str = r#"
# check: service-status
if command -v systemctl >/dev/null 2>&1; then
    failed=$(systemctl --failed --no-legend --plain | awk '{ print $1 }')
    count=$(printf '%s\n' "${failed}" | sed '/^$/d' | wc -l)
    log_metric "failed_units=${count}"
    for unit in ${failed}; do
        log_alert "systemd unit ${unit} has failed"
    done
else
    skip_check "service-status" "systemctl"
fi
"#;

// The maximum over all reported core temperatures is taken on purpose; the parse is
// known to be fragile against sensors output variation.
const CPU_TEMPERATURE: &str = r#"
# check: cpu-temperature
if command -v sensors >/dev/null 2>&1; then
    temp=$(sensors | grep -oP 'Core [0-9]+:\s+\+\K[0-9]+' | sort -n | tail -n 1)
    if [ -n "${temp}" ]; then
        log_metric "cpu_temperature_celsius=${temp}"
        if [ "${temp}" -gt 80 ]; then
            log_alert "CPU temperature is ${temp}C (threshold 80C)"
        fi
    fi
else
    skip_check "cpu-temperature" "sensors"
fi
"#;

const NETWORK_CONNECTIVITY: &str = r#"
# check: network-connectivity
if command -v ping >/dev/null 2>&1; then
    if ping -c 1 -W 2 1.1.1.1 >/dev/null 2>&1; then
        log_metric "network_reachable=1"
    else
        log_metric "network_reachable=0"
        log_alert "network connectivity check failed (ping 1.1.1.1)"
    fi
else
    skip_check "network-connectivity" "ping"
fi
"#;

const CERTIFICATE_EXPIRY: &str = r#"
# check: certificate-expiry
if command -v openssl >/dev/null 2>&1; then
    for cert in /etc/ssl/certs/local/*.pem; do
        [ -e "${cert}" ] || continue
        log_metric "certificate_checked{path=\"${cert}\"}=1"
        if ! openssl x509 -checkend 2592000 -noout -in "${cert}" >/dev/null 2>&1; then
            log_alert "certificate ${cert} expires within 30 days"
        fi
    done
else
    skip_check "certificate-expiry" "openssl"
fi
"#;

/// The template body for one check kind.
fn template(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::DiskSpace => DISK_SPACE,
        CheckKind::MemoryUsage => MEMORY_USAGE,
        CheckKind::ServiceStatus => SERVICE_STATUS,
        CheckKind::CpuTemperature => CPU_TEMPERATURE,
        CheckKind::NetworkConnectivity => NETWORK_CONNECTIVITY,
        CheckKind::CertificateExpiry => CERTIFICATE_EXPIRY,
    }
}

/// Builds the health-check script for the configured check set.
///
/// Unknown check names are appended to `errors` as `InvalidCheckKind`; known checks are
/// still assembled so all violations surface in one pass. Blocks are emitted in canonical
/// order regardless of the order the input names them in.
pub fn build(health: &HealthSpec, errors: &mut Vec<ValidationError>) -> Option<HealthCheckScript> {
    if !health.enable {
        return None;
    }

    let mut selected = BTreeSet::new();
    for name in &health.checks {
        match name.parse::<CheckKind>() {
            Ok(kind) => {
                selected.insert(kind);
            }
            Err(_) => errors.push(ValidationError::InvalidCheckKind { name: name.clone() }),
        }
    }

    let mut script = String::from(PROLOGUE);
    for kind in CheckKind::CANONICAL_ORDER {
        if selected.contains(&kind) {
            script.push_str(template(kind));
        }
    }

    tracing::debug!(checks = selected.len(), "Assembled health-check script.");
    Some(HealthCheckScript { script, interval: health.check_interval })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn spec(checks: &[&str]) -> HealthSpec {
        HealthSpec {
            enable: true,
            check_interval: Duration::from_secs(300),
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn markers(script: &str) -> Vec<&str> {
        script.lines().filter(|line| line.starts_with("# check: ")).collect()
    }

    #[test]
    fn test_disabled_health_builds_nothing() {
        let mut errors = Vec::new();
        assert!(build(&HealthSpec::default(), &mut errors).is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_only_selected_blocks_are_emitted() {
        let mut errors = Vec::new();
        let artifact = build(&spec(&["disk-space", "memory-usage"]), &mut errors).unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            markers(&artifact.script),
            vec!["# check: disk-space", "# check: memory-usage"]
        );
    }

    #[test]
    fn test_blocks_follow_canonical_order_regardless_of_input_order() {
        let mut errors = Vec::new();
        let artifact = build(
            &spec(&["certificate-expiry", "cpu-temperature", "disk-space", "service-status"]),
            &mut errors,
        )
        .unwrap();

        assert_eq!(
            markers(&artifact.script),
            vec![
                "# check: disk-space",
                "# check: service-status",
                "# check: cpu-temperature",
                "# check: certificate-expiry"
            ]
        );
    }

    #[test]
    fn test_every_block_guards_its_probe_tool() {
        let mut errors = Vec::new();
        let all: Vec<String> =
            CheckKind::CANONICAL_ORDER.iter().map(|k| k.name().to_string()).collect();
        let names: Vec<&str> = all.iter().map(String::as_str).collect();
        let artifact = build(&spec(&names), &mut errors).unwrap();

        let guards =
            artifact.script.matches("if command -v ").count();
        assert_eq!(guards, CheckKind::CANONICAL_ORDER.len());
        assert_eq!(artifact.script.matches("skip_check").count(), 7); // 6 blocks + helper
    }

    #[test]
    fn test_unknown_check_name_is_collected() {
        let mut errors = Vec::new();
        let artifact = build(&spec(&["disk-space", "swap-usage"]), &mut errors).unwrap();

        assert_eq!(
            errors,
            vec![ValidationError::InvalidCheckKind { name: "swap-usage".to_string() }]
        );
        assert_eq!(markers(&artifact.script), vec!["# check: disk-space"]);
    }

    #[test]
    fn test_prologue_defines_helpers() {
        let mut errors = Vec::new();
        let artifact = build(&spec(&[]), &mut errors).unwrap();
        assert!(artifact.script.starts_with("#!/usr/bin/env bash"));
        assert!(artifact.script.contains("log_metric()"));
        assert!(artifact.script.contains("log_alert()"));
    }

    #[test]
    fn test_interval_is_carried_through() {
        let mut errors = Vec::new();
        let mut health = spec(&["disk-space"]);
        health.check_interval = Duration::from_secs(120);
        let artifact = build(&health, &mut errors).unwrap();
        assert_eq!(artifact.interval_spec(), "120s");
    }
}
