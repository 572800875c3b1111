//! Build-time validation errors and their aggregation.

use std::fmt;

use thiserror::Error;

/// A single build-time validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two enabled components claim the same address:port binding.
    #[error("port conflict on {listen_address}:{port}: claimed by both '{first}' and '{second}'")]
    PortConflict {
        /// The contested port.
        port: u16,
        /// The contested listen address (the wildcard side when one bind is a wildcard).
        listen_address: String,
        /// The first claimant (in deterministic order).
        first: String,
        /// The second claimant.
        second: String,
    },

    /// Notifications are enabled but no delivery channel is configured.
    #[error("notifications are enabled but neither a webhook nor an email target is set")]
    MissingNotificationTarget,

    /// The health-check set names a check kind that does not exist.
    #[error("unknown health check kind: '{name}'")]
    InvalidCheckKind {
        /// The unresolvable check name.
        name: String,
    },

    /// An enabled exporter has no catalog entry and no explicit port to resolve with.
    #[error("exporter '{name}' is not in the default catalog and sets no explicit port")]
    UnknownExporter {
        /// The unresolvable exporter name.
        name: String,
    },

    /// Two dashboard panels use the same id.
    #[error("dashboard panel id {id} is used by both '{first}' and '{second}'")]
    DuplicatePanelId {
        /// The duplicated id.
        id: u32,
        /// Title of the first panel using the id.
        first: String,
        /// Title of the second panel using the id.
        second: String,
    },
}

/// The aggregated failure of a generation pass.
///
/// Generation never fails fast: every detectable violation is collected so the operator
/// can fix the complete set in one edit. No artifact is emitted when this error is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    /// Every violation found, in detection order.
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "generation failed with {} validation error(s):", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_enumerates_every_error() {
        let error = GenerationError {
            errors: vec![
                ValidationError::MissingNotificationTarget,
                ValidationError::InvalidCheckKind { name: "swap-usage".to_string() },
            ],
        };
        let text = error.to_string();
        assert!(text.contains("2 validation error(s)"));
        assert!(text.contains("neither a webhook nor an email target"));
        assert!(text.contains("swap-usage"));
    }

    #[test]
    fn test_port_conflict_names_both_claimants() {
        let error = ValidationError::PortConflict {
            port: 9100,
            listen_address: "127.0.0.1".to_string(),
            first: "exporter 'node'".to_string(),
            second: "exporter 'custom'".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("exporter 'node'"));
        assert!(text.contains("exporter 'custom'"));
        assert!(text.contains("127.0.0.1:9100"));
    }
}
