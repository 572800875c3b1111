//! This module defines the alert delivery section of the specification.

use serde::{Deserialize, Serialize};
use url::Url;

/// Specification for alert delivery channels.
///
/// When `enable` is true at least one of `webhook`/`email` must be set; the composition
/// controller rejects the build otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NotificationSpec {
    /// Whether fired alerts are delivered anywhere.
    pub enable: bool,

    /// Webhook endpoint alerts are POSTed to.
    pub webhook: Option<Url>,

    /// Email delivery settings.
    pub email: Option<EmailConfig>,
}

impl NotificationSpec {
    /// Returns true when at least one delivery channel is configured.
    pub fn has_target(&self) -> bool {
        self.webhook.is_some() || self.email.is_some()
    }
}

/// Email delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailConfig {
    /// Recipient address.
    pub to: String,
    /// Sender address.
    pub from: String,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}
