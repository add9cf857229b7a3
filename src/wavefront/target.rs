//! Alert target (notificant) wire model

use super::entity::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a target delivers notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetMethod {
    #[default]
    Email,
    Webhook,
    Pagerduty,
}

impl TargetMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Webhook => "WEBHOOK",
            Self::Pagerduty => "PAGERDUTY",
        }
    }
}

impl fmt::Display for TargetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-route sending a subset of notifications elsewhere.
/// `filter` is `"<key> <value>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRoute {
    pub method: TargetMethod,
    pub target: String,
    #[serde(default)]
    pub filter: String,
}

/// A notification target for alerts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Mustache template for the notification body
    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub method: TargetMethod,

    /// Email addresses, webhook URL or PagerDuty key
    #[serde(default)]
    pub recipient: String,

    /// EMAIL targets only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email_subject: String,

    /// EMAIL targets only
    #[serde(default)]
    pub is_html_content: bool,

    /// WEBHOOK targets only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_type: String,

    /// WEBHOOK targets only
    #[serde(default, rename = "customHttpHeaders")]
    pub custom_headers: BTreeMap<String, String>,

    /// Alert states that fire this target (ALERT_OPENED, ALERT_RESOLVED, ...)
    #[serde(default)]
    pub triggers: Vec<String>,

    #[serde(default)]
    pub routes: Vec<AlertRoute>,
}

impl Entity for Target {
    const KIND: &'static str = "Target";
    const BASE_PATH: &'static str = "/api/v2/notificant";
    const SEARCH_TYPE: &'static str = "notificant";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
