//! Alert wire model

use super::entity::Entity;
use super::Tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Wavefront alert as the API represents it.
///
/// Classic alerts use `condition`, `severity` and `target`; threshold alerts
/// use the per-severity `conditions` and `targets` maps instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    /// `CLASSIC` or `THRESHOLD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_expression: String,

    #[serde(default)]
    pub minutes: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_after_minutes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_resend_frequency_minutes: Option<i64>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub severity: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional_information: String,

    #[serde(default)]
    pub tags: Tags,
}

impl Entity for Alert {
    const KIND: &'static str = "Alert";
    const BASE_PATH: &'static str = "/api/v2/alert";
    const SEARCH_TYPE: &'static str = "alert";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
