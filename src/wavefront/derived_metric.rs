//! Derived metric wire model

use super::entity::Entity;
use super::Tags;
use serde::{Deserialize, Serialize};

/// A query evaluated on a schedule whose results are stored as a new metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetric {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub query: String,

    /// How often the query runs
    #[serde(default)]
    pub minutes: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional_information: String,

    #[serde(default)]
    pub tags: Tags,
}

impl Entity for DerivedMetric {
    const KIND: &'static str = "Derived Metric";
    const BASE_PATH: &'static str = "/api/v2/derivedmetric";
    const SEARCH_TYPE: &'static str = "derivedmetric";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}
