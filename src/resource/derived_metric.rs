//! `wavefront_derived_metric`

use super::common::trim_spaces;
use super::schema::{Attribute, AttributeType, Block, DiffSuppress, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::derived_metric::DerivedMetric;
use crate::wavefront::{Tags, WavefrontClient};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedMetricState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub query: String,
    pub minutes: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub additional_information: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl ResourceState for DerivedMetricState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl DerivedMetricState {
    pub fn build(&self) -> DerivedMetric {
        DerivedMetric {
            id: self.id.clone(),
            name: self.name.clone(),
            query: trim_spaces(&self.query),
            minutes: self.minutes,
            additional_information: self.additional_information.clone(),
            tags: Tags::new(self.tags.iter().cloned()),
        }
    }

    pub fn flatten(metric: &DerivedMetric) -> Self {
        Self {
            id: metric.id.clone(),
            name: metric.name.clone(),
            query: trim_spaces(&metric.query),
            minutes: metric.minutes,
            additional_information: metric.additional_information.clone(),
            tags: metric.tags.customer_tags.iter().cloned().collect(),
        }
    }
}

pub struct DerivedMetricResource;

#[async_trait]
impl Resource for DerivedMetricResource {
    type State = DerivedMetricState;

    fn type_name(&self) -> &'static str {
        "wavefront_derived_metric"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            1,
            Block::new()
                .attribute("name", Attribute::required(AttributeType::String))
                .attribute(
                    "query",
                    Attribute::required(AttributeType::String)
                        .suppress_diff(DiffSuppress::TrimSpaces),
                )
                .attribute(
                    "minutes",
                    Attribute::required(AttributeType::Int)
                        .describe("How often the query runs"),
                )
                .attribute(
                    "additional_information",
                    Attribute::optional(AttributeType::String),
                )
                .attribute(
                    "tags",
                    Attribute::optional(AttributeType::set(AttributeType::String)),
                ),
        )
    }

    async fn create(
        &self,
        client: &WavefrontClient,
        state: DerivedMetricState,
    ) -> Result<DerivedMetricState> {
        let mut metric = state.build();
        client
            .derived_metrics()
            .create(&mut metric)
            .await
            .with_context(|| format!("error creating derived metric {}", state.name))?;
        Ok(DerivedMetricState::flatten(&metric))
    }

    async fn read(
        &self,
        client: &WavefrontClient,
        state: DerivedMetricState,
    ) -> Result<Option<DerivedMetricState>> {
        let id = require_id(&state, self.type_name())?;
        let metric = client
            .derived_metrics()
            .fetch(id)
            .await
            .with_context(|| format!("error finding derived metric {}", id))?;
        Ok(metric.as_ref().map(DerivedMetricState::flatten))
    }

    async fn update(
        &self,
        client: &WavefrontClient,
        state: DerivedMetricState,
    ) -> Result<DerivedMetricState> {
        let id = require_id(&state, self.type_name())?;
        let Some(current) = client
            .derived_metrics()
            .fetch(id)
            .await
            .with_context(|| format!("error finding derived metric {}", id))?
        else {
            bail!("derived metric {} not found", id);
        };

        let mut metric = state.build();
        metric.id = current.id;
        client
            .derived_metrics()
            .update(&mut metric)
            .await
            .with_context(|| format!("error updating derived metric {}", id))?;
        Ok(DerivedMetricState::flatten(&metric))
    }

    async fn delete(&self, client: &WavefrontClient, state: DerivedMetricState) -> Result<()> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut metric) = client
            .derived_metrics()
            .fetch(id)
            .await
            .with_context(|| format!("error finding derived metric {}", id))?
        else {
            bail!("derived metric {} not found", id);
        };

        client
            .derived_metrics()
            .delete(&mut metric)
            .await
            .with_context(|| format!("error deleting derived metric {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_trims_query() {
        let state = DerivedMetricState {
            name: "rollup".to_string(),
            query: "  sum(ts(requests))\n".to_string(),
            minutes: 5,
            tags: ["b".to_string(), "a".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let metric = state.build();
        assert_eq!(metric.query, "sum(ts(requests))");
        assert_eq!(metric.tags.customer_tags, vec!["a", "b"]);
    }

    #[test]
    fn test_round_trip() {
        let state = DerivedMetricState {
            id: Some("dm-1".to_string()),
            name: "rollup".to_string(),
            query: "sum(ts(requests))".to_string(),
            minutes: 5,
            additional_information: "hourly".to_string(),
            tags: ["team".to_string()].into_iter().collect(),
        };
        assert_eq!(DerivedMetricState::flatten(&state.build()), state);
    }
}
