//! `wavefront_dashboard`
//!
//! Local state mirrors the dashboard tree with singular block names
//! (`section` > `row` > `chart` > `source`). Parameter details are a map keyed
//! by name on the wire and a list sorted by name locally.

use super::chart_settings::ChartSettingsState;
use super::common::trim_spaces;
use super::schema::{Attribute, AttributeType, Block, DiffSuppress, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::dashboard::{Chart, Dashboard, ParameterDetail, Row, Section, Source};
use crate::wavefront::{Tags, WavefrontClient};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_SUMMARIZATION: &str = "MEAN";
pub const DEFAULT_SCATTER_PLOT_SOURCE: &str = "Y";
pub const DEFAULT_EVENT_FILTER_TYPE: &str = "BYCHART";

fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceState {
    pub name: String,
    pub query: String,
    pub disabled: bool,
    pub scatter_plot_source: String,
    pub query_builder_enabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_description: String,
}

impl SourceState {
    fn build(&self) -> Source {
        Source {
            name: self.name.clone(),
            query: trim_spaces(&self.query),
            disabled: self.disabled,
            scatter_plot_source: self.scatter_plot_source.clone(),
            query_builder_enabled: self.query_builder_enabled,
            source_description: self.source_description.clone(),
        }
    }

    fn flatten(source: &Source) -> Self {
        Self {
            name: source.name.clone(),
            query: trim_spaces(&source.query),
            disabled: source.disabled,
            scatter_plot_source: source.scatter_plot_source.clone(),
            query_builder_enabled: source.query_builder_enabled,
            source_description: source.source_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartState {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub units: String,
    pub source: Vec<SourceState>,
    pub summarization: String,
    pub base: i64,
    pub include_obsolete_metrics: bool,
    pub interpolate_points: bool,
    pub no_default_events: bool,
    #[serde(skip_serializing_if = "ChartSettingsState::is_default")]
    pub chart_settings: ChartSettingsState,
}

impl ChartState {
    fn build(&self) -> Chart {
        Chart {
            name: self.name.clone(),
            description: self.description.clone(),
            units: self.units.clone(),
            sources: self.source.iter().map(SourceState::build).collect(),
            summarization: self.summarization.clone(),
            base: self.base,
            include_obsolete_metrics: self.include_obsolete_metrics,
            interpolate_points: self.interpolate_points,
            no_default_events: self.no_default_events,
            chart_settings: self.chart_settings.build(),
        }
    }

    fn flatten(chart: &Chart) -> Self {
        Self {
            name: chart.name.clone(),
            description: chart.description.clone(),
            units: chart.units.clone(),
            source: chart.sources.iter().map(SourceState::flatten).collect(),
            summarization: chart.summarization.clone(),
            base: chart.base,
            include_obsolete_metrics: chart.include_obsolete_metrics,
            interpolate_points: chart.interpolate_points,
            no_default_events: chart.no_default_events,
            chart_settings: ChartSettingsState::flatten(chart.chart_settings.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowState {
    pub chart: Vec<ChartState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionState {
    pub name: String,
    pub row: Vec<RowState>,
}

impl SectionState {
    fn build(&self) -> Section {
        Section {
            name: self.name.clone(),
            rows: self
                .row
                .iter()
                .map(|row| Row {
                    charts: row.chart.iter().map(ChartState::build).collect(),
                })
                .collect(),
        }
    }

    fn flatten(section: &Section) -> Self {
        Self {
            name: section.name.clone(),
            row: section
                .rows
                .iter()
                .map(|row| RowState {
                    chart: row.charts.iter().map(ChartState::flatten).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDetailState {
    pub name: String,
    pub label: String,
    pub default_value: String,
    pub hide_from_view: bool,
    pub parameter_type: String,
    pub values_to_readable_strings: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query_value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dynamic_field_type: String,
}

impl ParameterDetailState {
    fn build(&self) -> ParameterDetail {
        ParameterDetail {
            label: self.label.clone(),
            default_value: self.default_value.clone(),
            hide_from_view: self.hide_from_view,
            parameter_type: self.parameter_type.clone(),
            values_to_readable_strings: self.values_to_readable_strings.clone(),
            query_value: self.query_value.clone(),
            tag_key: self.tag_key.clone(),
            dynamic_field_type: self.dynamic_field_type.clone(),
        }
    }

    fn flatten(name: &str, detail: &ParameterDetail) -> Self {
        Self {
            name: name.to_string(),
            label: detail.label.clone(),
            default_value: detail.default_value.clone(),
            hide_from_view: detail.hide_from_view,
            parameter_type: detail.parameter_type.clone(),
            values_to_readable_strings: detail.values_to_readable_strings.clone(),
            query_value: detail.query_value.clone(),
            tag_key: detail.tag_key.clone(),
            dynamic_field_type: detail.dynamic_field_type.clone(),
        }
    }
}

/// Local state of `wavefront_dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub url: String,
    pub section: Vec<SectionState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameter_details: Vec<ParameterDetailState>,
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chart_title_bg_color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chart_title_color: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub chart_title_scalar: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub default_end_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub default_start_time: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_time_window: String,
    pub display_description: bool,
    pub display_query_parameters: bool,
    pub display_section_table_of_contents: bool,
    pub event_filter_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_query: String,
    pub favorite: bool,
}

impl ResourceState for DashboardState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl DashboardState {
    /// Build the wire dashboard. Its identifier is the url.
    pub fn build(&self) -> Dashboard {
        Dashboard {
            id: Some(self.url.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            tags: Tags::new(self.tags.iter().cloned()),
            sections: self.section.iter().map(SectionState::build).collect(),
            parameter_details: self
                .parameter_details
                .iter()
                .map(|detail| (detail.name.clone(), detail.build()))
                .collect(),
            event_filter_type: self.event_filter_type.clone(),
            event_query: self.event_query.clone(),
            chart_title_bg_color: self.chart_title_bg_color.clone(),
            chart_title_color: self.chart_title_color.clone(),
            chart_title_scalar: self.chart_title_scalar,
            default_end_time: self.default_end_time,
            default_start_time: self.default_start_time,
            default_time_window: self.default_time_window.clone(),
            display_description: self.display_description,
            display_query_parameters: self.display_query_parameters,
            display_section_table_of_contents: self.display_section_table_of_contents,
            favorite: self.favorite,
            ..Default::default()
        }
    }

    pub fn flatten(dashboard: &Dashboard) -> Self {
        let mut parameter_details: Vec<ParameterDetailState> = dashboard
            .parameter_details
            .iter()
            .map(|(name, detail)| ParameterDetailState::flatten(name, detail))
            .collect();
        parameter_details.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            id: dashboard.id.clone(),
            name: dashboard.name.clone(),
            description: dashboard.description.clone(),
            url: dashboard.url.clone(),
            section: dashboard.sections.iter().map(SectionState::flatten).collect(),
            parameter_details,
            tags: dashboard.tags.customer_tags.iter().cloned().collect(),
            chart_title_bg_color: dashboard.chart_title_bg_color.clone(),
            chart_title_color: dashboard.chart_title_color.clone(),
            chart_title_scalar: dashboard.chart_title_scalar,
            default_end_time: dashboard.default_end_time,
            default_start_time: dashboard.default_start_time,
            default_time_window: dashboard.default_time_window.clone(),
            display_description: dashboard.display_description,
            display_query_parameters: dashboard.display_query_parameters,
            display_section_table_of_contents: dashboard.display_section_table_of_contents,
            event_filter_type: dashboard.event_filter_type.clone(),
            event_query: dashboard.event_query.clone(),
            favorite: dashboard.favorite,
        }
    }
}

fn source_block() -> Block {
    Block::new()
        .describe("A collection of sources for a chart")
        .attribute("name", Attribute::required(AttributeType::String))
        .attribute(
            "query",
            Attribute::required(AttributeType::String).suppress_diff(DiffSuppress::TrimSpaces),
        )
        .attribute(
            "disabled",
            Attribute::optional(AttributeType::Bool)
                .describe("Whether to hide the source from the chart"),
        )
        .attribute(
            "scatter_plot_source",
            Attribute::optional(AttributeType::String)
                .with_default(json!(DEFAULT_SCATTER_PLOT_SOURCE)),
        )
        .attribute(
            "query_builder_enabled",
            Attribute::optional(AttributeType::Bool),
        )
        .attribute(
            "source_description",
            Attribute::optional(AttributeType::String),
        )
}

fn chart_block() -> Block {
    Block::new()
        .attribute("name", Attribute::required(AttributeType::String))
        .attribute("description", Attribute::optional(AttributeType::String))
        .attribute(
            "units",
            Attribute::required(AttributeType::String).describe("Units of measurement"),
        )
        .attribute("source", Attribute::required(AttributeType::blocks(source_block())))
        .attribute(
            "summarization",
            Attribute::optional(AttributeType::String)
                .describe("MEAN, MEDIAN, MIN, MAX, COUNT, SUM, LAST or FIRST")
                .with_default(json!(DEFAULT_SUMMARIZATION)),
        )
        .attribute(
            "base",
            Attribute::optional(AttributeType::Int).with_default(json!(0)),
        )
        .attribute(
            "include_obsolete_metrics",
            Attribute::optional(AttributeType::Bool),
        )
        .attribute("interpolate_points", Attribute::optional(AttributeType::Bool))
        .attribute("no_default_events", Attribute::optional(AttributeType::Bool))
        .attribute(
            "chart_settings",
            Attribute::optional(AttributeType::block(ChartSettingsState::block())),
        )
}

fn parameter_detail_block() -> Block {
    Block::new()
        .attribute("name", Attribute::required(AttributeType::String))
        .attribute("label", Attribute::required(AttributeType::String))
        .attribute("default_value", Attribute::required(AttributeType::String))
        .attribute("hide_from_view", Attribute::required(AttributeType::Bool))
        .attribute(
            "parameter_type",
            Attribute::required(AttributeType::String).describe("SIMPLE, LIST or DYNAMIC"),
        )
        .attribute(
            "values_to_readable_strings",
            Attribute::required(AttributeType::map(AttributeType::String))
                .describe("At least one key must match default_value"),
        )
        .attribute("query_value", Attribute::optional(AttributeType::String))
        .attribute("tag_key", Attribute::optional(AttributeType::String))
        .attribute(
            "dynamic_field_type",
            Attribute::optional(AttributeType::String),
        )
}

pub struct DashboardResource;

#[async_trait]
impl Resource for DashboardResource {
    type State = DashboardState;

    fn type_name(&self) -> &'static str {
        "wavefront_dashboard"
    }

    fn schema(&self) -> Schema {
        let row = Block::new().attribute(
            "chart",
            Attribute::required(AttributeType::blocks(chart_block())),
        );
        let section = Block::new()
            .attribute("name", Attribute::required(AttributeType::String))
            .attribute("row", Attribute::required(AttributeType::blocks(row)));

        Schema::new(
            1,
            Block::new()
                .describe("A Wavefront dashboard")
                .attribute("name", Attribute::required(AttributeType::String))
                .attribute("description", Attribute::required(AttributeType::String))
                .attribute(
                    "url",
                    Attribute::required(AttributeType::String)
                        .describe("Unique slug, also the dashboard id")
                        .force_new(),
                )
                .attribute("section", Attribute::required(AttributeType::blocks(section)))
                .attribute(
                    "parameter_details",
                    Attribute::optional(AttributeType::blocks(parameter_detail_block())),
                )
                .attribute(
                    "tags",
                    Attribute::required(AttributeType::set(AttributeType::String)),
                )
                .attribute("chart_title_bg_color", Attribute::optional(AttributeType::String))
                .attribute("chart_title_color", Attribute::optional(AttributeType::String))
                .attribute("chart_title_scalar", Attribute::optional(AttributeType::Int))
                .attribute("default_end_time", Attribute::optional(AttributeType::Int))
                .attribute("default_start_time", Attribute::optional(AttributeType::Int))
                .attribute("default_time_window", Attribute::optional(AttributeType::String))
                .attribute("display_description", Attribute::optional(AttributeType::Bool))
                .attribute(
                    "display_query_parameters",
                    Attribute::optional(AttributeType::Bool),
                )
                .attribute(
                    "display_section_table_of_contents",
                    Attribute::optional(AttributeType::Bool),
                )
                .attribute(
                    "event_filter_type",
                    Attribute::optional(AttributeType::String)
                        .describe(
                            "NONE, ALL, BYCHART, AUTOMATIC, BYDASHBOARD or BYCHARTANDDASHBOARD",
                        )
                        .with_default(json!(DEFAULT_EVENT_FILTER_TYPE)),
                )
                .attribute("event_query", Attribute::optional(AttributeType::String))
                .attribute("favorite", Attribute::optional(AttributeType::Bool)),
        )
    }

    async fn create(
        &self,
        client: &WavefrontClient,
        state: DashboardState,
    ) -> Result<DashboardState> {
        let mut dashboard = state.build();
        client
            .dashboards()
            .create(&mut dashboard)
            .await
            .with_context(|| format!("error creating dashboard {}", state.name))?;
        Ok(DashboardState::flatten(&dashboard))
    }

    async fn read(
        &self,
        client: &WavefrontClient,
        state: DashboardState,
    ) -> Result<Option<DashboardState>> {
        let id = require_id(&state, self.type_name())?;
        let dashboard = client
            .dashboards()
            .fetch(id)
            .await
            .with_context(|| format!("error finding dashboard {}", id))?;
        Ok(dashboard.as_ref().map(DashboardState::flatten))
    }

    async fn update(
        &self,
        client: &WavefrontClient,
        state: DashboardState,
    ) -> Result<DashboardState> {
        let id = require_id(&state, self.type_name())?;
        if client
            .dashboards()
            .fetch(id)
            .await
            .with_context(|| format!("error finding dashboard {}", id))?
            .is_none()
        {
            bail!("dashboard {} not found", id);
        }

        let mut dashboard = state.build();
        dashboard.id = Some(id.to_string());
        client
            .dashboards()
            .update(&mut dashboard)
            .await
            .with_context(|| format!("error updating dashboard {}", id))?;
        Ok(DashboardState::flatten(&dashboard))
    }

    async fn delete(&self, client: &WavefrontClient, state: DashboardState) -> Result<()> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut dashboard) = client
            .dashboards()
            .fetch(id)
            .await
            .with_context(|| format!("error finding dashboard {}", id))?
        else {
            bail!("dashboard {} not found", id);
        };

        client
            .dashboards()
            .delete(&mut dashboard)
            .await
            .with_context(|| format!("error deleting dashboard {}", id))
    }
}
