//! Dashboard wire model
//!
//! A dashboard is a tree: sections hold rows, rows hold charts, charts hold
//! sources. The dashboard `url` slug doubles as its identifier.

use super::entity::Entity;
use super::Tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Wavefront dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub parameter_details: BTreeMap<String, ParameterDetail>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event_filter_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event_query: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chart_title_bg_color: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chart_title_color: String,

    #[serde(default)]
    pub chart_title_scalar: i64,

    #[serde(default)]
    pub default_end_time: i64,

    #[serde(default)]
    pub default_start_time: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_time_window: String,

    #[serde(default)]
    pub display_description: bool,

    #[serde(default)]
    pub display_query_parameters: bool,

    #[serde(default)]
    pub display_section_table_of_contents: bool,

    #[serde(default)]
    pub favorite: bool,

    // Maintained by the server; never meaningful in configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_epoch_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_epoch_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updater_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_last_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_last_week: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_last_month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_charts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_favorites: Option<i64>,
}

impl Dashboard {
    /// Clear every field the server maintains on its own
    pub fn clear_server_fields(&mut self) {
        self.created_epoch_millis = None;
        self.updated_epoch_millis = None;
        self.creator_id = None;
        self.updater_id = None;
        self.customer = None;
        self.views_last_day = None;
        self.views_last_week = None;
        self.views_last_month = None;
        self.num_charts = None;
        self.num_favorites = None;
        self.favorite = false;
    }
}

impl Entity for Dashboard {
    const KIND: &'static str = "Dashboard";
    const BASE_PATH: &'static str = "/api/v2/dashboard";
    const SEARCH_TYPE: &'static str = "dashboard";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    /// MEAN, MEDIAN, MIN, MAX, COUNT, SUM, LAST or FIRST
    #[serde(default)]
    pub summarization: String,
    #[serde(default)]
    pub base: i64,
    #[serde(default)]
    pub include_obsolete_metrics: bool,
    #[serde(default)]
    pub interpolate_points: bool,
    #[serde(default)]
    pub no_default_events: bool,
    /// Absent on charts created before any visual option was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_settings: Option<ChartSetting>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub scatter_plot_source: String,
    #[serde(default, rename = "querybuilderEnabled")]
    pub query_builder_enabled: bool,
    #[serde(default)]
    pub source_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDetail {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub hide_from_view: bool,
    /// SIMPLE, LIST or DYNAMIC
    #[serde(default)]
    pub parameter_type: String,
    #[serde(default)]
    pub values_to_readable_strings: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query_value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_key: String,
    /// SOURCE, SOURCE_TAG, METRIC_NAME, TAG_KEY or MATCHING_SOURCE_TAG
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dynamic_field_type: String,
}

/// Visual options of a chart. Every field is optional on the wire and
/// decodes to its zero value when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartSetting {
    pub auto_column_tags: bool,
    pub column_tags: String,
    pub custom_tags: Vec<String>,
    pub expected_data_spacing: i64,
    pub fixed_legend_display_stats: Vec<String>,
    pub fixed_legend_enabled: bool,
    pub fixed_legend_filter_field: String,
    pub fixed_legend_filter_limit: i64,
    pub fixed_legend_filter_sort: String,
    pub fixed_legend_hide_label: bool,
    pub fixed_legend_position: String,
    pub fixed_legend_use_raw_stats: bool,
    pub group_by_source: bool,
    pub invert_dynamic_legend_hover_control: bool,
    pub line_type: String,
    pub max: f64,
    pub min: f64,
    pub num_tags: i64,
    pub plain_markdown_content: String,
    pub show_hosts: bool,
    pub show_labels: bool,
    pub show_raw_values: bool,
    pub sort_values_descending: bool,
    pub sparkline_decimal_precision: i64,
    pub sparkline_display_color: String,
    pub sparkline_display_font_size: String,
    pub sparkline_display_horizontal_position: String,
    pub sparkline_display_postfix: String,
    pub sparkline_display_prefix: String,
    pub sparkline_display_value_type: String,
    pub sparkline_display_vertical_position: String,
    pub sparkline_fill_color: String,
    pub sparkline_line_color: String,
    pub sparkline_size: String,
    pub sparkline_value_color_map_apply_to: String,
    pub sparkline_value_color_map_colors: Vec<String>,
    pub sparkline_value_color_map_values: Vec<i64>,
    pub sparkline_value_color_map_values_v2: Vec<f64>,
    pub sparkline_value_text_map_text: Vec<String>,
    pub sparkline_value_text_map_thresholds: Vec<f64>,
    pub stack_type: String,
    pub tag_mode: String,
    pub time_based_coloring: bool,
    #[serde(rename = "type")]
    pub chart_type: String,
    pub windowing: String,
    pub window_size: i64,
    #[serde(rename = "xmax")]
    pub x_max: f64,
    #[serde(rename = "xmin")]
    pub x_min: f64,
    #[serde(rename = "y0ScaleSIBy1024")]
    pub y0_scale_si_by_1024: bool,
    pub y0_unit_autoscaling: bool,
    pub y1_max: f64,
    pub y1_min: f64,
    #[serde(rename = "y1ScaleSIBy1024")]
    pub y1_scale_si_by_1024: bool,
    pub y1_unit_autoscaling: bool,
    pub y1_units: String,
    #[serde(rename = "ymax")]
    pub y_max: f64,
    #[serde(rename = "ymin")]
    pub y_min: f64,
}
