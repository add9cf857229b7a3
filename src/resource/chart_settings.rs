//! Chart display settings
//!
//! A flat bag of optional visual parameters. Every field maps one to one onto
//! the wire [`ChartSetting`]; the table below generates the local struct, both
//! mapping directions and the schema block from a single field list.

use super::schema::{Attribute, AttributeType, Block};
use crate::wavefront::dashboard::ChartSetting;
use serde::{Deserialize, Serialize};

macro_rules! setting_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}

macro_rules! chart_settings {
    ($( $field:ident $(as $name:literal)? : $ty:ty => $kind:expr ),* $(,)?) => {
        /// Local chart settings. Missing fields take their zero value, which
        /// cannot be told apart from an explicit zero.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ChartSettingsState {
            $(
                $(#[serde(rename = $name)])?
                pub $field: $ty,
            )*
        }

        impl ChartSettingsState {
            fn to_wire(&self) -> ChartSetting {
                ChartSetting {
                    $( $field: self.$field.clone(), )*
                }
            }

            fn from_wire(settings: &ChartSetting) -> Self {
                Self {
                    $( $field: settings.$field.clone(), )*
                }
            }

            /// Schema block of the `chart_settings` attribute
            pub fn block() -> Block {
                Block::new()
                    $( .attribute(setting_name!($field $(, $name)?), Attribute::optional($kind)) )*
            }
        }
    };
}

fn strings() -> AttributeType {
    AttributeType::list(AttributeType::String)
}

fn ints() -> AttributeType {
    AttributeType::list(AttributeType::Int)
}

fn floats() -> AttributeType {
    AttributeType::list(AttributeType::Float)
}

chart_settings! {
    auto_column_tags: bool => AttributeType::Bool,
    column_tags: String => AttributeType::String,
    custom_tags: Vec<String> => strings(),
    expected_data_spacing: i64 => AttributeType::Int,
    fixed_legend_display_stats: Vec<String> => strings(),
    fixed_legend_enabled: bool => AttributeType::Bool,
    fixed_legend_filter_field: String => AttributeType::String,
    fixed_legend_filter_limit: i64 => AttributeType::Int,
    fixed_legend_filter_sort: String => AttributeType::String,
    fixed_legend_hide_label: bool => AttributeType::Bool,
    fixed_legend_position: String => AttributeType::String,
    fixed_legend_use_raw_stats: bool => AttributeType::Bool,
    group_by_source: bool => AttributeType::Bool,
    invert_dynamic_legend_hover_control: bool => AttributeType::Bool,
    line_type: String => AttributeType::String,
    max: f64 => AttributeType::Float,
    min: f64 => AttributeType::Float,
    num_tags: i64 => AttributeType::Int,
    plain_markdown_content: String => AttributeType::String,
    show_hosts: bool => AttributeType::Bool,
    show_labels: bool => AttributeType::Bool,
    show_raw_values: bool => AttributeType::Bool,
    sort_values_descending: bool => AttributeType::Bool,
    sparkline_decimal_precision: i64 => AttributeType::Int,
    sparkline_display_color: String => AttributeType::String,
    sparkline_display_font_size: String => AttributeType::String,
    sparkline_display_horizontal_position: String => AttributeType::String,
    sparkline_display_postfix: String => AttributeType::String,
    sparkline_display_prefix: String => AttributeType::String,
    sparkline_display_value_type: String => AttributeType::String,
    sparkline_display_vertical_position: String => AttributeType::String,
    sparkline_fill_color: String => AttributeType::String,
    sparkline_line_color: String => AttributeType::String,
    sparkline_size: String => AttributeType::String,
    sparkline_value_color_map_apply_to: String => AttributeType::String,
    sparkline_value_color_map_colors: Vec<String> => strings(),
    sparkline_value_color_map_values: Vec<i64> => ints(),
    sparkline_value_color_map_values_v2: Vec<f64> => floats(),
    sparkline_value_text_map_text: Vec<String> => strings(),
    sparkline_value_text_map_thresholds: Vec<f64> => floats(),
    stack_type: String => AttributeType::String,
    tag_mode: String => AttributeType::String,
    time_based_coloring: bool => AttributeType::Bool,
    chart_type as "type": String => AttributeType::String,
    windowing: String => AttributeType::String,
    window_size: i64 => AttributeType::Int,
    x_max: f64 => AttributeType::Float,
    x_min: f64 => AttributeType::Float,
    y0_scale_si_by_1024: bool => AttributeType::Bool,
    y0_unit_autoscaling: bool => AttributeType::Bool,
    y1_max: f64 => AttributeType::Float,
    y1_min: f64 => AttributeType::Float,
    y1_scale_si_by_1024: bool => AttributeType::Bool,
    y1_unit_autoscaling: bool => AttributeType::Bool,
    y1_units: String => AttributeType::String,
    y_max: f64 => AttributeType::Float,
    y_min: f64 => AttributeType::Float,
}

impl ChartSettingsState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Wire settings; an all-default block is not sent at all
    pub fn build(&self) -> Option<ChartSetting> {
        if self.is_default() {
            None
        } else {
            Some(self.to_wire())
        }
    }

    /// Local settings; charts without settings yield all zero values
    pub fn flatten(settings: Option<&ChartSetting>) -> Self {
        settings.map(Self::from_wire).unwrap_or_default()
    }
}
