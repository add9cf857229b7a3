//! `wavefront_alert`
//!
//! Alerts come in two shapes. A CLASSIC alert has one condition, one severity
//! and one target. A THRESHOLD alert has a condition per severity and,
//! optionally, a target per severity. The local state keeps the flat
//! attribute layout the configuration uses; [`AlertState::kind`] turns it into
//! an [`AlertKind`] and rejects incomplete or inconsistent combinations.

use super::common::{trim_spaces, trim_spaces_map};
use super::error::ValidationError;
use super::schema::{Attribute, AttributeType, Block, DiffSuppress, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::alert::Alert;
use crate::wavefront::{Tags, WavefrontClient};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

pub const ALERT_TYPE_CLASSIC: &str = "CLASSIC";
pub const ALERT_TYPE_THRESHOLD: &str = "THRESHOLD";

/// Alert severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Severe,
    Warn,
    Info,
    Smoke,
}

impl Severity {
    /// Key used in per-severity maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "severe",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Smoke => "smoke",
        }
    }

    /// Value of a classic alert's `severity` field
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Severe => "SEVERE",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Smoke => "SMOKE",
        }
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "severe" => Ok(Self::Severe),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "smoke" => Ok(Self::Smoke),
            _ => Err(ValidationError::InvalidSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two alert shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    Classic {
        condition: String,
        severity: Severity,
        target: String,
    },
    Threshold {
        conditions: BTreeMap<Severity, String>,
        targets: BTreeMap<Severity, String>,
    },
}

fn parse_severity_map(
    map: &BTreeMap<String, String>,
) -> Result<BTreeMap<Severity, String>, ValidationError> {
    map.iter()
        .map(|(key, value)| {
            let severity = match key.as_str() {
                "severe" | "warn" | "info" | "smoke" => key.parse::<Severity>()?,
                _ => return Err(ValidationError::InvalidSeverity(key.clone())),
            };
            Ok((severity, value.clone()))
        })
        .collect()
}

fn severity_map_to_wire(map: &BTreeMap<Severity, String>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(severity, value)| (severity.as_str().to_string(), value.clone()))
        .collect()
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Local state of `wavefront_alert`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    pub alert_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub target: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub condition: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub threshold_conditions: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub threshold_targets: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_expression: String,

    pub minutes: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub resolve_after_minutes: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub notification_resend_frequency_minutes: i64,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub severity: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub additional_information: String,

    pub tags: BTreeSet<String>,
}

impl ResourceState for AlertState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl AlertState {
    /// Validate the discriminant and the fields its shape needs
    pub fn kind(&self) -> Result<AlertKind, ValidationError> {
        let kind = match self.alert_type.as_str() {
            ALERT_TYPE_CLASSIC => {
                let condition = trim_spaces(&self.condition);
                if condition.is_empty() {
                    return Err(ValidationError::MissingCondition);
                }
                if self.severity.trim().is_empty() {
                    return Err(ValidationError::MissingSeverity);
                }
                let severity = self.severity.trim().parse::<Severity>()?;
                if self.target.is_empty() {
                    return Err(ValidationError::MissingTarget);
                }
                AlertKind::Classic {
                    condition,
                    severity,
                    target: self.target.clone(),
                }
            }
            ALERT_TYPE_THRESHOLD => {
                if self.threshold_conditions.is_empty() {
                    return Err(ValidationError::MissingThresholdConditions);
                }
                AlertKind::Threshold {
                    conditions: BTreeMap::new(),
                    targets: BTreeMap::new(),
                }
            }
            other => return Err(ValidationError::InvalidAlertType(other.to_string())),
        };

        let conditions = parse_severity_map(&trim_spaces_map(&self.threshold_conditions))?;
        let targets = parse_severity_map(&self.threshold_targets)?;

        Ok(match kind {
            AlertKind::Threshold { .. } => AlertKind::Threshold {
                conditions,
                targets,
            },
            classic => classic,
        })
    }

    /// Build the wire alert from local state
    pub fn build(&self) -> Result<Alert, ValidationError> {
        let mut alert = Alert {
            id: self.id.clone(),
            name: self.name.clone(),
            display_expression: trim_spaces(&self.display_expression),
            minutes: self.minutes,
            resolve_after_minutes: Some(self.resolve_after_minutes).filter(|m| *m != 0),
            notification_resend_frequency_minutes: Some(
                self.notification_resend_frequency_minutes,
            )
            .filter(|m| *m != 0),
            additional_information: self.additional_information.clone(),
            tags: Tags::new(self.tags.iter().cloned()),
            ..Default::default()
        };

        match self.kind()? {
            AlertKind::Classic {
                condition,
                severity,
                target,
            } => {
                alert.alert_type = Some(ALERT_TYPE_CLASSIC.to_string());
                alert.condition = condition;
                alert.severity = severity.api_name().to_string();
                alert.target = target;
            }
            AlertKind::Threshold {
                conditions,
                targets,
            } => {
                alert.alert_type = Some(ALERT_TYPE_THRESHOLD.to_string());
                alert.conditions = severity_map_to_wire(&conditions);
                alert.targets = severity_map_to_wire(&targets);
            }
        }

        Ok(alert)
    }

    /// Local state from the server's representation
    pub fn flatten(alert: &Alert) -> Self {
        let alert_type = alert
            .alert_type
            .clone()
            .unwrap_or_else(|| ALERT_TYPE_CLASSIC.to_string());

        let mut state = Self {
            id: alert.id.clone(),
            name: alert.name.clone(),
            display_expression: trim_spaces(&alert.display_expression),
            minutes: alert.minutes,
            resolve_after_minutes: alert.resolve_after_minutes.unwrap_or_default(),
            notification_resend_frequency_minutes: alert
                .notification_resend_frequency_minutes
                .unwrap_or_default(),
            additional_information: alert.additional_information.clone(),
            tags: alert.tags.customer_tags.iter().cloned().collect(),
            ..Default::default()
        };

        if alert_type == ALERT_TYPE_THRESHOLD {
            state.threshold_conditions = trim_spaces_map(&alert.conditions);
            state.threshold_targets = alert.targets.clone();
        } else {
            state.condition = trim_spaces(&alert.condition);
            state.severity = alert.severity.clone();
            state.target = alert.target.clone();
        }
        state.alert_type = alert_type;

        state
    }
}

pub struct AlertResource;

#[async_trait]
impl Resource for AlertResource {
    type State = AlertState;

    fn type_name(&self) -> &'static str {
        "wavefront_alert"
    }

    fn schema(&self) -> Schema {
        let string_map = || AttributeType::map(AttributeType::String);

        Schema::new(
            1,
            Block::new()
                .describe("A Wavefront alert")
                .attribute("name", Attribute::required(AttributeType::String))
                .attribute(
                    "alert_type",
                    Attribute::optional(AttributeType::String)
                        .describe("CLASSIC or THRESHOLD")
                        .with_default(json!(ALERT_TYPE_CLASSIC)),
                )
                .attribute(
                    "target",
                    Attribute::optional(AttributeType::String)
                        .describe("Notification target of a classic alert"),
                )
                .attribute(
                    "condition",
                    Attribute::optional(AttributeType::String)
                        .suppress_diff(DiffSuppress::TrimSpaces),
                )
                .attribute(
                    "threshold_conditions",
                    Attribute::optional(string_map())
                        .describe("Condition per severity (severe, warn, info, smoke)")
                        .suppress_diff(DiffSuppress::TrimSpaces),
                )
                .attribute(
                    "threshold_targets",
                    Attribute::optional(string_map())
                        .describe("Target per severity (severe, warn, info, smoke)"),
                )
                .attribute(
                    "display_expression",
                    Attribute::optional(AttributeType::String)
                        .suppress_diff(DiffSuppress::TrimSpaces),
                )
                .attribute("minutes", Attribute::required(AttributeType::Int))
                .attribute(
                    "resolve_after_minutes",
                    Attribute::optional(AttributeType::Int),
                )
                .attribute(
                    "notification_resend_frequency_minutes",
                    Attribute::optional(AttributeType::Int),
                )
                .attribute(
                    "severity",
                    Attribute::optional(AttributeType::String)
                        .suppress_diff(DiffSuppress::IgnoreCase),
                )
                .attribute(
                    "additional_information",
                    Attribute::optional(AttributeType::String),
                )
                .attribute(
                    "tags",
                    Attribute::required(AttributeType::set(AttributeType::String)),
                ),
        )
    }

    fn validate(&self, state: &AlertState) -> Result<()> {
        state.kind()?;
        Ok(())
    }

    async fn create(&self, client: &WavefrontClient, state: AlertState) -> Result<AlertState> {
        let mut alert = state.build()?;
        client
            .alerts()
            .create(&mut alert)
            .await
            .with_context(|| format!("error creating alert {}", state.name))?;
        Ok(AlertState::flatten(&alert))
    }

    async fn read(&self, client: &WavefrontClient, state: AlertState) -> Result<Option<AlertState>> {
        let id = require_id(&state, self.type_name())?;
        let found = client
            .alerts()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding alert {}", id))?;
        Ok(found.as_ref().map(AlertState::flatten))
    }

    async fn update(&self, client: &WavefrontClient, state: AlertState) -> Result<AlertState> {
        let id = require_id(&state, self.type_name())?;
        let Some(current) = client
            .alerts()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding alert {}", id))?
        else {
            bail!("alert {} not found", id);
        };

        let mut alert = state.build()?;
        alert.id = current.id;
        client
            .alerts()
            .update(&mut alert)
            .await
            .with_context(|| format!("error updating alert {}", id))?;
        Ok(AlertState::flatten(&alert))
    }

    async fn delete(&self, client: &WavefrontClient, state: AlertState) -> Result<()> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut alert) = client
            .alerts()
            .find_by_id(id)
            .await
            .with_context(|| format!("error finding alert {}", id))?
        else {
            bail!("alert {} not found", id);
        };

        client
            .alerts()
            .delete(&mut alert)
            .await
            .with_context(|| format!("error deleting alert {}", id))
    }
}
