//! `wavefront_alert_target`

use super::common::non_empty;
use super::schema::{Attribute, AttributeType, Block, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::target::{AlertRoute, Target, TargetMethod};
use crate::wavefront::WavefrontClient;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

/// Route filter. The API stores it as a single `"<key> <value>"` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteFilter {
    pub key: String,
    pub value: String,
}

impl RouteFilter {
    pub fn to_wire(&self) -> String {
        format!("{} {}", self.key, self.value)
    }

    /// Split on the first space. A filter without a space has an empty value.
    pub fn parse(filter: &str) -> Option<Self> {
        if filter.is_empty() {
            return None;
        }
        let (key, value) = filter.split_once(' ').unwrap_or((filter, ""));
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteState {
    pub method: TargetMethod,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<RouteFilter>,
}

impl RouteState {
    fn build(&self) -> AlertRoute {
        AlertRoute {
            method: self.method,
            target: self.target.clone(),
            filter: self
                .filter
                .as_ref()
                .map(RouteFilter::to_wire)
                .unwrap_or_default(),
        }
    }

    fn flatten(route: &AlertRoute) -> Self {
        Self {
            method: route.method,
            target: route.target.clone(),
            filter: RouteFilter::parse(&route.filter),
        }
    }
}

/// Local state of `wavefront_alert_target`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertTargetState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub triggers: Vec<String>,
    pub template: String,
    pub method: TargetMethod,
    pub recipient: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub route: Vec<RouteState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    pub is_html_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_headers: BTreeMap<String, String>,
}

impl ResourceState for AlertTargetState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl AlertTargetState {
    pub fn build(&self) -> Target {
        Target {
            id: self.id.clone(),
            title: self.name.clone(),
            description: self.description.clone(),
            template: self.template.clone(),
            method: self.method,
            recipient: self.recipient.clone(),
            email_subject: self.email_subject.clone().unwrap_or_default(),
            is_html_content: self.is_html_content,
            content_type: self.content_type.clone().unwrap_or_default(),
            custom_headers: self.custom_headers.clone(),
            triggers: self.triggers.clone(),
            routes: self.route.iter().map(RouteState::build).collect(),
        }
    }

    pub fn flatten(target: &Target) -> Self {
        let mut route: Vec<RouteState> = target.routes.iter().map(RouteState::flatten).collect();
        route.sort();

        Self {
            id: target.id.clone(),
            name: target.title.clone(),
            description: target.description.clone(),
            triggers: target.triggers.clone(),
            template: target.template.clone(),
            method: target.method,
            recipient: target.recipient.clone(),
            route,
            email_subject: non_empty(&target.email_subject),
            is_html_content: target.is_html_content,
            content_type: non_empty(&target.content_type),
            custom_headers: target.custom_headers.clone(),
        }
    }
}

pub struct AlertTargetResource;

#[async_trait]
impl Resource for AlertTargetResource {
    type State = AlertTargetState;

    fn type_name(&self) -> &'static str {
        "wavefront_alert_target"
    }

    fn schema(&self) -> Schema {
        let route = Block::new()
            .attribute(
                "method",
                Attribute::required(AttributeType::String)
                    .describe("EMAIL, WEBHOOK or PAGERDUTY"),
            )
            .attribute("target", Attribute::required(AttributeType::String))
            .attribute(
                "filter",
                Attribute::optional(AttributeType::block(
                    Block::new()
                        .attribute("key", Attribute::required(AttributeType::String))
                        .attribute("value", Attribute::optional(AttributeType::String)),
                )),
            );

        Schema::new(
            1,
            Block::new()
                .describe("A notification target for alerts")
                .attribute("name", Attribute::required(AttributeType::String))
                .attribute("description", Attribute::required(AttributeType::String))
                .attribute(
                    "triggers",
                    Attribute::required(AttributeType::list(AttributeType::String))
                        .describe("Alert events that fire this target, e.g. ALERT_OPENED"),
                )
                .attribute(
                    "template",
                    Attribute::required(AttributeType::String)
                        .describe("Mustache template for the notification body"),
                )
                .attribute(
                    "method",
                    Attribute::optional(AttributeType::String)
                        .describe("EMAIL, WEBHOOK or PAGERDUTY")
                        .with_default(json!(TargetMethod::Email.as_str())),
                )
                .attribute("recipient", Attribute::required(AttributeType::String))
                .attribute(
                    "route",
                    Attribute::optional(AttributeType::set(AttributeType::block(route))),
                )
                .attribute(
                    "email_subject",
                    Attribute::optional(AttributeType::String).describe("EMAIL targets only"),
                )
                .attribute(
                    "is_html_content",
                    Attribute::optional(AttributeType::Bool).describe("EMAIL targets only"),
                )
                .attribute(
                    "content_type",
                    Attribute::optional(AttributeType::String).describe("WEBHOOK targets only"),
                )
                .attribute(
                    "custom_headers",
                    Attribute::optional(AttributeType::map(AttributeType::String))
                        .describe("WEBHOOK targets only"),
                ),
        )
    }

    async fn create(
        &self,
        client: &WavefrontClient,
        state: AlertTargetState,
    ) -> Result<AlertTargetState> {
        let mut target = state.build();
        client
            .targets()
            .create(&mut target)
            .await
            .with_context(|| format!("error creating target {}", state.name))?;
        Ok(AlertTargetState::flatten(&target))
    }

    async fn read(
        &self,
        client: &WavefrontClient,
        state: AlertTargetState,
    ) -> Result<Option<AlertTargetState>> {
        let id = require_id(&state, self.type_name())?;
        let target = client
            .targets()
            .fetch(id)
            .await
            .with_context(|| format!("error finding alert target {}", id))?;
        Ok(target.as_ref().map(AlertTargetState::flatten))
    }

    async fn update(
        &self,
        client: &WavefrontClient,
        state: AlertTargetState,
    ) -> Result<AlertTargetState> {
        let id = require_id(&state, self.type_name())?;
        let Some(current) = client
            .targets()
            .fetch(id)
            .await
            .with_context(|| format!("error finding alert target {}", id))?
        else {
            bail!("alert target {} not found", id);
        };

        let mut target = state.build();
        target.id = current.id;
        client
            .targets()
            .update(&mut target)
            .await
            .with_context(|| format!("error updating target {}", id))?;
        Ok(AlertTargetState::flatten(&target))
    }

    async fn delete(&self, client: &WavefrontClient, state: AlertTargetState) -> Result<()> {
        let id = require_id(&state, self.type_name())?;
        let Some(mut target) = client
            .targets()
            .fetch(id)
            .await
            .with_context(|| format!("error finding alert target {}", id))?
        else {
            bail!("alert target {} not found", id);
        };

        client
            .targets()
            .delete(&mut target)
            .await
            .with_context(|| format!("error deleting target {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webhook() -> AlertTargetState {
        let mut custom_headers = BTreeMap::new();
        custom_headers.insert("Authorization".to_string(), "Bearer abc".to_string());

        AlertTargetState {
            name: "ops hook".to_string(),
            description: "ops webhook".to_string(),
            triggers: vec!["ALERT_OPENED".to_string(), "ALERT_RESOLVED".to_string()],
            template: "{}".to_string(),
            method: TargetMethod::Webhook,
            recipient: "https://hooks.example.com/ops".to_string(),
            route: vec![RouteState {
                method: TargetMethod::Email,
                target: "oncall@example.com".to_string(),
                filter: Some(RouteFilter {
                    key: "env".to_string(),
                    value: "prod".to_string(),
                }),
            }],
            content_type: Some("application/json".to_string()),
            custom_headers,
            ..Default::default()
        }
    }

    #[test]
    fn test_route_filter_parse() {
        assert_eq!(
            RouteFilter::parse("env prod"),
            Some(RouteFilter {
                key: "env".to_string(),
                value: "prod".to_string()
            })
        );
        assert_eq!(
            RouteFilter::parse("source web 01").unwrap().value,
            "web 01".to_string()
        );
        assert_eq!(
            RouteFilter::parse("env"),
            Some(RouteFilter {
                key: "env".to_string(),
                value: String::new()
            })
        );
        assert_eq!(RouteFilter::parse(""), None);
    }

    #[test]
    fn test_build_writes_filter_string() {
        let target = webhook().build();
        assert_eq!(target.title, "ops hook");
        assert_eq!(target.routes[0].filter, "env prod");
        assert_eq!(target.content_type, "application/json");
        assert!(target.email_subject.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let state = webhook();
        assert_eq!(AlertTargetState::flatten(&state.build()), state);
    }

    #[test]
    fn test_method_decodes_from_configuration() {
        let state: AlertTargetState = serde_json::from_value(json!({
            "name": "pager",
            "method": "PAGERDUTY",
            "route": [{"method": "WEBHOOK", "target": "t"}]
        }))
        .unwrap();
        assert_eq!(state.method, TargetMethod::Pagerduty);
        assert_eq!(state.route[0].filter, None);
        assert!(serde_json::from_value::<AlertTargetState>(json!({"method": "SMS"})).is_err());
    }
}
