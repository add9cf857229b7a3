//! `wavefront_dashboard_json`
//!
//! A dashboard managed as one JSON document. The stored document is
//! normalised: its id is the url and server-maintained fields are stripped,
//! so reads only differ from configuration when the dashboard itself changed.

use super::error::ValidationError;
use super::schema::{Attribute, AttributeType, Block, DiffSuppress, Schema};
use super::{require_id, Resource, ResourceState};
use crate::wavefront::dashboard::Dashboard;
use crate::wavefront::WavefrontClient;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parse a dashboard document and set its id to its url
pub fn parse_dashboard_json(document: &str) -> Result<Dashboard, ValidationError> {
    let mut dashboard: Dashboard = serde_json::from_str(document)
        .map_err(|err| ValidationError::InvalidDashboardJson(err.to_string()))?;
    if dashboard.url.is_empty() {
        return Err(ValidationError::MissingDashboardUrl);
    }
    dashboard.id = Some(dashboard.url.clone());
    Ok(dashboard)
}

/// Canonical form of a dashboard: id = url, server fields cleared
pub fn normalize_dashboard(mut dashboard: Dashboard) -> Result<String> {
    dashboard.id = Some(dashboard.url.clone());
    dashboard.clear_server_fields();
    serde_json::to_string(&dashboard).context("failed to encode dashboard json")
}

pub fn normalize_dashboard_json(document: &str) -> Result<String> {
    normalize_dashboard(parse_dashboard_json(document)?)
}

/// Local state of `wavefront_dashboard_json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardJsonState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub dashboard_json: String,
}

impl ResourceState for DashboardJsonState {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

pub struct DashboardJsonResource;

impl DashboardJsonResource {
    async fn read_back(
        &self,
        client: &WavefrontClient,
        id: Option<String>,
    ) -> Result<DashboardJsonState> {
        let state = DashboardJsonState {
            id: id.clone(),
            ..Default::default()
        };
        match self.read(client, state).await? {
            Some(state) => Ok(state),
            None => bail!(
                "dashboard {} disappeared right after being written",
                id.unwrap_or_default()
            ),
        }
    }
}

#[async_trait]
impl Resource for DashboardJsonResource {
    type State = DashboardJsonState;

    fn type_name(&self) -> &'static str {
        "wavefront_dashboard_json"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            1,
            Block::new()
                .describe("A Wavefront dashboard given as its JSON representation")
                .attribute(
                    "dashboard_json",
                    Attribute::required(AttributeType::String)
                        .suppress_diff(DiffSuppress::JsonEquivalent),
                ),
        )
    }

    fn validate(&self, state: &DashboardJsonState) -> Result<()> {
        parse_dashboard_json(&state.dashboard_json)?;
        Ok(())
    }

    async fn create(
        &self,
        client: &WavefrontClient,
        state: DashboardJsonState,
    ) -> Result<DashboardJsonState> {
        let mut dashboard = parse_dashboard_json(&state.dashboard_json)?;
        client
            .dashboards()
            .create(&mut dashboard)
            .await
            .context("failed to create dashboard")?;

        let id = dashboard.id.clone().or(Some(dashboard.url));
        self.read_back(client, id).await
    }

    async fn read(
        &self,
        client: &WavefrontClient,
        state: DashboardJsonState,
    ) -> Result<Option<DashboardJsonState>> {
        let id = require_id(&state, self.type_name())?;
        let Some(dashboard) = client
            .dashboards()
            .fetch(id)
            .await
            .with_context(|| format!("error finding dashboard {}", id))?
        else {
            return Ok(None);
        };

        Ok(Some(DashboardJsonState {
            id: Some(id.to_string()),
            dashboard_json: normalize_dashboard(dashboard)?,
        }))
    }

    async fn update(
        &self,
        client: &WavefrontClient,
        state: DashboardJsonState,
    ) -> Result<DashboardJsonState> {
        let id = require_id(&state, self.type_name())?.to_string();
        let mut dashboard = parse_dashboard_json(&state.dashboard_json)?;
        dashboard.id = Some(id.clone());
        client
            .dashboards()
            .update(&mut dashboard)
            .await
            .with_context(|| format!("failed to update dashboard {}", id))?;

        self.read_back(client, Some(id)).await
    }

    async fn delete(&self, client: &WavefrontClient, state: DashboardJsonState) -> Result<()> {
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
            .with_context(|| format!("failed to delete dashboard {}", id))
    }
}
