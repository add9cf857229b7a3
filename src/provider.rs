//! Provider
//!
//! Owns the gateway client once configured and routes each plugin request to
//! the resource it names. Resource handlers borrow the client for the
//! duration of one request.

use crate::config::ProviderConfig;
use crate::plugin::{Request, Response};
use crate::resource::schema::Schema;
use crate::resource::{get_registry, DynamicResource, ResourceRegistry};
use crate::wavefront::WavefrontClient;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider schema plus the schema of every resource type
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resources: BTreeMap<&'static str, Schema>,
}

pub struct Provider {
    client: Option<WavefrontClient>,
    registry: &'static ResourceRegistry,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    pub fn new() -> Self {
        Self {
            client: None,
            registry: get_registry(),
        }
    }

    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: ProviderConfig::schema(),
            resources: self
                .registry
                .names()
                .filter_map(|name| Some((name, self.registry.get(name)?.schema())))
                .collect(),
        }
    }

    /// Build the client from `config`. Reconfiguring replaces the client.
    pub fn configure(&mut self, config: &ProviderConfig) -> Result<()> {
        let client = config.client()?;
        tracing::info!("Configured provider for {}", client.base_url());
        self.client = Some(client);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Result<&WavefrontClient> {
        self.client
            .as_ref()
            .ok_or_else(|| anyhow!("provider is not configured"))
    }

    pub fn resource(&self, type_name: &str) -> Result<&'static dyn DynamicResource> {
        self.registry
            .get(type_name)
            .ok_or_else(|| anyhow!("unknown resource type: {}", type_name))
    }

    /// Answer one request; failures become error responses
    pub async fn handle(&mut self, request: Request) -> Response {
        match self.dispatch(request).await {
            Ok(result) => Response::ok(result),
            Err(err) => {
                tracing::error!("{:#}", err);
                Response::error(format!("{:#}", err))
            }
        }
    }

    async fn dispatch(&mut self, request: Request) -> Result<Value> {
        match request {
            Request::GetSchema => {
                serde_json::to_value(self.schema()).context("failed to encode schema")
            }
            Request::Configure { config } => {
                self.configure(&config)?;
                Ok(Value::Null)
            }
            Request::Validate { resource, config } => {
                self.resource(&resource)?.validate(&config)?;
                Ok(Value::Null)
            }
            Request::Plan {
                resource,
                prior,
                proposed,
            } => {
                let plan = self.resource(&resource)?.plan(prior.as_ref(), &proposed);
                serde_json::to_value(plan).context("failed to encode plan")
            }
            Request::Create { resource, config } => {
                let resource = self.resource(&resource)?;
                resource.create(self.client()?, config).await
            }
            Request::Read { resource, state } => {
                let resource = self.resource(&resource)?;
                Ok(resource
                    .read(self.client()?, state)
                    .await?
                    .unwrap_or(Value::Null))
            }
            Request::Update { resource, state } => {
                let resource = self.resource(&resource)?;
                resource.update(self.client()?, state).await
            }
            Request::Delete { resource, state } => {
                let resource = self.resource(&resource)?;
                resource.delete(self.client()?, state).await?;
                Ok(Value::Null)
            }
            Request::Import { resource, id } => {
                let resource = self.resource(&resource)?;
                Ok(resource
                    .import(self.client()?, &id)
                    .await?
                    .unwrap_or(Value::Null))
            }
            Request::Exists { resource, state } => {
                let resource = self.resource(&resource)?;
                Ok(Value::Bool(resource.exists(self.client()?, state).await?))
            }
        }
    }
}
