//! Resource abstraction layer
//!
//! Each Terraform resource type is a [`Resource`]: a typed state struct, a
//! declarative [`Schema`], and CRUD handlers that map the state to a wire
//! entity and call the gateway. The provider never sees the typed state;
//! it works through [`DynamicResource`], which decodes JSON state once,
//! fills schema defaults, and encodes the handler's result back to JSON.
//!
//! # Architecture
//!
//! - [`schema`] - Attribute declarations, defaults, diff suppression, planning
//! - [`common`] - Whitespace and case normalisation shared by the mappers
//! - [`registry`] - Static table of resource type names
//! - one module per resource type
//!
//! # Example
//!
//! ```ignore
//! use terraform_provider_wavefront::resource::get_resource;
//!
//! async fn create(client: &WavefrontClient, config: serde_json::Value) -> anyhow::Result<()> {
//!     let resource = get_resource("wavefront_alert").unwrap();
//!     let state = resource.create(client, config).await?;
//!     Ok(())
//! }
//! ```

pub mod alert;
pub mod alert_target;
pub mod chart_settings;
pub mod common;
pub mod dashboard;
pub mod dashboard_json;
pub mod derived_metric;
pub mod error;
mod registry;
pub mod schema;
pub mod user;
pub mod user_group;

pub use error::ValidationError;
pub use registry::*;
pub use schema::{Attribute, AttributeType, Block, Constraint, DiffSuppress, Plan, Schema};

use crate::wavefront::WavefrontClient;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Local state of a resource as the host persists it
pub trait ResourceState:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);
}

/// A resource type: schema plus lifecycle handlers over a typed state
#[async_trait]
pub trait Resource: Send + Sync {
    type State: ResourceState;

    /// Resource type name, e.g. `wavefront_alert`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Local validation, run before any network call
    fn validate(&self, _state: &Self::State) -> Result<()> {
        Ok(())
    }

    async fn create(&self, client: &WavefrontClient, state: Self::State) -> Result<Self::State>;

    /// Refresh state from the remote object. `None` means the object is gone.
    async fn read(&self, client: &WavefrontClient, state: Self::State)
        -> Result<Option<Self::State>>;

    async fn update(&self, client: &WavefrontClient, state: Self::State) -> Result<Self::State>;

    async fn delete(&self, client: &WavefrontClient, state: Self::State) -> Result<()>;

    /// Adopt an existing remote object: its id becomes the local id, then read
    async fn import(&self, client: &WavefrontClient, id: &str) -> Result<Option<Self::State>> {
        let mut state = Self::State::default();
        state.set_id(Some(id.to_string()));
        self.read(client, state).await
    }

    async fn exists(&self, client: &WavefrontClient, state: &Self::State) -> Result<bool> {
        Ok(self.read(client, state.clone()).await?.is_some())
    }
}

/// Object-safe view of a [`Resource`] over JSON values
#[async_trait]
pub trait DynamicResource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    fn validate(&self, config: &Value) -> Result<()>;
    fn plan(&self, prior: Option<&Value>, proposed: &Value) -> Plan;
    async fn create(&self, client: &WavefrontClient, config: Value) -> Result<Value>;
    async fn read(&self, client: &WavefrontClient, state: Value) -> Result<Option<Value>>;
    async fn update(&self, client: &WavefrontClient, state: Value) -> Result<Value>;
    async fn delete(&self, client: &WavefrontClient, state: Value) -> Result<()>;
    async fn import(&self, client: &WavefrontClient, id: &str) -> Result<Option<Value>>;
    async fn exists(&self, client: &WavefrontClient, state: Value) -> Result<bool>;
}

fn decode<R: Resource>(resource: &R, mut value: Value) -> Result<R::State> {
    Resource::schema(resource).block.apply_defaults(&mut value);
    serde_json::from_value(value)
        .with_context(|| format!("invalid {} configuration", Resource::type_name(resource)))
}

fn encode<S: Serialize>(state: &S) -> Result<Value> {
    serde_json::to_value(state).context("failed to encode resource state")
}

fn display_id<S: ResourceState>(state: &S) -> &str {
    state.id().unwrap_or("<none>")
}

#[async_trait]
impl<R: Resource> DynamicResource for R {
    fn type_name(&self) -> &'static str {
        Resource::type_name(self)
    }

    fn schema(&self) -> Schema {
        Resource::schema(self)
    }

    fn validate(&self, config: &Value) -> Result<()> {
        let missing = Resource::schema(self).block.missing_required(config);
        if !missing.is_empty() {
            bail!(
                "{}: missing required attributes: {}",
                Resource::type_name(self),
                missing.join(", ")
            );
        }
        let state = decode(self, config.clone())?;
        Resource::validate(self, &state)
    }

    fn plan(&self, prior: Option<&Value>, proposed: &Value) -> Plan {
        // Both sides are compared with defaults filled, as decode would see them
        let schema = Resource::schema(self);
        let prior = prior.map(|prior| {
            let mut prior = prior.clone();
            schema.block.apply_defaults(&mut prior);
            prior
        });
        let mut proposed = proposed.clone();
        schema.block.apply_defaults(&mut proposed);
        schema.plan(prior.as_ref(), &proposed)
    }

    async fn create(&self, client: &WavefrontClient, config: Value) -> Result<Value> {
        let state = decode(self, config)?;
        Resource::validate(self, &state)?;

        tracing::info!("Creating {}", Resource::type_name(self));
        let state = Resource::create(self, client, state).await?;
        tracing::info!("Created {} {}", Resource::type_name(self), display_id(&state));
        encode(&state)
    }

    async fn read(&self, client: &WavefrontClient, state: Value) -> Result<Option<Value>> {
        let state = decode(self, state)?;
        let id = display_id(&state).to_string();

        match Resource::read(self, client, state).await? {
            Some(state) => Ok(Some(encode(&state)?)),
            None => {
                tracing::warn!(
                    "{} {} no longer exists, removing it from state",
                    Resource::type_name(self),
                    id
                );
                Ok(None)
            }
        }
    }

    async fn update(&self, client: &WavefrontClient, state: Value) -> Result<Value> {
        let state = decode(self, state)?;
        Resource::validate(self, &state)?;

        tracing::info!("Updating {} {}", Resource::type_name(self), display_id(&state));
        let state = Resource::update(self, client, state).await?;
        encode(&state)
    }

    async fn delete(&self, client: &WavefrontClient, state: Value) -> Result<()> {
        let state = decode(self, state)?;
        let id = display_id(&state).to_string();

        tracing::info!("Deleting {} {}", Resource::type_name(self), id);
        Resource::delete(self, client, state).await?;
        tracing::info!("Deleted {} {}", Resource::type_name(self), id);
        Ok(())
    }

    async fn import(&self, client: &WavefrontClient, id: &str) -> Result<Option<Value>> {
        tracing::info!("Importing {} {}", Resource::type_name(self), id);
        match Resource::import(self, client, id).await? {
            Some(state) => Ok(Some(encode(&state)?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, client: &WavefrontClient, state: Value) -> Result<bool> {
        let state = decode(self, state)?;
        Resource::exists(self, client, &state).await
    }
}

/// The identifier every handler after create needs
pub(crate) fn require_id<'s, S: ResourceState>(state: &'s S, type_name: &str) -> Result<&'s str> {
    match state.id() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => bail!("{} has no id", type_name),
    }
}
