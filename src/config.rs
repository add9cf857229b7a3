//! Provider Configuration
//!
//! The two provider settings: the Wavefront address and the API token. Either
//! may be left out of the `configure` request and taken from the environment.

use crate::resource::schema::{Attribute, AttributeType, Block, Schema};
use crate::wavefront::WavefrontClient;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;

pub const ADDRESS_ENV: &str = "WAVEFRONT_ADDRESS";
pub const TOKEN_ENV: &str = "WAVEFRONT_TOKEN";

/// Provider settings as received from the host
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Wavefront host, e.g. `example.wavefront.com`
    #[serde(default)]
    pub address: Option<String>,
    /// API token
    #[serde(default)]
    pub token: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn from_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProviderConfig {
    pub fn new(address: &str, token: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            token: Some(token.to_string()),
        }
    }

    /// Schema of the provider block
    pub fn schema() -> Schema {
        Schema::new(
            1,
            Block::new()
                .describe("Wavefront connection settings")
                .attribute(
                    "address",
                    Attribute::required(AttributeType::String)
                        .describe("Wavefront host, e.g. example.wavefront.com")
                        .with_env_default(ADDRESS_ENV),
                )
                .attribute(
                    "token",
                    Attribute::required(AttributeType::String)
                        .describe("Wavefront API token")
                        .with_env_default(TOKEN_ENV)
                        .sensitive(),
                ),
        )
    }

    /// Effective address (configuration > environment)
    fn effective_address_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_empty(self.address.clone()).or_else(|| non_empty(env(ADDRESS_ENV)))
    }

    fn effective_token_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        non_empty(self.token.clone()).or_else(|| non_empty(env(TOKEN_ENV)))
    }

    /// Fill missing settings from the environment; both must end up set
    pub fn resolve(&self) -> Result<Self> {
        self.resolve_with(from_env)
    }

    fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let Some(address) = self.effective_address_with(&env) else {
            bail!("address must be set in the provider block or {}", ADDRESS_ENV);
        };
        let Some(token) = self.effective_token_with(&env) else {
            bail!("token must be set in the provider block or {}", TOKEN_ENV);
        };
        Ok(Self::new(&address, &token))
    }

    /// Build the gateway client every resource handler borrows
    pub fn client(&self) -> Result<WavefrontClient> {
        let config = self.resolve()?;
        let address = config.address.unwrap_or_default();
        let token = config.token.unwrap_or_default();
        WavefrontClient::new(&address, &token)
            .with_context(|| format!("failed to configure Wavefront client for {}", address))
    }
}
