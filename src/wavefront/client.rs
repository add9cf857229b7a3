//! Wavefront Client
//!
//! Main client for the Wavefront REST API, combining the configured address,
//! the API token and the HTTP transport. One client is built when the provider
//! is configured and lent to every resource handler.

use super::alert::Alert;
use super::dashboard::Dashboard;
use super::derived_metric::DerivedMetric;
use super::entity::Entities;
use super::error::{ApiError, Result};
use super::http::WavefrontHttpClient;
use super::target::Target;
use super::user::User;
use super::user_group::UserGroup;
use serde_json::Value;
use std::fmt;
use url::Url;

/// Main Wavefront client
#[derive(Clone)]
pub struct WavefrontClient {
    http: WavefrontHttpClient,
    base_url: Url,
    token: String,
}

impl fmt::Debug for WavefrontClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WavefrontClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl WavefrontClient {
    /// Create a new client for `address`.
    ///
    /// A bare host name (`example.wavefront.com`) is reached over https; a full
    /// URL is used as given.
    pub fn new(address: &str, token: &str) -> Result<Self> {
        let base_url = parse_address(address)?;
        let http = WavefrontHttpClient::new()?;

        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
        })
    }

    /// The base URL every API path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for an API path plus query parameters
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    /// Make a GET request against an API path
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.http.get(self.endpoint(path, &[]), &self.token).await
    }

    /// Make a POST request against an API path
    pub async fn post(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        self.http
            .post(self.endpoint(path, query), &self.token, body)
            .await
    }

    /// Make a PUT request against an API path
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.http.put(self.endpoint(path, &[]), &self.token, body).await
    }

    /// Make a DELETE request against an API path
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.http.delete(self.endpoint(path, &[]), &self.token).await
    }

    // =========================================================================
    // Entity families
    // =========================================================================

    pub fn alerts(&self) -> Entities<'_, Alert> {
        Entities::new(self)
    }

    pub fn targets(&self) -> Entities<'_, Target> {
        Entities::new(self)
    }

    pub fn dashboards(&self) -> Entities<'_, Dashboard> {
        Entities::new(self)
    }

    pub fn derived_metrics(&self) -> Entities<'_, DerivedMetric> {
        Entities::new(self)
    }

    pub fn users(&self) -> Entities<'_, User> {
        Entities::new(self)
    }

    pub fn user_groups(&self) -> Entities<'_, UserGroup> {
        Entities::new(self)
    }
}

fn parse_address(address: &str) -> Result<Url> {
    let address = address.trim();
    let raw = if address.contains("://") {
        address.to_string()
    } else {
        format!("https://{}", address)
    };

    Url::parse(&raw).map_err(|source| ApiError::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_defaults_to_https() {
        let client = WavefrontClient::new("example.wavefront.com", "token").unwrap();
        assert_eq!(client.base_url().as_str(), "https://example.wavefront.com/");
    }

    #[test]
    fn test_full_url_is_kept() {
        let client = WavefrontClient::new("http://127.0.0.1:8080", "token").unwrap();
        let url = client.endpoint("/api/v2/alert/42", &[]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/v2/alert/42");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix_and_query() {
        let client = WavefrontClient::new("https://proxy.local/wavefront/", "token").unwrap();
        let url = client.endpoint("/api/v2/user", &[("sendEmail", "true".to_string())]);
        assert_eq!(
            url.as_str(),
            "https://proxy.local/wavefront/api/v2/user?sendEmail=true"
        );
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let err = WavefrontClient::new("http://exa mple.com", "token").unwrap_err();
        assert!(matches!(err, ApiError::InvalidAddress { .. }));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = WavefrontClient::new("example.wavefront.com", "secret-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
