//! HTTP utilities for Wavefront REST API calls

use super::error::{ApiError, Result};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("terraform-provider-wavefront/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Wavefront API calls
#[derive(Clone)]
pub struct WavefrontHttpClient {
    client: Client,
}

impl WavefrontHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: Url, token: &str) -> Result<Value> {
        self.send(Method::GET, url, token, None).await
    }

    /// Make a POST request with an optional JSON body
    pub async fn post(&self, url: Url, token: &str, body: Option<&Value>) -> Result<Value> {
        self.send(Method::POST, url, token, body).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, url: Url, token: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, url, token, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: Url, token: &str) -> Result<Value> {
        self.send(Method::DELETE, url, token, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        token: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let path = url.path().to_string();
        let mut request = self
            .client
            .request(method.clone(), url)
            .bearer_auth(token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(ApiError::Status {
                method: method.to_string(),
                path,
                status,
            });
        }

        // Handle empty response
        if response_body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("bad\nrequest\t!"), "badrequest!");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("bytes total"));
    }
}
