//! Plugin protocol
//!
//! One JSON request per line in, one JSON response per line out. Every
//! request is answered, including malformed ones, so the host never waits on
//! a response that will not come.

use crate::config::ProviderConfig;
use crate::provider::Provider;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::Instrument;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    GetSchema,
    Configure {
        #[serde(default)]
        config: ProviderConfig,
    },
    Validate {
        resource: String,
        config: Value,
    },
    Plan {
        resource: String,
        #[serde(default)]
        prior: Option<Value>,
        proposed: Value,
    },
    Create {
        resource: String,
        config: Value,
    },
    Read {
        resource: String,
        state: Value,
    },
    Update {
        resource: String,
        state: Value,
    },
    Delete {
        resource: String,
        state: Value,
    },
    Import {
        resource: String,
        id: String,
    },
    Exists {
        resource: String,
        state: Value,
    },
}

impl Request {
    pub fn op(&self) -> &'static str {
        match self {
            Request::GetSchema => "get_schema",
            Request::Configure { .. } => "configure",
            Request::Validate { .. } => "validate",
            Request::Plan { .. } => "plan",
            Request::Create { .. } => "create",
            Request::Read { .. } => "read",
            Request::Update { .. } => "update",
            Request::Delete { .. } => "delete",
            Request::Import { .. } => "import",
            Request::Exists { .. } => "exists",
        }
    }

    /// Resource type the request targets, if any
    pub fn resource(&self) -> Option<&str> {
        match self {
            Request::GetSchema | Request::Configure { .. } => None,
            Request::Validate { resource, .. }
            | Request::Plan { resource, .. }
            | Request::Create { resource, .. }
            | Request::Read { resource, .. }
            | Request::Update { resource, .. }
            | Request::Delete { resource, .. }
            | Request::Import { resource, .. }
            | Request::Exists { resource, .. } => Some(resource),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// `result` is null for operations without a result and for reads of
    /// objects that no longer exist
    Ok { result: Value },
    Error { message: String },
}

impl Response {
    pub fn ok(result: Value) -> Self {
        Response::Ok { result }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }
}

/// Answer requests from `reader` on `writer` until the reader is exhausted
pub async fn serve<R, W>(provider: &mut Provider, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let span = tracing::info_span!(
                    "request",
                    id = %uuid::Uuid::new_v4(),
                    op = request.op(),
                    resource = request.resource().unwrap_or("-"),
                );
                provider.handle(request).instrument(span).await
            }
            Err(err) => {
                tracing::warn!("Rejected malformed request: {}", err);
                Response::error(format!("invalid request: {}", err))
            }
        };

        let mut encoded = serde_json::to_string(&response).context("failed to encode response")?;
        encoded.push('\n');
        writer
            .write_all(encoded.as_bytes())
            .await
            .context("failed to write response")?;
        writer.flush().await.context("failed to flush response")?;
    }

    tracing::debug!("Request stream closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decoding() {
        let request: Request = serde_json::from_value(json!({
            "op": "import",
            "resource": "wavefront_user",
            "id": "jane@example.com"
        }))
        .unwrap();
        assert_eq!(request.op(), "import");
        assert_eq!(request.resource(), Some("wavefront_user"));

        let request: Request = serde_json::from_value(json!({"op": "get_schema"})).unwrap();
        assert_eq!(request, Request::GetSchema);

        let request: Request = serde_json::from_value(json!({
            "op": "plan",
            "resource": "wavefront_alert",
            "proposed": {"name": "a"}
        }))
        .unwrap();
        assert!(matches!(request, Request::Plan { prior: None, .. }));
    }

    #[test]
    fn test_configure_without_config_uses_defaults() {
        let request: Request = serde_json::from_value(json!({"op": "configure"})).unwrap();
        assert_eq!(
            request,
            Request::Configure {
                config: ProviderConfig::default()
            }
        );
    }

    #[test]
    fn test_response_encoding() {
        assert_eq!(
            serde_json::to_value(Response::ok(json!({"id": "1"}))).unwrap(),
            json!({"status": "ok", "result": {"id": "1"}})
        );
        assert_eq!(
            serde_json::to_value(Response::error("boom")).unwrap(),
            json!({"status": "error", "message": "boom"})
        );
    }
}
