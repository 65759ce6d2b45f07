use reqwest::Client;
use serde_json::Value;

use crate::{debug_log, info_log};

/// Path the Unity bridge answers on when it is running
const PING_PATH: &str = "/ping";

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Missing required argument '{argument}' for tool '{tool}'")]
    MissingArgument { tool: String, argument: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of probing the Unity bridge before a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Reachable,
    Unreachable,
}

/// HTTP client for the Unity Editor bridge
///
/// Each call is a single request. There are no retries and no explicit timeout beyond the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct UnityBridgeClient {
    http: Client,
    base_url: String,
}

impl UnityBridgeClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BridgeError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Best-effort liveness check; any failure counts as unreachable
    pub async fn probe(&self) -> Liveness {
        match self.http.get(self.url(PING_PATH)).send().await {
            Ok(response) if response.status().is_success() => Liveness::Reachable,
            Ok(response) => {
                info_log!("Unity bridge ping returned status {}", response.status());
                Liveness::Unreachable
            }
            Err(e) => {
                debug_log!("Unity bridge ping failed: {}", e);
                Liveness::Unreachable
            }
        }
    }

    /// POST to a bridge endpoint and decode the JSON reply
    ///
    /// `body` of `None` sends an empty request body.
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, BridgeError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Err(BridgeError::Status(reason));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
