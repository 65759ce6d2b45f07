//! HTTP relay that hands commands to the IDE extension through a marker file.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::{error_log, info_log, warn_log};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// The record the IDE extension reads from the marker file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    pub message: String,
    pub auto_execute: bool,
    /// RFC 3339 UTC timestamp with millisecond precision
    pub timestamp: String,
}

/// Body of `POST /copilot-command`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub message: String,
    #[serde(default)]
    pub auto_execute: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_execute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Writes commands to the marker file, overwriting whatever was there
#[derive(Debug, Clone)]
pub struct CommandRelay {
    marker_path: PathBuf,
    service_name: String,
}

impl CommandRelay {
    pub fn new(marker_path: impl Into<PathBuf>, service_name: impl Into<String>) -> Self {
        Self {
            marker_path: marker_path.into(),
            service_name: service_name.into(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.marker_path(), config.service_name.clone())
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Stamp and persist a command; only the latest command survives
    ///
    /// The parent directory must already exist. The write is neither locked nor atomic.
    pub async fn post_command(
        &self,
        message: impl Into<String>,
        auto_execute: bool,
    ) -> Result<CommandRecord, RelayError> {
        let record = CommandRecord {
            message: message.into(),
            auto_execute,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let content = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(&self.marker_path, content).await?;
        info_log!(
            "Command written to {} (autoExecute: {})",
            self.marker_path.display(),
            auto_execute
        );
        Ok(record)
    }
}

/// Read back the current marker file
pub async fn read_marker(path: &Path) -> Result<CommandRecord, RelayError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Build the relay router
pub fn create_router(relay: CommandRelay) -> Router {
    Router::new()
        .route("/copilot-command", post(post_command))
        .route("/ping", get(ping))
        .with_state(Arc::new(relay))
}

/// Serve the relay on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, relay: CommandRelay) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info_log!("Command relay listening on {}", addr);
    }
    axum::serve(listener, create_router(relay)).await
}

async fn post_command(
    State(relay): State<Arc<CommandRelay>>,
    request: Result<Json<CommandRequest>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn_log!("Rejected command request: {}", rejection.body_text());
            return failure(rejection.status(), rejection.body_text());
        }
    };

    match relay.post_command(request.message, request.auto_execute).await {
        Ok(record) => Json(CommandResponse {
            success: true,
            message: Some("Command received".to_string()),
            auto_execute: Some(record.auto_execute),
            error: None,
        })
        .into_response(),
        Err(e) => {
            error_log!("Failed to write command marker file: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn failure(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(CommandResponse {
            success: false,
            message: None,
            auto_execute: None,
            error: Some(error),
        }),
    )
        .into_response()
}

async fn ping(State(relay): State<Arc<CommandRelay>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": relay.service_name(),
    }))
}
