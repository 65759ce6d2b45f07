use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::tool_catalog::{Arguments, ToolDefinition, UnityTool, tool_definitions};
use crate::unity_bridge_client::{BridgeError, Liveness, UnityBridgeClient};
use crate::{debug_log, info_log, warn_log};

/// One entry of a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultContent {
    Text { text: String },
}

/// Result of a tool call, always carrying at least one content entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ResultContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolCallResult {
    /// Informational result with `is_error` left unset
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            content: vec![ResultContent::Text { text: text.into() }],
            is_error: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ResultContent::Text { text: text.into() }],
            is_error: Some(false),
        }
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ResultContent::Text {
                text: format!("Error: {}", message),
            }],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first content entry
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(ResultContent::Text { text }) => text,
            None => "",
        }
    }
}

/// Message shown when the Unity bridge does not answer its ping
pub fn unreachable_message(base_url: &str) -> String {
    format!(
        "Unity Editor is not reachable at {}. Open the Unity project and start the MCP bridge \
         server from the Unity Editor menu (Tools > MCP Bridge > Start Server), then try again.",
        base_url
    )
}

/// Dispatches MCP tool calls to the Unity Editor bridge
#[derive(Debug, Clone)]
pub struct ToolGateway {
    client: UnityBridgeClient,
}

impl ToolGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, BridgeError> {
        Ok(Self::with_client(UnityBridgeClient::new(config.unity_url.clone())?))
    }

    pub fn with_client(client: UnityBridgeClient) -> Self {
        Self { client }
    }

    pub fn unity_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Run a tool call end to end. Failures are reported in the result, never returned.
    pub async fn call_tool(&self, name: &str, arguments: Arguments) -> ToolCallResult {
        if self.client.probe().await == Liveness::Unreachable {
            warn_log!("Tool '{}' called but Unity bridge at {} is unreachable", name, self.unity_url());
            return ToolCallResult::notice(unreachable_message(self.unity_url()));
        }

        match self.dispatch(name, &arguments).await {
            Ok(payload) => match serde_json::to_string_pretty(&payload) {
                Ok(text) => {
                    debug_log!("Tool '{}' succeeded", name);
                    ToolCallResult::success(text)
                }
                Err(e) => ToolCallResult::error(e),
            },
            Err(e) => {
                warn_log!("Tool '{}' failed: {}", name, e);
                ToolCallResult::error(e)
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: &Arguments) -> Result<Value, BridgeError> {
        let tool = UnityTool::from_name(name).ok_or_else(|| BridgeError::UnknownTool(name.to_string()))?;
        let body = tool.shape_arguments(arguments)?;
        info_log!("Forwarding '{}' to {}", tool.name(), tool.path());
        self.client.post(tool.path(), body.as_ref()).await
    }
}
