//! Unity Editor MCP
//!
//! A Model Context Protocol (MCP) server that forwards Unity Editor tools to the Unity Editor
//! HTTP bridge, plus a small relay that hands commands to an IDE extension through a marker file.

pub mod command_relay;
pub mod config;
pub mod logging;
pub mod mcp_server;
pub mod tool_catalog;
pub mod tool_gateway;
pub mod unity_bridge_client;

#[cfg(test)]
mod test_utils;

pub use command_relay::{CommandRecord, CommandRelay, RelayError};
pub use config::{ConfigError, GatewayConfig, RelayConfig, Settings};
pub use mcp_server::UnityEditorMcpServer;
pub use tool_catalog::{Arguments, ToolDefinition, UnityTool};
pub use tool_gateway::{ToolCallResult, ToolGateway};
pub use unity_bridge_client::{BridgeError, Liveness, UnityBridgeClient};
