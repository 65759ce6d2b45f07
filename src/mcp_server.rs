use crate::tool_catalog::ToolDefinition;
use crate::tool_gateway::{ResultContent, ToolCallResult, ToolGateway};
use crate::{debug_log, info_log};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::sync::Arc;

/// Unity Editor MCP Server that exposes the Unity bridge tools over MCP
#[derive(Clone)]
pub struct UnityEditorMcpServer {
    gateway: Arc<ToolGateway>,
}

impl UnityEditorMcpServer {
    pub fn new(gateway: ToolGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Tool catalog in rmcp form
    pub fn tools(&self) -> Vec<Tool> {
        self.gateway.list_tools().into_iter().map(to_mcp_tool).collect()
    }

    /// Run a tool through the gateway and convert the result for rmcp
    pub async fn run_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let result = self
            .gateway
            .call_tool(name, arguments.unwrap_or_default())
            .await;
        to_mcp_result(result)
    }
}

pub fn to_mcp_tool(definition: ToolDefinition) -> Tool {
    Tool::new(
        definition.name,
        definition.description,
        Arc::new(definition.input_schema),
    )
}

/// Convert a gateway result, keeping `is_error` exactly as set (including unset)
pub fn to_mcp_result(result: ToolCallResult) -> CallToolResult {
    let content = result
        .content
        .into_iter()
        .map(|entry| match entry {
            ResultContent::Text { text } => Content::text(text),
        })
        .collect();
    let mut converted = CallToolResult::success(content);
    converted.is_error = result.is_error;
    converted
}

impl ServerHandler for UnityEditorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Unity Editor MCP Server. Tools are forwarded to the Unity Editor bridge at {}",
                self.gateway.unity_url()
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        debug_log!("Listing tools");
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info_log!("Tool call: {}", request.name);
        Ok(self.run_tool(&request.name, request.arguments).await)
    }
}
