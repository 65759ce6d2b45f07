use anyhow::Result;
use rmcp::{ServiceExt, transport::stdio};
use unity_editor_mcp::logging::init_logging;
use unity_editor_mcp::{Settings, ToolGateway, UnityEditorMcpServer, error_log, info_log};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("unity_editor_mcp");

    let settings = Settings::load()?;
    info_log!("Unity Editor MCP Server starting, Unity bridge at {}", settings.gateway.unity_url);

    let gateway = ToolGateway::new(&settings.gateway)?;
    let service = UnityEditorMcpServer::new(gateway)
        .serve(stdio())
        .await
        .inspect_err(|e| error_log!("Failed to start MCP server: {}", e))?;

    service.waiting().await?;
    info_log!("MCP server stopped");
    Ok(())
}
