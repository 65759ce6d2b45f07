use anyhow::{Context, Result};
use tokio::net::TcpListener;
use unity_editor_mcp::command_relay::serve;
use unity_editor_mcp::logging::init_logging;
use unity_editor_mcp::{CommandRelay, Settings, info_log};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("command_relay");

    let settings = Settings::load()?;
    let relay = CommandRelay::from_config(&settings.relay);
    info_log!("Commands will be written to {}", relay.marker_path().display());

    let addr = ("127.0.0.1", settings.relay.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind command relay to port {}", settings.relay.port))?;

    serve(listener, relay).await?;
    Ok(())
}
