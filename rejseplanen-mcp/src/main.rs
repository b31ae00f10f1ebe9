use std::process::ExitCode;
use std::sync::Arc;

use rejseplanen_mcp::adapter::TransitAdapter;
use rejseplanen_mcp::config::ServerConfig;
use rejseplanen_mcp::mcp::McpServer;
use rejseplanen_mcp::rejseplanen::ReqwestFetch;
use rejseplanen_mcp::tools::ToolRegistry;
use rejseplanen_mcp::web::{AppState, MCP_PATH, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(ServerConfig::from_env()?);

    let fetch = Arc::new(ReqwestFetch::new(config.request_timeout_secs)?);
    let adapter = Arc::new(TransitAdapter::new(config.clone(), fetch));
    let mcp = McpServer::new(ToolRegistry::new(adapter));
    let tools = mcp.registry().names();

    let app = create_router(AppState::new(mcp));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "Rejseplanen MCP server listening");
    info!("MCP endpoint: http://{addr}{MCP_PATH}");
    info!(environment = %config.environment, upstream = %config.base_url, "configuration");
    info!(?tools, "registered tools");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
