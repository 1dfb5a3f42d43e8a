//! Portal da Transparência MCP server, stdio entry point

use std::env;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use transparencia::client::PortalClient;
use transparencia::config::portal::{API_KEY_ENV, DEFAULT_API_KEY};
use transparencia_mcp::server::McpServer;

/// Expose Portal da Transparência queries as MCP tools over stdio
#[derive(Parser)]
#[command(name = "transparencia-mcp", version, about)]
struct Args {
    /// Portal da Transparência API key (defaults to $PORTAL_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Override the upstream API base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn main() {
    // Logs go to stderr; stdout carries the JSON-RPC channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api_key = args
        .api_key
        .or_else(|| env::var(API_KEY_ENV).ok())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| {
            tracing::warn!("{API_KEY_ENV} not set, falling back to the built-in shared key");
            DEFAULT_API_KEY.to_string()
        });

    let portal = match args.base_url {
        Some(base_url) => PortalClient::with_base_url(api_key, base_url),
        None => PortalClient::new(api_key),
    };
    let portal = match portal {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("failed to initialize HTTP client: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Servidor MCP Portal da Transparência iniciado");
    McpServer::new(portal).run_stdio();
    // stdin closed: clean exit
}
