//! Implementation of the `sidebyside serve` command.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::{build_app_state, load_config};
use crate::adapters::http::HttpServer;
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind, overriding server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding server.port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Configuration file to use instead of .sidebyside/config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
pub struct ServeOutput {
    pub address: String,
    pub stopped: bool,
}

impl CommandOutput for ServeOutput {
    fn to_human(&self) -> String {
        format!("Server on {} stopped", self.address)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ServeArgs, json_mode: bool) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    ConfigLoader::validate(&config)?;

    let _logger = LoggerImpl::init(&config.logging)?;

    let state = build_app_state(&config).await?;
    let address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(state, config.server, config.security);
    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Server on {address} failed"))?;

    output(&ServeOutput { address, stopped: true }, json_mode);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
