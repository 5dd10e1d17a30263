mod auth;
mod cli;
mod config;
mod error;
mod jenkins;
mod mcp;
mod summaries;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP stream; logs go to stderr only.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting jenkins-mcp {}", env!("CARGO_PKG_VERSION"));
    cli.execute().await?;

    Ok(())
}
