use anyhow::{Context, Result};
use clap::Parser;
use podloom_client::ReqwestTransport;
use podloom_config::AppConfig;
use podloom_store::{LoggingMiddleware, Store};
use std::sync::Arc;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the logger so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match dotenv {
        Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
        Err(_) => log::debug!(".env file not found, will rely on environment variables"),
    }

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::load());
    log::info!("Using backend {}", config.ajax_url);

    let transport = ReqwestTransport::from_config(&config).context("Failed to build HTTP client")?;

    // Initialize store with middleware
    let mut store = Store::new(Arc::new(transport)).with_rss_per_page(config.rss_per_page);
    store.add_middleware(Box::new(LoggingMiddleware::new()));

    let output = commands::run(&store, cli.command).await?;

    let rendered = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
