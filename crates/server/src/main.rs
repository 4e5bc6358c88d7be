//! # sheetpress-server
//!
//! HTTP server that converts base64 XLSX uploads into per-sheet
//! Parquet blobs and merges Parquet blobs into one table.

mod config;
mod error;
mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Cli;
use routes::{create_router, AppState};
use sheetpress_pipeline::Rules;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let rules = match &cli.rules {
        Some(path) => Rules::from_path(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => Rules::default(),
    };
    info!(
        upload_rules = rules.upload_text_rules.len(),
        merge_columns = rules.merge_text_columns.len(),
        "normalization rules loaded"
    );

    let app = create_router(AppState {
        rules: Arc::new(rules),
    });

    info!(bind = %cli.bind, "sheetpress-server listening");
    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
