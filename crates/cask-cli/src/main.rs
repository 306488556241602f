#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod render;

use std::process;

use anyhow::Context;
use cask_client::UploadOperations;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "cask_cli::startup";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    #[cfg(feature = "dotenv")]
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing();
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %cli.endpoint,
        "starting cask-cli"
    );

    let client = cli.create_client()?;

    match &cli.space {
        Some(space) => list_uploads(&cli, &client, space).await,
        None => list_spaces(&cli, &client).await,
    }
}

/// Lists the spaces the credential grants access to.
async fn list_spaces(cli: &Cli, client: &cask_client::StorageClient) -> anyhow::Result<()> {
    let spaces = client
        .space_operations()
        .list_spaces()
        .await
        .context("failed to list spaces")?;

    if cli.json {
        render::render_spaces_json(&spaces)?;
    } else {
        render::render_spaces(&spaces);
    }

    Ok(())
}

/// Aggregates and renders the full upload listing for one space.
async fn list_uploads(
    cli: &Cli,
    client: &cask_client::StorageClient,
    space: &str,
) -> anyhow::Result<()> {
    let mut operations = UploadOperations::new(client.session(space));
    if let Some(page_size) = cli.page_size {
        operations = operations.with_page_size(page_size);
    }

    let result = operations
        .list_all()
        .await
        .with_context(|| format!("failed to list uploads in {space}"))?;

    if cli.json {
        render::render_uploads_json(&result)?;
    } else {
        render::render_uploads(space, &result);
    }

    Ok(())
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
