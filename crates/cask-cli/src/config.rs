//! Command-line configuration.

use anyhow::Context;
use cask_client::{Credentials, StorageClient, StorageConfig};
use clap::Parser;
use url::Url;

/// Browse spaces and uploads in a content-addressed storage service.
#[derive(Debug, Parser)]
#[command(name = "cask-cli", version, about)]
pub struct Cli {
    /// Storage service endpoint URL (https only).
    #[arg(long, env = "CASK_ENDPOINT")]
    pub endpoint: Url,

    /// API token presented as a bearer credential.
    #[arg(long, env = "CASK_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// DID of the space to list uploads for.
    ///
    /// When omitted, the available spaces are listed instead.
    #[arg(long)]
    pub space: Option<String>,

    /// Page size hint forwarded to the service.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Emit raw JSON instead of formatted output.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the storage client from the parsed arguments.
    pub fn create_client(&self) -> anyhow::Result<StorageClient> {
        let config = StorageConfig::new(self.endpoint.clone(), Credentials::new(&self.token))
            .context("invalid endpoint configuration")?;
        StorageClient::new(config).context("failed to create storage client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_space_listing_invocation() {
        let cli = Cli::parse_from([
            "cask-cli",
            "--endpoint",
            "https://up.storage.example",
            "--token",
            "csk_token",
        ]);

        assert!(cli.space.is_none());
        assert!(!cli.json);
        assert!(cli.create_client().is_ok());
    }

    #[test]
    fn test_cli_parses_upload_listing_invocation() {
        let cli = Cli::parse_from([
            "cask-cli",
            "--endpoint",
            "https://up.storage.example",
            "--token",
            "csk_token",
            "--space",
            "did:key:z6Mk",
            "--page-size",
            "25",
            "--json",
        ]);

        assert_eq!(cli.space.as_deref(), Some("did:key:z6Mk"));
        assert_eq!(cli.page_size, Some(25));
        assert!(cli.json);
    }

    #[test]
    fn test_cli_rejects_http_endpoint() {
        let cli = Cli::parse_from([
            "cask-cli",
            "--endpoint",
            "http://up.storage.example",
            "--token",
            "csk_token",
        ]);

        assert!(cli.create_client().is_err());
    }
}
