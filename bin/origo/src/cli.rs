//! Contains the origo CLI.

use alloy_primitives::Address;
use anyhow::Result;
use clap::{ArgAction, Parser};
use origo_chain::HttpChainClientBuilder;
use origo_locator::find_deployment;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// The endpoint used when `--eth-rpc` is not given.
const DEFAULT_ETH_RPC: &str = "https://ethereum-rpc.publicnode.com";

/// The origo CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The contract address to look up.
    #[arg(value_name = "ADDRESS")]
    pub address: Address,
    /// URL of the execution client JSON-RPC API.
    #[arg(
        long,
        visible_alias = "host",
        env = "ORIGO_ETH_RPC",
        default_value = DEFAULT_ETH_RPC,
        help = "URL of the execution client JSON-RPC API"
    )]
    pub eth_rpc: Url,
    /// Per-request timeout in seconds.
    #[arg(long, default_value = "10")]
    pub timeout: u64,
    /// Retries allowed per request on transient failures.
    #[arg(long, default_value = "3")]
    pub retries: usize,
    /// Verbosity level (0-3)
    #[arg(long, short, action = ArgAction::Count)]
    pub v: u8,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        crate::telemetry::init_tracing_subscriber(self.v)?;

        let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        rt.block_on(self.start())
    }

    /// Runs the search and prints the result.
    async fn start(self) -> Result<()> {
        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!(target: "origo", "interrupt received, stopping search");
                interrupt.cancel();
            }
        });

        let client = HttpChainClientBuilder::new(self.eth_rpc)
            .call_timeout(Duration::from_secs(self.timeout))
            .max_retries(self.retries)
            .build();

        let record = find_deployment(&client, self.address, &cancel).await?;

        println!("Block: {}", record.block_hash);
        println!("Transaction: {}", record.transaction_hash);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_parses_checksummed_address() {
        let cli =
            Cli::try_parse_from(["origo", "0x06012c8Cf97BEaD5deAe237070F9587f8E7A266d"]).unwrap();
        assert_eq!(cli.address, address!("06012c8cf97bead5deae237070f9587f8e7a266d"));
    }

    #[test]
    fn test_parses_lowercase_address() {
        let cli =
            Cli::try_parse_from(["origo", "0x06012c8cf97bead5deae237070f9587f8e7a266d"]).unwrap();
        assert_eq!(cli.address, address!("06012c8cf97bead5deae237070f9587f8e7a266d"));
    }

    #[test]
    fn test_rejects_malformed_address() {
        // Too short, not hex, and missing entirely: all fail at parse time,
        // before any network call.
        assert!(Cli::try_parse_from(["origo", "0x1234"]).is_err());
        assert!(Cli::try_parse_from(["origo", "not-an-address"]).is_err());
        assert!(Cli::try_parse_from(["origo"]).is_err());
    }

    #[test]
    fn test_default_endpoint() {
        let cli =
            Cli::try_parse_from(["origo", "0x06012c8cf97bead5deae237070f9587f8e7a266d"]).unwrap();
        assert_eq!(cli.eth_rpc, Url::parse(DEFAULT_ETH_RPC).unwrap());
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.retries, 3);
        assert_eq!(cli.v, 0);
    }

    #[test]
    fn test_host_alias_overrides_endpoint() {
        let cli = Cli::try_parse_from([
            "origo",
            "0x06012c8cf97bead5deae237070f9587f8e7a266d",
            "--host",
            "http://localhost:8545",
        ])
        .unwrap();
        assert_eq!(cli.eth_rpc, Url::parse("http://localhost:8545").unwrap());
    }

    #[test]
    fn test_knob_flags() {
        let cli = Cli::try_parse_from([
            "origo",
            "0x06012c8cf97bead5deae237070f9587f8e7a266d",
            "--timeout",
            "30",
            "--retries",
            "0",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.retries, 0);
        assert_eq!(cli.v, 2);
    }
}
