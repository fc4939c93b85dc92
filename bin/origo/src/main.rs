//! Finds the block and transaction that deployed a contract.
//!
//! ## Usage
//!
//! ```sh
//! origo 0x06012c8cf97bead5deae237070f9587f8e7a266d --eth-rpc https://mainnet.infura.io/v3/<API_KEY>
//! ```
//!
//! On success, prints two lines:
//!
//! ```text
//! Block: 0x<block hash>
//! Transaction: 0x<transaction hash>
//! ```

use clap::Parser;

mod cli;
mod telemetry;

fn main() {
    if let Err(err) = cli::Cli::parse().run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
