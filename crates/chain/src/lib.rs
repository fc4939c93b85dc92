//! Read-only chain access for the deployment search.
//!
//! This crate defines the [`ChainClient`] seam the search algorithm runs
//! against, an HTTP implementation backed by an Ethereum JSON-RPC endpoint,
//! and the error taxonomy shared by both.

mod client;
pub use client::{BlockBody, ChainClient, DeploymentReceipt};

mod error;
pub use error::ChainClientError;

mod http;
pub use http::{HttpChainClient, HttpChainClientBuilder};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
