//! Error type for the deployment search.

use alloy_primitives::Address;
use origo_chain::ChainClientError;
use thiserror::Error;

/// Errors surfaced by the deployment search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No code exists at the address at the chain tip, so there is no
    /// deployment to locate.
    #[error("no contract code at {0} at the chain tip")]
    ContractNotFound(Address),

    /// No transaction in the located block created the address. Code
    /// appeared at this height anyway, so the contract must have been
    /// created by another contract's internal call, which the node's
    /// top-level transaction list cannot show.
    #[error(
        "no transaction in block {height} created {address}; \
         the contract was likely deployed by an internal transaction, \
         which this search does not support"
    )]
    DeploymentNotInBlock {
        /// The contract address searched for.
        address: Address,
        /// The height code first appears at.
        height: u64,
    },

    /// A chain query failed.
    #[error(transparent)]
    Chain(#[from] ChainClientError),

    /// The search was cancelled between chain queries.
    #[error("search cancelled")]
    Cancelled,
}
