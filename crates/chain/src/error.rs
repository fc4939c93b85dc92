//! Error taxonomy for chain access.

use alloy_primitives::TxHash;
use alloy_transport::{RpcError, TransportErrorKind};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a [`ChainClient`](crate::ChainClient).
///
/// Only transport-level faults are transient; everything else indicates the
/// node's view diverged from what the search believed (e.g. a reorg moved
/// the tip mid-search) and is surfaced rather than retried, since a blind
/// retry could loop forever against a moving target.
#[derive(Error, Debug)]
pub enum ChainClientError {
    /// JSON-RPC transport or response error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),

    /// A single call exceeded its deadline.
    #[error("rpc call timed out after {0:?}")]
    Timeout(Duration),

    /// Bounded retry of a transient failure gave up.
    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts made, including the first.
        attempts: usize,
        /// The failure of the final attempt.
        last: Box<ChainClientError>,
    },

    /// The node has no block at a height the search believed valid.
    #[error("no block found at height {0}")]
    BlockNotFound(u64),

    /// The node has no mined receipt for a transaction it reported.
    #[error("no receipt found for transaction {0}")]
    ReceiptNotFound(TxHash),
}

impl ChainClientError {
    /// Whether the error is a transient transport fault worth retrying.
    ///
    /// JSON-RPC error responses and missing blocks/receipts are logical
    /// failures and never retryable.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Rpc(RpcError::Transport(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_transient() {
        assert!(ChainClientError::Timeout(Duration::from_secs(5)).is_transient());
    }

    #[test]
    fn test_transport_error_is_transient() {
        let err = ChainClientError::Rpc(TransportErrorKind::backend_gone());
        assert!(err.is_transient());
    }

    #[test]
    fn test_logical_errors_are_fatal() {
        assert!(!ChainClientError::BlockNotFound(42).is_transient());
        assert!(!ChainClientError::ReceiptNotFound(TxHash::ZERO).is_transient());
    }

    #[test]
    fn test_retries_exhausted_is_fatal() {
        let err = ChainClientError::RetriesExhausted {
            attempts: 4,
            last: Box::new(ChainClientError::Timeout(Duration::from_secs(1))),
        };
        assert!(!err.is_transient());
        assert!(err.to_string().contains("4 attempts"));
    }
}
