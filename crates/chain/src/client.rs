//! The [`ChainClient`] trait and the view types it returns.

use crate::ChainClientError;
use alloy_primitives::{Address, B256, TxHash};
use async_trait::async_trait;

/// A block reduced to what the deployment search needs: its identity and its
/// transaction hashes in chain order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockBody {
    /// The block hash.
    pub hash: B256,
    /// The block height.
    pub height: u64,
    /// Hashes of the block's transactions, in the order the chain executed
    /// them. The creating transaction can sit anywhere in this list.
    pub transactions: Vec<TxHash>,
}

/// A transaction receipt reduced to the fields the resolver inspects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentReceipt {
    /// Hash of the transaction this receipt belongs to.
    pub transaction_hash: TxHash,
    /// Hash of the block the transaction was mined in.
    pub block_hash: B256,
    /// The contract address created by this transaction, if it was a
    /// creation transaction.
    pub contract_address: Option<Address>,
}

impl DeploymentReceipt {
    /// Whether this receipt records the creation of `address`.
    pub fn created(&self, address: Address) -> bool {
        self.contract_address == Some(address)
    }
}

/// Read-only queries against an Ethereum-like chain.
///
/// All four operations are idempotent reads, so the HTTP implementation is
/// free to retry them on transient transport failures. The trait exists so
/// the search logic can run against a mock chain in tests.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Returns the current chain tip height.
    async fn latest_height(&self) -> Result<u64, ChainClientError>;

    /// Returns whether contract code exists at `address` as of `height`.
    ///
    /// `false` is the normal "not deployed yet" signal, not a fault. Code
    /// presence is monotonic over height: once deployed, a contract stays
    /// deployed (self-destruct is not modeled).
    async fn code_exists_at(
        &self,
        address: Address,
        height: u64,
    ) -> Result<bool, ChainClientError>;

    /// Returns the block at `height` with its transaction hashes.
    ///
    /// Fails with [`ChainClientError::BlockNotFound`] if the node has no
    /// block at that height.
    async fn block_body(&self, height: u64) -> Result<BlockBody, ChainClientError>;

    /// Returns the receipt for the transaction with the given hash.
    ///
    /// Fails with [`ChainClientError::ReceiptNotFound`] if the node does not
    /// know a mined receipt for the hash.
    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<DeploymentReceipt, ChainClientError>;
}
