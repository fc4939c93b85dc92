//! Mock [`ChainClient`] for exercising the search logic without a node.

use crate::{BlockBody, ChainClient, ChainClientError, DeploymentReceipt};
use alloy_primitives::{Address, B256, TxHash, U256};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Deterministic block hash for a mock block at `height`.
pub fn block_hash(height: u64) -> B256 {
    B256::from((U256::from(0xb10c_u64) << 192) | U256::from(height))
}

/// Deterministic transaction hash for the `index`-th mock transaction.
pub fn tx_hash(index: u64) -> TxHash {
    B256::from((U256::from(0x7a_u64) << 192) | U256::from(index))
}

/// An in-memory chain with a single step function for code presence: the
/// target address has no code below `deployed_at` and code at every height
/// from `deployed_at` to the tip.
///
/// Query counters record how many calls of each kind the search issued.
#[derive(Debug)]
pub struct MockChain {
    /// The chain tip height.
    tip: u64,
    /// The address whose deployment the chain models.
    target: Address,
    /// The height code first appears at, if the contract exists at all.
    deployed_at: Option<u64>,
    /// Blocks by height.
    blocks: HashMap<u64, BlockBody>,
    /// Receipts by transaction hash.
    receipts: HashMap<TxHash, DeploymentReceipt>,
    /// Number of `code_exists_at` calls served.
    code_queries: AtomicUsize,
    /// Number of `transaction_receipt` calls served.
    receipt_queries: AtomicUsize,
}

impl MockChain {
    /// Creates a chain with the given tip where `target` is never deployed.
    pub fn new(target: Address, tip: u64) -> Self {
        Self {
            tip,
            target,
            deployed_at: None,
            blocks: HashMap::new(),
            receipts: HashMap::new(),
            code_queries: AtomicUsize::new(0),
            receipt_queries: AtomicUsize::new(0),
        }
    }

    /// Marks the target as deployed from `height` onward.
    ///
    /// # Panics
    ///
    /// Panics if `height` exceeds the tip; the fixture would not be a valid
    /// chain state.
    pub fn with_deployment(mut self, height: u64) -> Self {
        assert!(height <= self.tip, "deployment height beyond tip");
        self.deployed_at = Some(height);
        self
    }

    /// Installs a block at `height` holding `tx_count` transactions with
    /// deterministic hashes, where the transaction at `creation_index`
    /// (if any) carries a receipt creating the target address. All other
    /// transactions get plain transfer receipts.
    pub fn with_block(mut self, height: u64, tx_count: u64, creation_index: Option<u64>) -> Self {
        let hash = block_hash(height);
        let transactions: Vec<TxHash> = (0..tx_count).map(tx_hash).collect();

        for (index, tx) in transactions.iter().enumerate() {
            let contract_address =
                (creation_index == Some(index as u64)).then_some(self.target);
            self.receipts.insert(
                *tx,
                DeploymentReceipt {
                    transaction_hash: *tx,
                    block_hash: hash,
                    contract_address,
                },
            );
        }

        self.blocks.insert(height, BlockBody { hash, height, transactions });
        self
    }

    /// Number of `code_exists_at` queries served so far.
    pub fn code_queries(&self) -> usize {
        self.code_queries.load(Ordering::Relaxed)
    }

    /// Number of `transaction_receipt` queries served so far.
    pub fn receipt_queries(&self) -> usize {
        self.receipt_queries.load(Ordering::Relaxed)
    }

    /// Resets the query counters.
    pub fn reset_counters(&self) {
        self.code_queries.store(0, Ordering::Relaxed);
        self.receipt_queries.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn latest_height(&self) -> Result<u64, ChainClientError> {
        Ok(self.tip)
    }

    async fn code_exists_at(
        &self,
        address: Address,
        height: u64,
    ) -> Result<bool, ChainClientError> {
        self.code_queries.fetch_add(1, Ordering::Relaxed);
        if height > self.tip {
            return Err(ChainClientError::BlockNotFound(height));
        }
        Ok(address == self.target && self.deployed_at.is_some_and(|d| height >= d))
    }

    async fn block_body(&self, height: u64) -> Result<BlockBody, ChainClientError> {
        self.blocks.get(&height).cloned().ok_or(ChainClientError::BlockNotFound(height))
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<DeploymentReceipt, ChainClientError> {
        self.receipt_queries.fetch_add(1, Ordering::Relaxed);
        self.receipts.get(&hash).cloned().ok_or(ChainClientError::ReceiptNotFound(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const TARGET: Address = address!("06012c8cf97bead5deae237070f9587f8e7a266d");

    #[tokio::test]
    async fn test_code_presence_is_monotonic() {
        let chain = MockChain::new(TARGET, 200).with_deployment(100);

        let mut last = false;
        for height in 0..=200 {
            let present = chain.code_exists_at(TARGET, height).await.unwrap();
            // Once code appears it must never disappear again.
            assert!(present || !last, "code vanished at height {height}");
            last = present;
        }
        assert!(last);
    }

    #[tokio::test]
    async fn test_never_deployed_has_no_code_anywhere() {
        let chain = MockChain::new(TARGET, 64);
        for height in [0, 1, 32, 64] {
            assert!(!chain.code_exists_at(TARGET, height).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_code_query_beyond_tip_fails() {
        let chain = MockChain::new(TARGET, 10).with_deployment(5);
        let err = chain.code_exists_at(TARGET, 11).await.unwrap_err();
        assert!(matches!(err, ChainClientError::BlockNotFound(11)));
    }

    #[tokio::test]
    async fn test_counters_track_served_queries() {
        let chain = MockChain::new(TARGET, 10).with_deployment(5).with_block(5, 2, Some(1));

        chain.code_exists_at(TARGET, 3).await.unwrap();
        chain.code_exists_at(TARGET, 7).await.unwrap();
        chain.transaction_receipt(tx_hash(0)).await.unwrap();
        assert_eq!(chain.code_queries(), 2);
        assert_eq!(chain.receipt_queries(), 1);

        chain.reset_counters();
        assert_eq!(chain.code_queries(), 0);
        assert_eq!(chain.receipt_queries(), 0);
    }

    #[tokio::test]
    async fn test_block_fixture_shape() {
        let chain = MockChain::new(TARGET, 10).with_block(7, 3, Some(2));

        let body = chain.block_body(7).await.unwrap();
        assert_eq!(body.height, 7);
        assert_eq!(body.hash, block_hash(7));
        assert_eq!(body.transactions, vec![tx_hash(0), tx_hash(1), tx_hash(2)]);

        let receipt = chain.transaction_receipt(tx_hash(2)).await.unwrap();
        assert!(receipt.created(TARGET));
        let receipt = chain.transaction_receipt(tx_hash(1)).await.unwrap();
        assert!(!receipt.created(TARGET));
    }
}
