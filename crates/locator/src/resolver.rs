//! Resolves the located height to the creating transaction.

use crate::SearchError;
use alloy_primitives::{Address, B256, TxHash};
use origo_chain::ChainClient;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// The outcome of a successful search: where the contract was deployed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeploymentRecord {
    /// Hash of the block the contract was deployed in.
    pub block_hash: B256,
    /// Hash of the transaction that deployed the contract.
    pub transaction_hash: TxHash,
}

/// Scans the block at `height` for the transaction whose receipt names
/// `address` as the created contract.
///
/// The block's transaction order is preserved; the creating transaction can
/// sit anywhere in the list, and there can only be one since creation is a
/// single irreversible event per address. An exhausted list means the
/// contract appeared at this height through an internal transaction, which
/// the node's top-level transaction list cannot surface.
pub async fn resolve_deployment<C>(
    client: &C,
    address: Address,
    height: u64,
    cancel: &CancellationToken,
) -> Result<DeploymentRecord, SearchError>
where
    C: ChainClient + ?Sized,
{
    let body = client.block_body(height).await?;
    debug!(
        target: "locator",
        height,
        transactions = body.transactions.len(),
        "scanning block for the creating transaction"
    );

    for hash in body.transactions {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let receipt = client.transaction_receipt(hash).await?;
        trace!(target: "locator", tx = %hash, created = ?receipt.contract_address, "receipt");
        if receipt.created(address) {
            return Ok(DeploymentRecord {
                block_hash: receipt.block_hash,
                transaction_hash: receipt.transaction_hash,
            });
        }
    }

    Err(SearchError::DeploymentNotInBlock { address, height })
}
