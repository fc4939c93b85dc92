//! The end-to-end deployment search.

use crate::{DeploymentRecord, SearchError, locate_deployment_height, resolve_deployment};
use alloy_primitives::Address;
use origo_chain::ChainClient;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Finds the block and transaction in which `address` was deployed.
///
/// Fetches the chain tip, verifies code exists there at all (reporting
/// [`SearchError::ContractNotFound`] otherwise, before any bisection),
/// bisects for the first height with code, then resolves that block's
/// creating transaction. Nothing is cached or persisted; cancelling the
/// token stops the search between any two chain queries with nothing to
/// clean up.
pub async fn find_deployment<C>(
    client: &C,
    address: Address,
    cancel: &CancellationToken,
) -> Result<DeploymentRecord, SearchError>
where
    C: ChainClient + ?Sized,
{
    let tip = client.latest_height().await?;
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    if !client.code_exists_at(address, tip).await? {
        return Err(SearchError::ContractNotFound(address));
    }
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    let height = locate_deployment_height(client, address, tip, cancel).await?;
    info!(target: "locator", %address, height, "deployment height located");

    let record = resolve_deployment(client, address, height, cancel).await?;
    info!(
        target: "locator",
        %address,
        block = %record.block_hash,
        transaction = %record.transaction_hash,
        "deployment resolved"
    );
    Ok(record)
}
