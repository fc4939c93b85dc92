//! Bisection over block height for the first height with code.

use crate::SearchError;
use alloy_primitives::Address;
use origo_chain::ChainClient;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Finds the lowest height at which `address` has code, given that code
/// exists at `tip`.
///
/// Runs a binary search over the monotonic code-presence predicate.
/// Invariant throughout: no code at `lo`, code at `hi`. The midpoint is
/// rounded up, so `mid == hi` happens exactly when the range has collapsed
/// to `hi - lo == 1` and `hi` is the answer. Height 0 is probed once up
/// front since the rounded-up midpoint can never reach it.
///
/// Issues O(log tip) code queries, strictly in sequence: every probe
/// narrows the shared `(lo, hi)` range, so there is nothing to parallelize.
pub async fn locate_deployment_height<C>(
    client: &C,
    address: Address,
    tip: u64,
    cancel: &CancellationToken,
) -> Result<u64, SearchError>
where
    C: ChainClient + ?Sized,
{
    // A single-block chain has nowhere else to deploy.
    if tip == 0 {
        return Ok(0);
    }

    if client.code_exists_at(address, 0).await? {
        debug!(target: "locator", %address, "code present in the genesis block");
        return Ok(0);
    }

    let mut lo = 0u64;
    let mut hi = tip;

    while lo < hi {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let mid = lo + (hi - lo + 1) / 2;
        if mid == hi {
            // Range collapsed to (hi - 1, hi) with code only at hi.
            break;
        }

        let has_code = client.code_exists_at(address, mid).await?;
        trace!(target: "locator", mid, has_code, lo, hi, "bisection probe");
        if has_code {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    debug!(target: "locator", %address, height = hi, "located first height with code");
    Ok(hi)
}
