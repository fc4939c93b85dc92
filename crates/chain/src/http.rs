//! HTTP [`ChainClient`] backed by an Ethereum JSON-RPC endpoint.

use crate::{BlockBody, ChainClient, ChainClientError, DeploymentReceipt};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, TxHash};
use alloy_provider::{Provider, RootProvider};
use alloy_transport::TransportResult;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Default per-call deadline in seconds.
const DEFAULT_CALL_TIMEOUT: u64 = 10;

/// Default number of retries for a transient transport failure.
const DEFAULT_MAX_RETRIES: usize = 3;

/// Builder for [`HttpChainClient`].
#[derive(Debug, Clone)]
pub struct HttpChainClientBuilder {
    /// The JSON-RPC endpoint URL.
    pub endpoint: Url,
    /// The per-call deadline.
    pub call_timeout: Duration,
    /// Retries allowed per call on transient failures.
    pub max_retries: usize,
}

impl HttpChainClientBuilder {
    /// Creates a new builder for the given endpoint.
    pub const fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets the per-call deadline.
    pub const fn call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Sets the number of retries allowed per call.
    pub const fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builds the [`HttpChainClient`].
    pub fn build(self) -> HttpChainClient {
        HttpChainClient {
            provider: RootProvider::new_http(self.endpoint),
            call_timeout: self.call_timeout,
            max_retries: self.max_retries,
        }
    }
}

/// A [`ChainClient`] that issues `eth_blockNumber`, `eth_getCode`,
/// `eth_getBlockByNumber` and `eth_getTransactionReceipt` over HTTP.
///
/// Every call runs under a deadline and is retried a bounded number of
/// times with exponential backoff, but only for transient transport
/// failures; logical failures propagate on the first occurrence.
#[derive(Debug, Clone)]
pub struct HttpChainClient {
    /// The underlying provider.
    provider: RootProvider,
    /// The per-call deadline.
    call_timeout: Duration,
    /// Retries allowed per call on transient failures.
    max_retries: usize,
}

impl HttpChainClient {
    /// Creates a client for `endpoint` with default timeout and retries.
    pub fn new(endpoint: Url) -> Self {
        HttpChainClientBuilder::new(endpoint).build()
    }

    /// Awaits `fut` under the per-call deadline.
    async fn timed<T>(
        &self,
        fut: impl Future<Output = TransportResult<T>>,
    ) -> Result<T, ChainClientError> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(res) => res.map_err(ChainClientError::Rpc),
            Err(_) => Err(ChainClientError::Timeout(self.call_timeout)),
        }
    }

    /// Runs `op` with bounded exponential backoff on transient failures.
    async fn retrying<T, F, Fut>(&self, op: F) -> Result<T, ChainClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ChainClientError>>,
    {
        let attempts = self.max_retries + 1;
        op.retry(ExponentialBuilder::default().with_max_times(self.max_retries))
            .when(ChainClientError::is_transient)
            .notify(|err, delay| {
                warn!(target: "chain", %err, ?delay, "transient rpc failure, retrying");
            })
            .await
            .map_err(|err| {
                if err.is_transient() {
                    ChainClientError::RetriesExhausted { attempts, last: Box::new(err) }
                } else {
                    err
                }
            })
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn latest_height(&self) -> Result<u64, ChainClientError> {
        self.retrying(|| async {
            self.timed(self.provider.get_block_number().into_future()).await
        })
        .await
    }

    async fn code_exists_at(
        &self,
        address: Address,
        height: u64,
    ) -> Result<bool, ChainClientError> {
        self.retrying(|| async {
            let code = self
                .timed(self.provider.get_code_at(address).number(height).into_future())
                .await?;
            Ok(!code.is_empty())
        })
        .await
    }

    async fn block_body(&self, height: u64) -> Result<BlockBody, ChainClientError> {
        self.retrying(|| async {
            let block = self
                .timed(
                    self.provider
                        .get_block_by_number(BlockNumberOrTag::Number(height))
                        .into_future(),
                )
                .await?
                .ok_or(ChainClientError::BlockNotFound(height))?;

            Ok(BlockBody {
                hash: block.header.hash,
                height: block.header.number,
                transactions: block.transactions.hashes().collect(),
            })
        })
        .await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<DeploymentReceipt, ChainClientError> {
        self.retrying(|| async {
            let receipt = self
                .timed(self.provider.get_transaction_receipt(hash).into_future())
                .await?
                .ok_or(ChainClientError::ReceiptNotFound(hash))?;

            // A receipt without a block hash is still pending; the search
            // only asks about mined transactions.
            let block_hash = receipt.block_hash.ok_or(ChainClientError::ReceiptNotFound(hash))?;

            Ok(DeploymentReceipt {
                transaction_hash: receipt.transaction_hash,
                block_hash,
                contract_address: receipt.contract_address,
            })
        })
        .await
    }
}
