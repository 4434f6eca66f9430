use alloy::primitives::U256;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::chain::{ChainBase, ChainDescriptor, ChainNode, ChainType, NETWORK_AXIE_INFINITY};
use crate::error::BalanceError;
use crate::providers::BalanceSource;
use crate::registry::{ChainRegistry, TokenRegistry, TopicRegistry};

pub const DEFAULT_PRUNE_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_NONZERO_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One slot per `(base, numeric chain id, contract, holder)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    base: ChainBase,
    eth_chain_id: Option<u64>,
    /// `None` marks a native-asset balance.
    contract: Option<String>,
    address: String,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    balance: U256,
    fetched_at: Instant,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub prune_interval: Duration,
    pub nonzero_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prune_interval: DEFAULT_PRUNE_INTERVAL,
            nonzero_ttl: DEFAULT_NONZERO_TTL,
        }
    }
}

/// In-memory balance cache in front of the chain RPC providers.
///
/// Constructed explicitly and passed to consumers; there is no process-wide
/// instance. Zero balances are dropped on the next prune pass, non-zero
/// ones live until `nonzero_ttl`.
pub struct TokenBalanceCache {
    chains: Arc<dyn ChainRegistry>,
    tokens: Arc<dyn TokenRegistry>,
    topics: Arc<dyn TopicRegistry>,
    source: Arc<dyn BalanceSource>,
    config: CacheConfig,
    balances: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
    prune_job: Mutex<Option<JoinHandle<()>>>,
}

impl TokenBalanceCache {
    pub fn new(
        chains: Arc<dyn ChainRegistry>,
        tokens: Arc<dyn TokenRegistry>,
        topics: Arc<dyn TopicRegistry>,
        source: Arc<dyn BalanceSource>,
    ) -> Self {
        Self::with_config(chains, tokens, topics, source, CacheConfig::default())
    }

    pub fn with_config(
        chains: Arc<dyn ChainRegistry>,
        tokens: Arc<dyn TokenRegistry>,
        topics: Arc<dyn TopicRegistry>,
        source: Arc<dyn BalanceSource>,
        config: CacheConfig,
    ) -> Self {
        Self {
            chains,
            tokens,
            topics,
            source,
            config,
            balances: Arc::new(Mutex::new(HashMap::new())),
            prune_job: Mutex::new(None),
        }
    }

    /// Launches the periodic prune job. A no-op while a job is live.
    pub async fn start(&self) {
        let mut job = self.prune_job.lock().await;
        if let Some(handle) = job.as_ref() {
            if !handle.is_finished() {
                return;
            }
        }

        let balances = Arc::clone(&self.balances);
        let CacheConfig {
            prune_interval,
            nonzero_ttl,
        } = self.config;

        *job = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(prune_interval);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let evicted = prune(&mut *balances.lock().await, nonzero_ttl);
                if evicted > 0 {
                    debug!(evicted, "pruned balance cache");
                }
            }
        }));
    }

    /// Stops the prune job, drops every entry and starts over.
    pub async fn reset(&self) {
        if let Some(handle) = self.prune_job.lock().await.take() {
            handle.abort();
        }
        self.balances.lock().await.clear();
        self.start().await;
    }

    /// Cached balance of `address` on `chain`, fetching over RPC on a miss.
    ///
    /// Two concurrent misses for one key may both fetch; the last store
    /// wins and both callers get a correct answer.
    pub async fn get_balance(
        &self,
        chain: &ChainDescriptor,
        address: &str,
    ) -> Result<U256, BalanceError> {
        let node = self.resolve_node(chain).await?;
        let contract = self.resolve_contract(chain, &node).await?;

        let key = CacheKey {
            base: chain.base,
            eth_chain_id: node.eth_chain_id,
            contract: contract.clone(),
            address: address.to_string(),
        };

        if let Some(entry) = self.balances.lock().await.get(&key) {
            debug!(chain = %chain.id, address, "balance cache hit");
            return Ok(entry.balance);
        }

        let balance = self
            .source
            .fetch_balance(chain, &node, address, contract.as_deref())
            .await?;

        self.balances.lock().await.insert(
            key,
            CacheEntry {
                balance,
                fetched_at: Instant::now(),
            },
        );
        info!(chain = %chain.id, address, %balance, "balance fetched and cached");

        Ok(balance)
    }

    /// Whether `user_address` may act on the topic, given its configured
    /// minimum balance. Errors become a denial since this gates writes.
    pub async fn validate_topic_threshold(
        &self,
        topic_id: Option<i64>,
        user_address: Option<&str>,
    ) -> bool {
        let (Some(topic_id), Some(address)) =
            (topic_id, user_address.filter(|address| !address.is_empty()))
        else {
            return true;
        };

        match self.check_threshold(topic_id, address).await {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(topic_id, address, error = %e, "token threshold validation failed");
                false
            }
        }
    }

    async fn check_threshold(&self, topic_id: i64, address: &str) -> Result<bool> {
        let Some(gate) = self.topics.topic_gate(topic_id).await? else {
            return Ok(true);
        };
        let Some(chain) = self.chains.chain(&gate.chain_id).await? else {
            return Ok(true);
        };
        if chain.chain_type != ChainType::Token {
            return Ok(true);
        }
        let Some(threshold) = gate.token_threshold else {
            return Ok(true);
        };
        if threshold <= 0 {
            return Ok(true);
        }

        let balance = self.get_balance(&chain, address).await?;
        Ok(balance >= U256::from(threshold as u64))
    }

    async fn resolve_node(&self, chain: &ChainDescriptor) -> Result<ChainNode, BalanceError> {
        let node = match chain.chain_node_id {
            Some(id) => self.chains.node(id).await.map_err(BalanceError::Registry)?,
            None => None,
        };
        let node = node.ok_or(BalanceError::ChainNodeNotFound)?;

        // Ethereum-family chains are unusable without a numeric chain id.
        if chain.base == ChainBase::Ethereum && node.eth_chain_id.is_none() {
            return Err(BalanceError::ChainNodeNotFound);
        }

        Ok(node)
    }

    async fn resolve_contract(
        &self,
        chain: &ChainDescriptor,
        node: &ChainNode,
    ) -> Result<Option<String>, BalanceError> {
        if let Some(address) = &chain.address {
            return Ok(Some(address.clone()));
        }

        if chain.base == ChainBase::Ethereum && chain.network != NETWORK_AXIE_INFINITY {
            let eth_chain_id = node.eth_chain_id.ok_or(BalanceError::ChainNodeNotFound)?;
            let contract = self
                .tokens
                .contract_address(&chain.id, eth_chain_id)
                .await
                .map_err(BalanceError::Registry)?
                .ok_or(BalanceError::UnsupportedToken)?;
            return Ok(Some(contract));
        }

        Ok(None)
    }
}

impl Drop for TokenBalanceCache {
    fn drop(&mut self) {
        if let Ok(mut job) = self.prune_job.try_lock() {
            if let Some(handle) = job.take() {
                handle.abort();
            }
        }
    }
}

/// Single eviction pass: zero balances go unconditionally, non-zero ones
/// only once older than `nonzero_ttl`. Returns the number of evictions.
fn prune(map: &mut HashMap<CacheKey, CacheEntry>, nonzero_ttl: Duration) -> usize {
    let before = map.len();
    map.retain(|_, entry| {
        !entry.balance.is_zero() && entry.fetched_at.elapsed() <= nonzero_ttl
    });
    before - map.len()
}
