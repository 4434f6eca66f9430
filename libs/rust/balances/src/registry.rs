use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::chain::{ChainDescriptor, ChainNode, TopicGate};

/// Read-only lookup of chains and their node connection info.
#[async_trait]
pub trait ChainRegistry: Send + Sync {
    async fn chain(&self, chain_id: &str) -> Result<Option<ChainDescriptor>>;
    async fn node(&self, chain_node_id: i64) -> Result<Option<ChainNode>>;
}

/// Read-only lookup of a token's contract address when the chain itself
/// carries none.
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    async fn contract_address(&self, token_id: &str, eth_chain_id: u64) -> Result<Option<String>>;
}

/// Read-only lookup of a topic's threshold gate.
#[async_trait]
pub trait TopicRegistry: Send + Sync {
    async fn topic_gate(&self, topic_id: i64) -> Result<Option<TopicGate>>;
}

/// Registry backed by plain maps, for tests and for hosts that already
/// hold the chain data in memory.
#[derive(Default)]
pub struct InMemoryRegistry {
    chains: HashMap<String, ChainDescriptor>,
    nodes: HashMap<i64, ChainNode>,
    tokens: HashMap<(String, u64), String>,
    topics: HashMap<i64, TopicGate>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_chain(&mut self, chain: ChainDescriptor) {
        self.chains.insert(chain.id.clone(), chain);
    }

    pub fn insert_node(&mut self, chain_node_id: i64, node: ChainNode) {
        self.nodes.insert(chain_node_id, node);
    }

    pub fn insert_token(&mut self, token_id: &str, eth_chain_id: u64, contract_address: &str) {
        self.tokens.insert(
            (token_id.to_string(), eth_chain_id),
            contract_address.to_string(),
        );
    }

    pub fn insert_topic(&mut self, topic_id: i64, gate: TopicGate) {
        self.topics.insert(topic_id, gate);
    }
}

#[async_trait]
impl ChainRegistry for InMemoryRegistry {
    async fn chain(&self, chain_id: &str) -> Result<Option<ChainDescriptor>> {
        Ok(self.chains.get(chain_id).cloned())
    }

    async fn node(&self, chain_node_id: i64) -> Result<Option<ChainNode>> {
        Ok(self.nodes.get(&chain_node_id).cloned())
    }
}

#[async_trait]
impl TokenRegistry for InMemoryRegistry {
    async fn contract_address(&self, token_id: &str, eth_chain_id: u64) -> Result<Option<String>> {
        Ok(self
            .tokens
            .get(&(token_id.to_string(), eth_chain_id))
            .cloned())
    }
}

#[async_trait]
impl TopicRegistry for InMemoryRegistry {
    async fn topic_gate(&self, topic_id: i64) -> Result<Option<TopicGate>> {
        Ok(self.topics.get(&topic_id).cloned())
    }
}
