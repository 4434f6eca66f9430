use serde::{Deserialize, Serialize};

/// Networks that get a dedicated balance code path instead of the
/// plain per-base one.
pub const NETWORK_AXIE_INFINITY: &str = "axie-infinity";
pub const NETWORK_ERC721: &str = "erc721";
pub const NETWORK_TERRA: &str = "terra";

/// Underlying protocol family of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainBase {
    Ethereum,
    CosmosSdk,
    Solana,
    Near,
    Substrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    Chain,
    Dao,
    Token,
    Offchain,
}

/// Node connection info for a chain, resolved through the chain registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainNode {
    pub url: String,
    pub private_url: Option<String>,
    pub eth_chain_id: Option<u64>,
}

impl ChainNode {
    /// Private endpoints win over public ones when both are configured.
    pub fn rpc_url(&self) -> &str {
        self.private_url.as_deref().unwrap_or(&self.url)
    }
}

/// Read-only view of a chain as the surrounding application stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDescriptor {
    pub id: String,
    pub base: ChainBase,
    pub network: String,
    pub chain_type: ChainType,
    /// Fixed token contract address, when the chain has one.
    pub address: Option<String>,
    pub chain_node_id: Option<i64>,
}

/// A topic's minimum-balance gate, resolved through the topic registry.
#[derive(Debug, Clone)]
pub struct TopicGate {
    pub chain_id: String,
    pub token_threshold: Option<i64>,
}
