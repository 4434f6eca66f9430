use alloy::primitives::U256;
use async_trait::async_trait;
use tracing::debug;

use crate::chain::{
    ChainBase, ChainDescriptor, ChainNode, NETWORK_AXIE_INFINITY, NETWORK_ERC721, NETWORK_TERRA,
};
use crate::error::BalanceError;

mod axie;
mod cosmos;
mod evm;
mod solana;
mod terra;

/// Where the cache gets balances from on a miss. Production code uses
/// [`RpcBalanceSource`]; tests substitute their own implementation.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balance(
        &self,
        chain: &ChainDescriptor,
        node: &ChainNode,
        address: &str,
        contract_address: Option<&str>,
    ) -> Result<U256, BalanceError>;
}

/// One variant per supported chain family, selected once from the chain
/// descriptor rather than re-branching at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceFetcher {
    Erc20 { url: String, contract: String },
    Erc721 { url: String, contract: String },
    AxieStaked,
    SplToken { url: String, mint: String },
    CosmosStakedDenom { url: String },
    TerraNative { url: String },
}

impl BalanceFetcher {
    pub fn resolve(
        chain: &ChainDescriptor,
        url: &str,
        contract_address: Option<&str>,
    ) -> Result<Self, BalanceError> {
        if chain.network == NETWORK_AXIE_INFINITY {
            return Ok(Self::AxieStaked);
        }
        if chain.network == NETWORK_TERRA {
            return Ok(Self::TerraNative {
                url: url.to_string(),
            });
        }

        match chain.base {
            ChainBase::Ethereum => {
                let contract = contract_address
                    .ok_or(BalanceError::UnsupportedToken)?
                    .to_string();
                if chain.network == NETWORK_ERC721 {
                    Ok(Self::Erc721 {
                        url: url.to_string(),
                        contract,
                    })
                } else {
                    Ok(Self::Erc20 {
                        url: url.to_string(),
                        contract,
                    })
                }
            }
            ChainBase::Solana => {
                let mint = contract_address
                    .ok_or(BalanceError::UnsupportedToken)?
                    .to_string();
                Ok(Self::SplToken {
                    url: solana::cluster_url(url),
                    mint,
                })
            }
            ChainBase::CosmosSdk => Ok(Self::CosmosStakedDenom {
                url: url.to_string(),
            }),
            ChainBase::Near | ChainBase::Substrate => {
                Err(BalanceError::UnsupportedChain(chain.network.clone()))
            }
        }
    }

    pub async fn fetch(&self, address: &str) -> Result<U256, BalanceError> {
        let fetched = match self {
            Self::Erc20 { url, contract } => evm::erc20_balance(url, contract, address).await,
            Self::Erc721 { url, contract } => evm::erc721_balance(url, contract, address).await,
            Self::AxieStaked => axie::staked_axs_balance(address).await,
            Self::SplToken { url, mint } => solana::spl_token_balance(url, mint, address).await,
            Self::CosmosStakedDenom { url } => cosmos::staked_denom_balance(url, address).await,
            Self::TerraNative { url } => terra::native_denom_balance(url, address).await,
        };

        fetched.map_err(BalanceError::RemoteFetchFailure)
    }
}

/// Production source: resolves a fetcher for the chain and queries the
/// remote node. No caching and no retries at this layer.
pub struct RpcBalanceSource;

#[async_trait]
impl BalanceSource for RpcBalanceSource {
    async fn fetch_balance(
        &self,
        chain: &ChainDescriptor,
        node: &ChainNode,
        address: &str,
        contract_address: Option<&str>,
    ) -> Result<U256, BalanceError> {
        let fetcher = BalanceFetcher::resolve(chain, node.rpc_url(), contract_address)?;
        debug!(chain = %chain.id, address, "fetching balance over RPC");
        fetcher.fetch(address).await
    }
}
