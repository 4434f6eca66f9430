use thiserror::Error;

/// Everything that can go wrong while resolving a balance. `get_balance`
/// surfaces these to the caller; the topic threshold gate converts them
/// into a denial instead.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("no chain node found")]
    ChainNodeNotFound,
    #[error("unsupported token")]
    UnsupportedToken,
    #[error("no balance available on chain {0}")]
    UnsupportedChain(String),
    #[error("balance fetch failed: {0}")]
    RemoteFetchFailure(#[source] anyhow::Error),
    #[error("registry lookup failed: {0}")]
    Registry(#[source] anyhow::Error),
}
