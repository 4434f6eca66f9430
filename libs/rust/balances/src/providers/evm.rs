use alloy::{
    primitives::{Address, U256},
    providers::ProviderBuilder,
    sol,
};
use anyhow::{Context, Result};
use std::str::FromStr;
use tracing::debug;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    erc20,
    "./abis/erc20.json"
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    erc721,
    "./abis/erc721.json"
);

/// ERC20 `balanceOf` over a fresh HTTP provider. The provider is dropped
/// when this returns, so no connection outlives the call.
pub(crate) async fn erc20_balance(url: &str, contract: &str, holder: &str) -> Result<U256> {
    let provider = ProviderBuilder::new().connect_http(url.parse().context("invalid RPC url")?);
    let contract = Address::from_str(contract).context("invalid contract address")?;
    let holder = Address::from_str(holder).context("invalid holder address")?;

    debug!(%contract, %holder, "querying erc20 balanceOf");

    let token = erc20::new(contract, provider);
    let balance = token
        .balanceOf(holder)
        .call()
        .await
        .context("erc20 balanceOf")?;

    Ok(balance)
}

/// ERC721 `balanceOf`, counting tokens held rather than a fungible amount.
pub(crate) async fn erc721_balance(url: &str, contract: &str, holder: &str) -> Result<U256> {
    let provider = ProviderBuilder::new().connect_http(url.parse().context("invalid RPC url")?);
    let contract = Address::from_str(contract).context("invalid contract address")?;
    let holder = Address::from_str(holder).context("invalid holder address")?;

    debug!(%contract, %holder, "querying erc721 balanceOf");

    let token = erc721::new(contract, provider);
    let balance = token
        .balanceOf(holder)
        .call()
        .await
        .context("erc721 balanceOf")?;

    Ok(balance)
}
