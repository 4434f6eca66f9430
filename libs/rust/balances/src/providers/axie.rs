use alloy::{
    primitives::{Address, U256},
    providers::ProviderBuilder,
    sol,
};
use anyhow::{Context, Result};
use std::str::FromStr;

use super::evm;

// The AXS balance lives partly in the wallet and partly in the staking
// pool, so both contracts are queried against Ronin and summed.
const RONIN_RPC_URL: &str = "https://api.roninchain.com/rpc";
const AXS_TOKEN: &str = "0x97a9107c1793bc407d6f527b77e7fff4d812bece";
const AXS_STAKING_POOL: &str = "0x05b0bb3c1c320b280501b86706c3551995bc8571";

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    axs_staking_pool,
    "./abis/axs_staking_pool.json"
);

pub(crate) async fn staked_axs_balance(holder: &str) -> Result<U256> {
    let wallet = evm::erc20_balance(RONIN_RPC_URL, AXS_TOKEN, holder)
        .await
        .context("AXS balanceOf")?;

    let provider = ProviderBuilder::new()
        .connect_http(RONIN_RPC_URL.parse().context("invalid Ronin RPC url")?);
    let pool_address = Address::from_str(AXS_STAKING_POOL).context("invalid pool address")?;
    let holder = Address::from_str(holder).context("invalid holder address")?;

    let pool = axs_staking_pool::new(pool_address, provider);
    let staked = pool
        .getStakingAmount(holder)
        .call()
        .await
        .context("getStakingAmount")?;

    Ok(wallet.saturating_add(staked))
}
