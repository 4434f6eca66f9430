use alloy::primitives::U256;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

const TERRA_DENOM: &str = "uluna";

#[derive(Deserialize)]
struct BalancesResponse {
    balances: Vec<Coin>,
}

#[derive(Deserialize)]
struct Coin {
    denom: String,
    amount: String,
}

/// Native uluna balance from the LCD bank endpoint, zero when the denom is
/// absent from the account's balances.
pub(crate) async fn native_denom_balance(lcd_url: &str, address: &str) -> Result<U256> {
    let base = lcd_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    let response: BalancesResponse = client
        .get(format!("{}/cosmos/bank/v1beta1/balances/{}", base, address))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("bank balances request")?
        .json()
        .await
        .context("bank balances response")?;

    match response
        .balances
        .iter()
        .find(|coin| coin.denom == TERRA_DENOM)
    {
        Some(coin) => U256::from_str_radix(&coin.amount, 10).context("balance amount"),
        None => Ok(U256::ZERO),
    }
}
