use alloy::primitives::U256;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct StakingParamsResponse {
    params: StakingParams,
}

#[derive(Deserialize)]
struct StakingParams {
    bond_denom: String,
}

#[derive(Deserialize)]
struct BalanceResponse {
    balance: Option<Coin>,
}

#[derive(Deserialize)]
struct Coin {
    amount: String,
}

/// Bank balance of the chain's bond denom. The denom is read from the
/// staking module first since it differs per chain.
pub(crate) async fn staked_denom_balance(lcd_url: &str, address: &str) -> Result<U256> {
    let base = lcd_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    let params: StakingParamsResponse = client
        .get(format!("{}/cosmos/staking/v1beta1/params", base))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("staking params request")?
        .json()
        .await
        .context("staking params response")?;

    let denom = params.params.bond_denom;

    let response: BalanceResponse = client
        .get(format!(
            "{}/cosmos/bank/v1beta1/balances/{}/by_denom",
            base, address
        ))
        .query(&[("denom", denom.as_str())])
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("bank balance request")?
        .json()
        .await
        .context("bank balance response")?;

    match response.balance {
        Some(coin) => U256::from_str_radix(&coin.amount, 10).context("balance amount"),
        None => Ok(U256::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_staked_denom_balance() {
        let mut server = Server::new_async().await;
        let url = server.url();

        let params_mock = server
            .mock("GET", "/cosmos/staking/v1beta1/params")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"
                {
                    "params": {
                        "unbonding_time": "1814400s",
                        "max_validators": 180,
                        "bond_denom": "uatom"
                    }
                }
            "#,
            )
            .create_async()
            .await;

        let balance_mock = server
            .mock("GET", "/cosmos/bank/v1beta1/balances/cosmos1abc/by_denom")
            .match_query(Matcher::UrlEncoded("denom".into(), "uatom".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "balance": { "denom": "uatom", "amount": "777" } }"#)
            .create_async()
            .await;

        let balance = staked_denom_balance(&url, "cosmos1abc").await.unwrap();
        assert_eq!(balance, U256::from(777u64));

        params_mock.assert_async().await;
        balance_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_remote_failure_surfaces() {
        let mut server = Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/cosmos/staking/v1beta1/params")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let result = staked_denom_balance(&url, "cosmos1abc").await;
        assert!(result.is_err());
    }
}
