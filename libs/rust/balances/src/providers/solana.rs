use alloy::primitives::U256;
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::{collections::HashMap, time::Duration};

lazy_static! {
    static ref CLUSTER_URLS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("mainnet-beta", "https://api.mainnet-beta.solana.com");
        map.insert("testnet", "https://api.testnet.solana.com");
        map.insert("devnet", "https://api.devnet.solana.com");
        map
    };
}

/// Chain nodes for Solana store a cluster name rather than a full URL;
/// anything unrecognized is assumed to already be an endpoint.
pub(crate) fn cluster_url(url_or_cluster: &str) -> String {
    CLUSTER_URLS
        .get(url_or_cluster)
        .map(|url| (*url).to_string())
        .unwrap_or_else(|| url_or_cluster.to_string())
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<RpcResult>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RpcResult {
    value: Vec<TokenAccount>,
}

#[derive(Deserialize)]
struct TokenAccount {
    account: Account,
}

#[derive(Deserialize)]
struct Account {
    data: AccountData,
}

#[derive(Deserialize)]
struct AccountData {
    parsed: ParsedData,
}

#[derive(Deserialize)]
struct ParsedData {
    info: TokenAccountInfo,
}

#[derive(Deserialize)]
struct TokenAccountInfo {
    #[serde(rename = "tokenAmount")]
    token_amount: TokenAmount,
}

#[derive(Deserialize)]
struct TokenAmount {
    amount: String,
}

/// Balance of the first token account owned by `owner` for the given mint,
/// zero when the owner holds no account for it.
pub(crate) async fn spl_token_balance(url: &str, mint: &str, owner: &str) -> Result<U256> {
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getTokenAccountsByOwner",
        "params": [owner, { "mint": mint }, { "encoding": "jsonParsed" }],
    });

    let client = reqwest::Client::new();
    let response: RpcResponse = client
        .post(url)
        .json(&body)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("getTokenAccountsByOwner request")?
        .json()
        .await
        .context("getTokenAccountsByOwner response")?;

    if let Some(error) = response.error {
        return Err(anyhow!("solana rpc error {}: {}", error.code, error.message));
    }

    let accounts = response
        .result
        .ok_or_else(|| anyhow!("solana rpc response missing result"))?
        .value;

    match accounts.first() {
        Some(account) => {
            let amount = &account.account.data.parsed.info.token_amount.amount;
            U256::from_str_radix(amount, 10).context("token amount")
        }
        None => Ok(U256::ZERO),
    }
}
