//! Balance fetches against real public endpoints. Ignored by default;
//! run with `cargo test -- --ignored` and a reachable network.

use alloy::primitives::U256;
use balances::chain::{ChainBase, ChainDescriptor, ChainType, NETWORK_TERRA};
use balances::providers::BalanceFetcher;
use dotenv::dotenv;

fn chain(base: ChainBase, network: &str) -> ChainDescriptor {
    ChainDescriptor {
        id: network.to_string(),
        base,
        network: network.to_string(),
        chain_type: ChainType::Token,
        address: None,
        chain_node_id: Some(1),
    }
}

#[tokio::test]
#[ignore = "requires a live Ethereum RPC endpoint"]
async fn live_erc20_balance() {
    dotenv().ok();
    let url = std::env::var("ETHEREUM_NODE_URL").expect("ETHEREUM_NODE_URL not set!");

    // UNI token, Uniswap timelock.
    let fetcher = BalanceFetcher::resolve(
        &chain(ChainBase::Ethereum, "uniswap"),
        &url,
        Some("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
    )
    .unwrap();

    let balance = fetcher
        .fetch("0x1a9C8182C09F50C8318d769245beA52c32BE35BC")
        .await
        .unwrap();

    assert!(balance > U256::ZERO);
}

#[tokio::test]
#[ignore = "requires network access to the Terra LCD"]
async fn live_terra_balance() {
    dotenv().ok();
    let url = std::env::var("TERRA_LCD_URL")
        .unwrap_or_else(|_| "https://terra-classic-lcd.publicnode.com".to_string());

    let fetcher = BalanceFetcher::resolve(
        &chain(ChainBase::CosmosSdk, NETWORK_TERRA),
        &url,
        None,
    )
    .unwrap();

    // Any long-lived address works here; only reachability is asserted.
    let result = fetcher
        .fetch("terra1jrq7xa63a4qgpdgtj70k8yz5p32ps0r5xfjkje")
        .await;

    assert!(result.is_ok());
}
