// tests/common/mod.rs
//
// Shared helpers: local stand-in servers bound to 127.0.0.1:0 and fixtures.
#![allow(dead_code)]

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use axum::Router;
use tx_risk_analyzer::analyze::decode::IERC20;

pub const TARGET: &str = "0x1111111111111111111111111111111111111111";

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stand-in server");
    });
    format!("http://{addr}")
}

pub fn approve_calldata(value: U256) -> String {
    let call = IERC20::approveCall {
        spender: Address::repeat_byte(0x22),
        value,
    };
    format!("0x{}", hex::encode(call.abi_encode()))
}

pub fn approve_max_envelope() -> String {
    serde_json::json!({
        "to": TARGET,
        "data": approve_calldata(U256::MAX),
    })
    .to_string()
}
