//! LCD client tests against a mock gateway served on a local port.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use straightedge_migrate::config::LcdConfig;
use straightedge_migrate::lcd::{ChainGateway, LcdClient};
use straightedge_migrate::{ChainParams, MigrateError, Session};
use straightedge_types::{Coin, StdFee, StdTx};

const MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const KNOWN: &str = "str1q7rkep9lgv75duhvl8wc6v8f0rwtwtyas9g40t";

#[derive(Clone, Default)]
struct MockLcd {
    broadcasts: Arc<Mutex<Vec<Value>>>,
}

async fn balances(Path(address): Path<String>) -> Json<Value> {
    if address == KNOWN {
        Json(json!({
            "height": "1200",
            "result": [
                { "denom": "astr", "amount": "30000000000000000" }
            ]
        }))
    } else {
        Json(json!({ "height": "1200", "result": [] }))
    }
}

async fn account(Path(address): Path<String>) -> Json<Value> {
    if address == KNOWN {
        Json(json!({
            "height": "1200",
            "result": {
                "type": "cosmos-sdk/Account",
                "value": {
                    "address": KNOWN,
                    "coins": [],
                    "public_key": null,
                    "account_number": "5",
                    "sequence": 2
                }
            }
        }))
    } else {
        Json(json!({
            "height": "1200",
            "result": {
                "type": "cosmos-sdk/Account",
                "value": {
                    "address": "",
                    "coins": [],
                    "public_key": null,
                    "account_number": "0",
                    "sequence": "0"
                }
            }
        }))
    }
}

async fn txs(State(state): State<MockLcd>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let memo = body["tx"]["memo"].as_str().unwrap_or_default().to_string();
    state.broadcasts.lock().unwrap().push(body);

    match memo.as_str() {
        "reject" => (
            StatusCode::OK,
            Json(json!({ "height": "0", "txhash": "DEAD", "code": 4, "raw_log": "unauthorized" })),
        ),
        "explode" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal" })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({ "height": "0", "txhash": "0F1E2D3C", "raw_log": "[]" })),
        ),
    }
}

async fn start_mock() -> (String, MockLcd) {
    let state = MockLcd::default();
    let app = Router::new()
        .route("/bank/balances/{address}", get(balances))
        .route("/auth/accounts/{address}", get(account))
        .route("/txs", post(txs))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}/", addr), state)
}

fn client(url: &str) -> LcdClient {
    LcdClient::new(&LcdConfig {
        url: url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn empty_tx(memo: &str) -> StdTx {
    StdTx {
        msg: vec![],
        fee: StdFee {
            amount: vec![Coin::new("astr", "25000000000000000")],
            gas: "100000".to_string(),
        },
        memo: memo.to_string(),
        signatures: vec![],
    }
}

#[tokio::test]
async fn reads_balances() {
    let (url, _) = start_mock().await;
    let lcd = client(&url);

    let coins = lcd.account_balances(KNOWN).await.unwrap();
    assert_eq!(coins, vec![Coin::new("astr", "30000000000000000")]);

    let none = lcd.account_balances("str1unknown").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn reads_mixed_number_encodings() {
    let (url, _) = start_mock().await;
    let account = client(&url).account_sequence(KNOWN).await.unwrap();
    assert_eq!(account.account_number, 5);
    assert_eq!(account.sequence, 2);
}

#[tokio::test]
async fn empty_account_is_not_found() {
    let (url, _) = start_mock().await;
    let err = client(&url).account_sequence("str1unknown").await.unwrap_err();
    assert!(matches!(err, MigrateError::AccountNotFound(_)));
}

#[tokio::test]
async fn broadcast_posts_sync_mode() {
    let (url, state) = start_mock().await;
    let result = client(&url).submit_transaction(&empty_tx("hello")).await.unwrap();
    assert_eq!(result.txhash, "0F1E2D3C");
    assert_eq!(result.code, 0);

    let broadcasts = state.broadcasts.lock().unwrap();
    assert_eq!(broadcasts.len(), 1);
    assert_eq!(broadcasts[0]["mode"], "sync");
    assert_eq!(broadcasts[0]["tx"]["fee"]["gas"], "100000");
}

#[tokio::test]
async fn non_zero_code_is_rejection() {
    let (url, state) = start_mock().await;
    let err = client(&url).submit_transaction(&empty_tx("reject")).await.unwrap_err();
    assert!(matches!(err, MigrateError::TxRejected { code: 4, .. }));
    assert_eq!(state.broadcasts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn error_status_is_reported() {
    let (url, _) = start_mock().await;
    let err = client(&url).submit_transaction(&empty_tx("explode")).await.unwrap_err();
    assert!(matches!(err, MigrateError::Lcd { status: 500, .. }));
}

#[tokio::test]
async fn unreachable_gateway_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .account_balances(KNOWN)
        .await
        .unwrap_err();
    assert!(matches!(err, MigrateError::Network(_)));
}

#[tokio::test]
async fn full_session_over_http() {
    let (url, state) = start_mock().await;
    let lcd = client(&url);
    let params = ChainParams::default();

    let session = Session::import(MNEMONIC, &params, &lcd).await.unwrap();
    assert_eq!(session.source_address(), KNOWN);

    let result = session.send(&params, &lcd).await.unwrap();
    assert!(result.is_success());

    let broadcasts = state.broadcasts.lock().unwrap();
    let tx = &broadcasts[0]["tx"];
    assert_eq!(tx["msg"][0]["type"], "cosmos-sdk/MsgSend");
    assert_eq!(tx["msg"][0]["value"]["amount"][0]["amount"], "5000000000000000");
    assert_eq!(tx["signatures"][0]["pub_key"]["type"], "tendermint/PubKeySr25519");
}
