// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface tests driving the router in-process

mod helpers;

use std::sync::Arc;

use alloy_primitives::{hex, Address, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use helpers::{addr, event, scoreboard, MockChainClient, MockIdentityLookup, CONTRACT};
use raceboard::api::{router, AppState};
use raceboard::{NonceStore, PlausibilityPolicy, PlayerTotals, ScoreSubmitter};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(chain: MockChainClient, lookup: MockIdentityLookup) -> Router {
    let chain = Arc::new(chain);
    let board = scoreboard(chain.clone(), Arc::new(lookup));
    let submitter = ScoreSubmitter::new(
        chain,
        Arc::new(NonceStore::default()),
        PlausibilityPolicy::default(),
        Some(CONTRACT),
    );
    router(AppState::new(board, submitter, "Monad Racer"))
}

fn app(chain: MockChainClient) -> Router {
    app_with(chain, MockIdentityLookup::new())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn hex_of(address: Address) -> String {
    format!("{address:#x}")
}

fn same_address(value: &Value, address: Address) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.eq_ignore_ascii_case(&hex_of(address)))
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(MockChainClient::new(1)), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_global_leaderboard_shape() {
    let game = addr(1);
    let chain = MockChainClient::new(20_000).with_events(vec![
        event(game, addr(0xa), 100, 5, 19_000),
        event(game, addr(0xb), 100, 8, 19_500),
        event(addr(2), addr(0xc), 90, 20, 19_900),
    ]);
    let lookup = MockIdentityLookup::new().with_name(addr(0xb), "bolt");

    let (status, body) = get(
        app_with(chain, lookup),
        "/api/leaderboard?scope=global&range=5000&chunk=100&limit=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["scope"], json!("global"));
    assert_eq!(body["gameAddress"], Value::Null);
    assert_eq!(body["fromBlock"], json!("15001"));
    assert_eq!(body["toBlock"], json!("20000"));
    assert_eq!(body["chunkSize"], json!(100));
    assert_eq!(body["rowsCount"], json!(2));

    let rows = body["rows"].as_array().unwrap();
    assert!(same_address(&rows[0]["player"], addr(0xb)));
    assert_eq!(rows[0]["username"], json!("bolt"));
    assert_eq!(rows[0]["score"], json!("100"));
    assert_eq!(rows[0]["transactions"], json!("8"));
    assert_eq!(rows[0]["rank"], json!(1));
    assert!(same_address(&rows[1]["player"], addr(0xa)));
    assert_eq!(rows[1]["username"], Value::Null);
}

#[tokio::test]
async fn test_leaderboard_for_explicit_game() {
    let game = addr(1);
    let chain = MockChainClient::new(20_000).with_events(vec![
        event(game, addr(0xa), 10, 1, 19_000),
        event(addr(2), addr(0xa), 1_000, 1, 19_001),
    ]);

    let uri = format!("/api/leaderboard?game={}&withNames=0", hex_of(game));
    let (status, body) = get(app(chain), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"], json!("game"));
    assert!(same_address(&body["gameAddress"], game));
    assert_eq!(body["rows"][0]["score"], json!("10"));
}

#[tokio::test]
async fn test_game_leaderboard_without_signer_is_bad_request() {
    let (status, body) = get(app(MockChainClient::new(1)), "/api/leaderboard").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "ok": false, "error": "GAME scope requires server signer or ?game=" })
    );
}

#[tokio::test]
async fn test_chain_failure_is_server_error() {
    let chain = MockChainClient::new(20_000).failing_on_chunk(0);

    let (status, body) = get(app(chain), "/api/leaderboard?scope=global").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("more than 10000 results"));
}

#[tokio::test]
async fn test_undecodable_query_strings_get_json_errors() {
    let chain = MockChainClient::new(20_000);
    let (status, body) = get(app(chain), "/api/leaderboard?scope=global&limit=1&limit=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("invalid query:"));

    let uri = format!(
        "/api/get-stats?player={0}&player={0}",
        hex_of(addr(0x10))
    );
    let (status, body) = get(app(MockChainClient::new(1)), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid query:"));

    let (status, body) = get(
        app(MockChainClient::new(1)),
        "/api/check-username?wallet=a&wallet=b",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("wallet required or invalid"));
}

#[tokio::test]
async fn test_player_events_shape() {
    let player = addr(0x10);
    let chain = MockChainClient::new(9_000).with_events(vec![
        event(addr(1), player, 5, 1, 8_500),
        event(addr(1), player, 7, 2, 8_700),
    ]);

    let uri = format!("/api/player/events?player={}", hex_of(player));
    let (status, body) = get(app(chain), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fromBlock"], json!("1001"));
    assert_eq!(body["toBlock"], json!("9000"));
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["blockNumber"], json!("8700"));
    assert_eq!(rows[0]["scoreAmount"], json!("7"));
    assert_eq!(rows[0]["transactionAmount"], json!("2"));
    assert!(rows[0]["txHash"].as_str().unwrap().starts_with("0x"));
}

#[tokio::test]
async fn test_upper_case_prefix_is_accepted_for_wallet_params() {
    let wallet = addr(0x10);
    let lookup = MockIdentityLookup::new().with_name(wallet, "drifter");
    let uri = format!(
        "/api/check-username?wallet=0X{}",
        hex_of(wallet).trim_start_matches("0x").to_uppercase()
    );

    let (status, body) = get(app_with(MockChainClient::new(1), lookup), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], json!("drifter"));
}

#[tokio::test]
async fn test_player_events_rejects_bad_player() {
    let (status, body) = get(
        app(MockChainClient::new(1)),
        "/api/player/events?player=0xnothex",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "ok": false, "error": "bad player" }));
}

#[tokio::test]
async fn test_stats_shape() {
    let signer = addr(0x5e);
    let chain = MockChainClient::new(1).with_signer(signer).with_totals(
        PlayerTotals {
            score: U256::from(900),
            transactions: U256::from(9),
        },
        PlayerTotals {
            score: U256::from(400),
            transactions: U256::from(4),
        },
    );

    let uri = format!("/api/get-stats?player={}", hex_of(addr(0x10)));
    let (status, body) = get(app(chain), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!({ "score": "900", "transactions": "9" }));
    assert_eq!(body["game"]["score"], json!("400"));
    assert!(same_address(&body["game"]["gameAddress"], signer));
}

#[tokio::test]
async fn test_check_username() {
    let wallet = addr(0x10);
    let lookup = MockIdentityLookup::new().with_name(wallet, "drifter");

    let uri = format!("/api/check-username?wallet={}", hex_of(wallet));
    let (status, body) = get(app_with(MockChainClient::new(1), lookup), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "hasUsername": true, "username": "drifter" })
    );

    let (status, body) = get(
        app(MockChainClient::new(1)),
        "/api/check-username?wallet=nobody",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "ok": false, "hasUsername": false, "error": "wallet required or invalid" })
    );
}

#[tokio::test]
async fn test_nonce_then_submit() {
    let chain = MockChainClient::new(1).with_signer(addr(0x5e));
    let app = app(chain);
    let player = PrivateKeySigner::random();
    let wallet = hex_of(player.address());

    let (status, nonce) = get(app.clone(), &format!("/api/score/nonce?wallet={wallet}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nonce["wallet"], json!(wallet));
    assert_eq!(nonce["ttlMs"], json!(120_000));
    assert_eq!(nonce["nonce"].as_str().unwrap().len(), 32);

    let message = nonce["message"].as_str().unwrap().to_string();
    assert!(message.starts_with("Monad Racer Score Authorization\n"));
    assert!(message.contains(&format!("wallet={wallet}")));

    let signature = player.sign_message_sync(message.as_bytes()).unwrap();
    let submission = json!({
        "wallet": wallet,
        "scoreAmount": "1500",
        "transactionAmount": 3,
        "nonce": nonce["nonce"],
        "message": message,
        "signature": hex::encode_prefixed(signature.as_bytes()),
        "msPlayed": 45_000,
    });

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/api/score/submit",
        Some(submission.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert!(body["tx"].as_str().unwrap().starts_with("0x"));

    let (status, body) = send(app, Method::POST, "/api/score/submit", Some(submission)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("nonce already used"));
}

#[tokio::test]
async fn test_submit_without_game_role_is_forbidden() {
    let chain = MockChainClient::new(1)
        .with_signer(addr(0x5e))
        .without_game_role();
    let app = app(chain);
    let player = PrivateKeySigner::random();
    let wallet = hex_of(player.address());

    let (_, nonce) = get(app.clone(), &format!("/api/score/nonce?wallet={wallet}")).await;
    let message = nonce["message"].as_str().unwrap().to_string();
    let signature = player.sign_message_sync(message.as_bytes()).unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/score/submit",
        Some(json!({
            "wallet": wallet,
            "scoreAmount": 10,
            "nonce": nonce["nonce"],
            "message": message,
            "signature": hex::encode_prefixed(signature.as_bytes()),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Server signer has no GAME_ROLE"));
}

#[tokio::test]
async fn test_submit_rejects_unparsable_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/score/submit")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(MockChainClient::new(1)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_game_status() {
    let (status, body) = get(app(MockChainClient::new(4242)), "/game/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["latestBlock"], json!("4242"));
    assert_eq!(body["signer"], Value::Null);
    assert!(same_address(&body["contract"], CONTRACT));
    assert_eq!(body["ready"], json!(false));
}

#[tokio::test]
async fn test_register_game_with_empty_body() {
    let signer = addr(0x5e);
    let chain = MockChainClient::new(1).with_signer(signer);

    let (status, body) = send(app(chain), Method::POST, "/game/register", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Monad Racer"));
    assert_eq!(body["image"], json!(""));
    assert!(same_address(&body["game"], signer));
}

#[tokio::test]
async fn test_registration_status() {
    let chain = MockChainClient::new(1).with_signer(addr(0x5e));

    let (status, body) = get(app(chain), "/game/register").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registered"], json!(false));
    assert_eq!(body["meta"], json!({ "name": "", "image": "", "url": "" }));
}
