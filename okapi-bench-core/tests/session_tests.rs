// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Login exchange and header scoping against a mock Okapi gateway.

use okapi_bench_core::{OkapiClient, OkapiConfig, OkapiError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> OkapiConfig {
    let uri = server.uri();
    OkapiConfig::from_lookup(|key| match key {
        "OKAPI_URL" => Some(uri.clone()),
        "TENANT" => Some("diku".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_login_scopes_later_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .and(header("x-okapi-tenant", "diku"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "username": "folio",
            "password": "folio",
            "tenant": "diku",
        })))
        .respond_with(ResponseTemplate::new(201).insert_header("x-okapi-token", "secret-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/entity-types"))
        .and(header("x-okapi-tenant", "diku"))
        .and(header("x-okapi-token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OkapiClient::login(&config_for(&server)).await.unwrap();
    let response = client.get("entity-types").send().await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_missing_token_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let err = OkapiClient::login(&config_for(&server)).await.unwrap_err();
    assert!(matches!(err, OkapiError::MissingToken { .. }));
}

#[tokio::test]
async fn test_rejected_login_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authn/login"))
        .respond_with(ResponseTemplate::new(422).insert_header("x-okapi-token", "ignored"))
        .mount(&server)
        .await;

    let err = OkapiClient::login(&config_for(&server)).await.unwrap_err();
    assert!(matches!(err, OkapiError::Login { .. }));
}
