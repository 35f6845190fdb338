// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scanner Tests
 * Reference scenarios for the BOLA and broken authentication scanners,
 * probe outcome normalization and the secured-endpoint empty run
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use std::sync::Arc;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use luotain_scanner::config::ScannerConfig;
use luotain_scanner::http_client::{HttpClient, ProbeOutcome};
use luotain_scanner::scanners::{ApiScanner, BolaScanner, BrokenAuthScanner, ScanEngine};

fn http_client() -> Arc<HttpClient> {
    Arc::new(HttpClient::new(10).unwrap())
}

async fn mount_bola_objects(server: &MockServer, body_for_id_2: &str) {
    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("record-of-user-1"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_for_id_2))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "9999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn bola_reports_cross_object_access() {
    let mock_server = MockServer::start().await;
    mount_bola_objects(&mock_server, "record-of-user-2").await;

    let scanner = BolaScanner::new(http_client());
    let url = format!("{}/objects", mock_server.uri());
    let detections = scanner.scan(&url).await.unwrap();

    assert_eq!(detections.len(), 1);
    assert!(detections[0].details.contains("objects of other users"));
}

#[tokio::test]
async fn bola_stays_silent_on_identical_bodies() {
    let mock_server = MockServer::start().await;
    mount_bola_objects(&mock_server, "record-of-user-1").await;

    let scanner = BolaScanner::new(http_client());
    let url = format!("{}/objects", mock_server.uri());
    let detections = scanner.scan(&url).await.unwrap();

    assert!(detections.is_empty());
}

#[tokio::test]
async fn bola_stays_silent_when_sibling_id_is_denied() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("record-of-user-1"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let scanner = BolaScanner::new(http_client());
    let url = format!("{}/objects", mock_server.uri());
    let detections = scanner.scan(&url).await.unwrap();

    assert!(detections.is_empty());
}

#[tokio::test]
async fn broken_auth_reports_forged_token_acceptance() {
    let mock_server = MockServer::start().await;

    // Anonymous requests are denied; the forged bearer token gets through.
    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("Authorization", "Bearer invalidtoken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("account data"))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(403))
        .with_priority(5)
        .mount(&mock_server)
        .await;

    let scanner = BrokenAuthScanner::new(http_client());
    let url = format!("{}/account", mock_server.uri());
    let detections = scanner.scan(&url).await.unwrap();

    assert_eq!(detections.len(), 1);
    assert!(detections[0]
        .details
        .contains("allows access without proper authentication"));
}

#[tokio::test]
async fn broken_auth_reports_once_when_both_probes_pass() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open"))
        .respond_with(ResponseTemplate::new(200).set_body_string("open data"))
        .mount(&mock_server)
        .await;

    let scanner = BrokenAuthScanner::new(http_client());
    let url = format!("{}/open", mock_server.uri());
    let detections = scanner.scan(&url).await.unwrap();

    // Short-circuit after the first positive probe: one finding per run.
    assert_eq!(detections.len(), 1);
}

#[tokio::test]
async fn broken_auth_stays_silent_on_secured_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secured"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let scanner = BrokenAuthScanner::new(http_client());
    let url = format!("{}/secured", mock_server.uri());
    let detections = scanner.scan(&url).await.unwrap();

    assert!(detections.is_empty());
}

#[tokio::test]
async fn probe_client_completes_on_error_statuses() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = http_client();
    let outcome = client.get(&format!("{}/boom", mock_server.uri())).await;

    assert_eq!(
        outcome,
        ProbeOutcome::Completed {
            status: 500,
            body: "internal error".to_string()
        }
    );
}

#[tokio::test]
async fn probe_client_normalizes_refused_connections() {
    // Port 1 is never listening; the connect error must become a Failed
    // outcome, not an Err or a panic.
    let client = http_client();
    let outcome = client.get("http://127.0.0.1:1/unreachable").await;

    match outcome {
        ProbeOutcome::Failed { cause } => assert!(!cause.is_empty()),
        other => panic!("expected Failed outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn secured_endpoint_produces_an_empty_run() {
    let mock_server = MockServer::start().await;
    // Every probe from every scanner is denied.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let engine = ScanEngine::new(ScannerConfig::default()).unwrap();
    let endpoints: HashSet<String> =
        std::iter::once(format!("{}/api/users", mock_server.uri())).collect();
    let results = engine.execute_scan(&endpoints).await;

    assert_eq!(results.units_executed, 10);
    assert!(
        results.findings.is_empty(),
        "expected no findings, got {:?}",
        results.findings
    );
}
