// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pnet::util::MacAddr;
use serde_json::{Value, json};
use tower::ServiceExt;
use wisp_common::config::Config;
use wisp_common::error::ProbeError;
use wisp_core::detectors::dns::ReplaySource;
use wisp_core::scanner::ScanOrchestrator;
use wisp_server::{AppState, router};

use crate::fakes::{QueuedResolver, ScriptedNetwork};

fn scan_timed_out() -> ProbeError {
    ProbeError::ProbeTimeout {
        probe: "port scan",
        after: Duration::from_secs(60),
    }
}

fn app(network: ScriptedNetwork) -> Router {
    let cfg = Config {
        arp_sample_gap: Duration::ZERO,
        ..Config::default()
    };
    let scanner = ScanOrchestrator::new(
        Arc::new(network),
        Arc::new(QueuedResolver::stable(MacAddr(0, 0x11, 0x22, 0x33, 0x44, 0x55))),
        Arc::new(ReplaySource::default()),
        cfg,
    );
    router(AppState::new(scanner))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

#[tokio::test]
async fn all_scan_with_broken_port_scanner_is_200() {
    let network = ScriptedNetwork {
        port_scan: Err(scan_timed_out),
        ..Default::default()
    };
    let (status, body) = get(app(network), "/scan/all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["open_ports"]["status"], "unknown");
    assert_eq!(body["arp_spoofing"]["status"], "safe");
    assert_eq!(body["wifi_info"]["ssid"], "CafeWiFi");
    assert_eq!(body["threat_score"]["threat_level"], "Low");
}

#[tokio::test]
async fn open_ports_reports_the_gateway_and_parsed_ports() {
    let (status, body) = get(app(ScriptedNetwork::default()), "/scan/open_ports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ip"], "192.168.1.1");
    assert_eq!(body["scan_result"]["open_ports"], json!([21, 80, 9999]));
}

#[tokio::test]
async fn open_ports_without_gateway_is_500() {
    let network = ScriptedNetwork {
        gateway: None,
        ..Default::default()
    };
    let (status, body) = get(app(network), "/scan/open_ports").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Could not find default gateway IP");
}

#[tokio::test]
async fn rogue_ap_lists_the_duplicated_ssid() {
    let network = ScriptedNetwork {
        radios: vec![
            ("CafeWiFi".into(), "aa:bb:cc:00:00:01".into()),
            ("CafeWiFi".into(), "aa:bb:cc:00:00:02".into()),
        ],
        ..Default::default()
    };
    let (status, body) = get(app(network), "/scan/rogue_ap").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "warning");
    assert_eq!(body["evidence"][0]["ssid"], "CafeWiFi");
    assert_eq!(body["evidence"][0]["count"], 2);
}

#[tokio::test]
async fn threat_score_accepts_raw_scanner_text() {
    let payload = json!({
        "arp_spoofing": {"status": "Safe"},
        "open_ports": {"raw": crate::fakes::NMAP_OUTPUT},
    });
    let request = Request::post("/scan/threat_score")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app(ScriptedNetwork::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 35);
    assert_eq!(
        body["reasons"],
        json!([
            "High-risk open ports: 21",
            "Medium-risk open ports: 80",
            "Other open ports: 9999"
        ])
    );
}

#[tokio::test]
async fn threat_score_without_body_is_400() {
    let request = Request::post("/scan/threat_score")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(ScriptedNetwork::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No JSON body received"}));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app(ScriptedNetwork::default()).oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
