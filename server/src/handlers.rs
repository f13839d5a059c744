// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Value, json};

use wisp_common::config::DEFAULT_DNS_WINDOW;
use wisp_common::models::detection::DetectionResult;
use wisp_common::models::report::ThreatReport;
use wisp_common::models::scan::{FullScan, GatewayPortScan, StepOutcome};
use wisp_common::models::wireless::WifiInfo;
use wisp_core::scoring::ThreatScorer;

use crate::AppState;
use crate::error::{AppError, AppResult};

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Backend is running!" }))
}

pub async fn wifi(State(state): State<AppState>) -> Json<StepOutcome<WifiInfo>> {
    Json(state.scanner.wifi_info().await)
}

pub async fn arp(State(state): State<AppState>) -> Json<DetectionResult> {
    Json(state.scanner.arp_scan().await)
}

pub async fn dns(State(state): State<AppState>) -> Json<DetectionResult> {
    Json(state.scanner.dns_scan(DEFAULT_DNS_WINDOW).await)
}

pub async fn rogue_ap(State(state): State<AppState>) -> Json<DetectionResult> {
    Json(state.scanner.rogue_ap_scan().await)
}

pub async fn open_ports(State(state): State<AppState>) -> AppResult<Json<GatewayPortScan>> {
    Ok(Json(state.scanner.port_scan().await?))
}

/// Scores a client-assembled report. Anything but a JSON object is rejected.
pub async fn threat_score(body: Bytes) -> AppResult<Json<ThreatReport>> {
    let value: Value = serde_json::from_slice(&body).map_err(|_| AppError::MalformedRequest)?;
    if !value.is_object() {
        return Err(AppError::MalformedRequest);
    }
    Ok(Json(ThreatScorer.score_json(&value)))
}

pub async fn all(State(state): State<AppState>) -> Json<FullScan> {
    Json(state.scanner.scan_all().await)
}
