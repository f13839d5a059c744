// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! HTTP error mapping.
//!
//! Handler failures become `{"error": ...}` bodies. Errors produced by the
//! framework itself (unknown route, wrong method, ...) are rewritten to
//! `{"error", "code", "name"}` so every non-2xx response is JSON.

use std::any::Any;

use axum::Json;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use wisp_common::error::ProbeError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No JSON body received")]
    MalformedRequest,

    #[error("Could not find default gateway IP")]
    NoGatewayFound,

    #[error("{0}")]
    Internal(String),
}

impl From<ProbeError> for AppError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::NoGatewayFound => AppError::NoGatewayFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status: StatusCode = match &self {
            AppError::MalformedRequest => StatusCode::BAD_REQUEST,
            AppError::NoGatewayFound => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(msg) => {
                wisp_common::error!("Internal error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn description(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => {
            "The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again."
        }
        StatusCode::METHOD_NOT_ALLOWED => "The method is not allowed for the requested URL.",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            "The server does not support the media type transmitted in the request."
        }
        StatusCode::PAYLOAD_TOO_LARGE => "The data value transmitted exceeds the capacity limit.",
        s => s.canonical_reason().unwrap_or("Unexpected HTTP error"),
    }
}

/// Body for an error the framework raised before any handler ran.
pub fn framework_error(status: StatusCode) -> Response {
    let body = json!({
        "error": description(status),
        "code": status.as_u16(),
        "name": status.canonical_reason().unwrap_or("Unknown"),
    });
    (status, Json(body)).into_response()
}

pub async fn not_found() -> Response {
    framework_error(StatusCode::NOT_FOUND)
}

/// Rewrites bodiless or plain-text error responses into the JSON error shape.
pub async fn json_errors(response: Response) -> Response {
    let status: StatusCode = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let is_json: bool = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return response;
    }
    framework_error(status)
}

/// Turns a handler panic into a 500 with the panic message.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message: String = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    wisp_common::error!("Handler panicked: {message}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn malformed_request_is_400() {
        let response = AppError::MalformedRequest.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "No JSON body received"})
        );
    }

    #[test]
    fn missing_gateway_maps_to_its_own_variant() {
        let err: AppError = ProbeError::NoGatewayFound.into();
        assert!(matches!(err, AppError::NoGatewayFound));
        let err: AppError = ProbeError::ToolUnavailable("nmap".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn framework_errors_carry_code_and_name() {
        let value = body_json(framework_error(StatusCode::METHOD_NOT_ALLOWED)).await;
        assert_eq!(value["code"], 405);
        assert_eq!(value["name"], "Method Not Allowed");
        assert!(value["error"].as_str().unwrap().contains("not allowed"));
    }

    #[tokio::test]
    async fn json_error_bodies_are_left_alone() {
        let original = AppError::NoGatewayFound.into_response();
        let value = body_json(json_errors(original).await).await;
        assert_eq!(value, json!({"error": "Could not find default gateway IP"}));
    }

    #[tokio::test]
    async fn bodiless_errors_are_rewritten() {
        let bare = StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
        let value = body_json(json_errors(bare).await).await;
        assert_eq!(value["code"], 415);
    }

    #[tokio::test]
    async fn panic_payload_becomes_the_message() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "boom"}));
    }
}
