// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! HTTP surface over the scan orchestrator.
//!
//! | Route                    | Result                             |
//! |--------------------------|------------------------------------|
//! | `GET /`                  | liveness message                   |
//! | `GET /scan/wifi`         | adapter info                       |
//! | `GET /scan/arp`          | ARP spoofing check                 |
//! | `GET /scan/dns`          | DNS spoofing check (2s window)     |
//! | `GET /scan/rogue_ap`     | rogue access point check           |
//! | `GET /scan/open_ports`   | gateway port scan                  |
//! | `POST /scan/threat_score`| score a client-supplied report     |
//! | `GET /scan/all`          | every check plus the threat score  |

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use axum::middleware::map_response;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use wisp_common::config::Config;
use wisp_common::success;
use wisp_core::scanner::ScanOrchestrator;

pub mod error;
mod handlers;

pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub scanner: ScanOrchestrator,
}

impl AppState {
    pub fn new(scanner: ScanOrchestrator) -> Self {
        Self { scanner }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/scan/wifi", get(handlers::wifi))
        .route("/scan/arp", get(handlers::arp))
        .route("/scan/dns", get(handlers::dns))
        .route("/scan/rogue_ap", get(handlers::rogue_ap))
        .route("/scan/open_ports", get(handlers::open_ports))
        .route("/scan/threat_score", post(handlers::threat_score))
        .route("/scan/all", get(handlers::all))
        .fallback(error::not_found)
        .layer(map_response(error::json_errors))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds `cfg.bind` and serves until the process is stopped.
pub async fn serve(cfg: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg.bind;
    let app: Router = router(AppState::new(ScanOrchestrator::system(cfg)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    success!("Listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("HTTP server stopped unexpectedly")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
