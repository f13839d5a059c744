// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Best-effort orchestration of every assessment step.
//!
//! Each step (adapter info, ARP, DNS, rogue AP, port scan) runs in its own tokio
//! task. Blocking collaborator calls go to the blocking pool. Whatever a step does
//! (error, timeout, panic) it ends up as a value in the report: either its result
//! or an `unknown` [`DetectionResult`]. [`ScanOrchestrator::scan_all`] therefore
//! always returns a complete [`FullScan`].

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tokio::task::JoinError;

use wisp_common::config::Config;
use wisp_common::error::ProbeError;
use wisp_common::models::detection::DetectionResult;
use wisp_common::models::report::ThreatReport;
use wisp_common::models::scan::{FullScan, GatewayPortScan, PortScan, StepOutcome};
use wisp_common::models::wireless::WifiInfo;
use wisp_common::system::NetworkRepository;
use wisp_common::{debug, error, info, success, verdict};

use crate::detectors::{
    ArpSpoofDetector, DnsResponseSource, DnsSpoofDetector, HardwareResolver, PnetDnsSource,
    PnetResolver, RogueApDetector,
};
use crate::scoring::{ScoreInput, ThreatScorer};
use crate::system::SystemRepo;

/// Runs the detectors against shared, immutable collaborators.
///
/// Cloning is cheap; every clone shares the same collaborators and config.
#[derive(Clone)]
pub struct ScanOrchestrator {
    repo: Arc<dyn NetworkRepository>,
    resolver: Arc<dyn HardwareResolver>,
    dns_source: Arc<dyn DnsResponseSource>,
    cfg: Arc<Config>,
}

impl ScanOrchestrator {
    pub fn new(
        repo: Arc<dyn NetworkRepository>,
        resolver: Arc<dyn HardwareResolver>,
        dns_source: Arc<dyn DnsResponseSource>,
        cfg: Config,
    ) -> Self {
        Self {
            repo,
            resolver,
            dns_source,
            cfg: Arc::new(cfg),
        }
    }

    /// Orchestrator backed by the real platform tools and raw sockets.
    pub fn system(cfg: Config) -> Self {
        let resolver = Arc::new(PnetResolver::new(cfg.arp_timeout));
        Self::new(Arc::new(SystemRepo), resolver, Arc::new(PnetDnsSource), cfg)
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    async fn blocking<T, F>(&self, step: &'static str, f: F) -> Result<T, ProbeError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn NetworkRepository) -> Result<T, ProbeError> + Send + 'static,
    {
        let repo: Arc<dyn NetworkRepository> = Arc::clone(&self.repo);
        match tokio::task::spawn_blocking(move || f(repo.as_ref())).await {
            Ok(result) => result,
            Err(e) => Err(ProbeError::Other(anyhow!("{step} task failed: {e}"))),
        }
    }

    pub async fn gateway_ip(&self) -> Result<Option<Ipv4Addr>, ProbeError> {
        self.blocking("gateway lookup", |repo| repo.gateway_ip()).await
    }

    pub async fn wifi_info(&self) -> StepOutcome<WifiInfo> {
        let info = self
            .blocking("adapter info", |repo| repo.wireless_adapter_info())
            .await;
        match &info {
            Ok(wifi) => success!("Associated with {}", wifi.ssid),
            Err(e) => info!("Wireless adapter info unavailable: {e}"),
        }
        StepOutcome::from_result(info)
    }

    pub async fn arp_scan(&self) -> DetectionResult {
        let result = match self.gateway_ip().await {
            Ok(gateway) => {
                ArpSpoofDetector::new(Arc::clone(&self.resolver), self.cfg.arp_sample_gap)
                    .detect(gateway)
                    .await
            }
            Err(e) => DetectionResult::from_error(&e),
        };
        verdict!("arp", result);
        result
    }

    /// Listens for DNS responses for `window`, clamped to the supported range.
    pub async fn dns_scan(&self, window: Duration) -> DetectionResult {
        debug!(verbosity = 1, "Listening for DNS responses for {}s", window.as_secs());
        let result = DnsSpoofDetector::new(Arc::clone(&self.dns_source))
            .monitor(window)
            .await;
        verdict!("dns", result);
        result
    }

    pub async fn rogue_ap_scan(&self) -> DetectionResult {
        let snapshot = self
            .blocking("wireless scan", |repo| repo.scan_wireless_networks())
            .await;
        let result = RogueApDetector.detect(snapshot);
        verdict!("rogue_ap", result);
        result
    }

    /// Scans the default gateway. Only a missing gateway is an error; a failed
    /// or timed out scan is reported inside `scan_result`.
    pub async fn port_scan(&self) -> Result<GatewayPortScan, ProbeError> {
        let ip: Ipv4Addr = self.gateway_ip().await?.ok_or(ProbeError::NoGatewayFound)?;
        info!("Scanning open ports on {ip}");

        let limit: Duration = self.cfg.port_scan_timeout;
        let scan: Result<PortScan, ProbeError> = tokio::time::timeout(
            limit,
            self.blocking("port scan", move |repo| repo.run_port_scan(ip)),
        )
        .await
        .unwrap_or(Err(ProbeError::ProbeTimeout {
            probe: "port scan",
            after: limit,
        }));

        match &scan {
            Ok(ports) => success!("{} open ports on {ip}", ports.open_ports.len()),
            Err(e) => error!("Port scan of {ip} failed: {e}"),
        }

        Ok(GatewayPortScan {
            ip,
            scan_result: StepOutcome::from_result(scan),
        })
    }

    /// Runs every step concurrently and scores the outcome. Never fails.
    pub async fn scan_all(&self) -> FullScan {
        let window: Duration = self.cfg.bounded_dns_window();

        let this = self.clone();
        let wifi_task = tokio::spawn(async move { this.wifi_info().await });
        let this = self.clone();
        let arp_task = tokio::spawn(async move { this.arp_scan().await });
        let this = self.clone();
        let dns_task = tokio::spawn(async move { this.dns_scan(window).await });
        let this = self.clone();
        let rogue_task = tokio::spawn(async move { this.rogue_ap_scan().await });
        let this = self.clone();
        let ports_task = tokio::spawn(async move { this.port_scan().await });

        let wifi_info: StepOutcome<WifiInfo> = wifi_task
            .await
            .unwrap_or_else(|e| StepOutcome::Degraded(step_panicked("wifi_info", &e)));
        let arp_spoofing: DetectionResult = arp_task
            .await
            .unwrap_or_else(|e| step_panicked("arp_spoofing", &e));
        let dns_spoofing: DetectionResult = dns_task
            .await
            .unwrap_or_else(|e| step_panicked("dns_spoofing", &e));
        let rogue_ap: DetectionResult = rogue_task
            .await
            .unwrap_or_else(|e| step_panicked("rogue_ap", &e));
        let open_ports: StepOutcome<PortScan> = match ports_task.await {
            Ok(Ok(gateway)) => gateway.into_outcome(),
            Ok(Err(e)) => StepOutcome::Degraded(DetectionResult::from_error(&e)),
            Err(e) => StepOutcome::Degraded(step_panicked("open_ports", &e)),
        };

        let ports: &[u16] = open_ports
            .completed()
            .map(|scan| scan.open_ports.as_slice())
            .unwrap_or(&[]);
        let threat_score: ThreatReport = ThreatScorer.score(&ScoreInput::from_results(
            &arp_spoofing,
            &dns_spoofing,
            &rogue_ap,
            ports,
        ));
        info!(
            "Threat score {} ({})",
            threat_score.score, threat_score.level
        );

        FullScan {
            wifi_info,
            arp_spoofing,
            dns_spoofing,
            rogue_ap,
            open_ports,
            threat_score,
        }
    }
}

fn step_panicked(step: &str, err: &JoinError) -> DetectionResult {
    error!("{step} step failed: {err}");
    DetectionResult::unknown(format!("{step} step failed: {err}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
