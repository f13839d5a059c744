// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Single-detector subcommands. Each runs one bounded pass and prints it.

use std::time::Duration;

use wisp_common::config::Config;
use wisp_common::models::detection::DetectionResult;
use wisp_common::models::scan::{GatewayPortScan, PortScan, StepOutcome};
use wisp_common::models::wireless::WifiInfo;
use wisp_core::scanner::ScanOrchestrator;

use crate::terminal::{format, print, spinner::spin_while};

fn finish(title: &str, result: &DetectionResult, cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        return print::json(result);
    }
    print::detection(title, result, cfg);
    Ok(())
}

pub async fn wifi(cfg: &Config) -> anyhow::Result<()> {
    let scanner = ScanOrchestrator::system(cfg.clone());
    let info: StepOutcome<WifiInfo> =
        spin_while(cfg, "Reading wireless adapter", scanner.wifi_info()).await;

    if cfg.json {
        return print::json(&info);
    }
    match &info {
        StepOutcome::Completed(wifi) => {
            print::header("wireless network", cfg);
            print::as_tree(&format::wifi_to_details(wifi, cfg.redact));
        }
        StepOutcome::Degraded(result) => print::detection("wireless network", result, cfg),
    }
    Ok(())
}

pub async fn arp(cfg: &Config) -> anyhow::Result<()> {
    let scanner = ScanOrchestrator::system(cfg.clone());
    let result = spin_while(cfg, "Sampling the gateway MAC", scanner.arp_scan()).await;
    finish("arp spoofing", &result, cfg)
}

pub async fn dns(cfg: &Config) -> anyhow::Result<()> {
    let window: Duration = cfg.bounded_dns_window();
    let scanner = ScanOrchestrator::system(cfg.clone());
    let result = spin_while(cfg, "Watching DNS responses", scanner.dns_scan(window)).await;
    finish("dns spoofing", &result, cfg)
}

pub async fn rogue_ap(cfg: &Config) -> anyhow::Result<()> {
    let scanner = ScanOrchestrator::system(cfg.clone());
    let result = spin_while(cfg, "Scanning nearby networks", scanner.rogue_ap_scan()).await;
    finish("rogue access points", &result, cfg)
}

pub async fn ports(cfg: &Config) -> anyhow::Result<()> {
    let scanner = ScanOrchestrator::system(cfg.clone());
    let scan: GatewayPortScan =
        spin_while(cfg, "Scanning the gateway", scanner.port_scan()).await?;

    if cfg.json {
        return print::json(&scan);
    }
    print_port_scan(&scan, cfg);
    Ok(())
}

pub fn print_port_scan(scan: &GatewayPortScan, cfg: &Config) {
    print_ports(&format!("open ports on {}", scan.ip), &scan.scan_result, cfg);
}

/// Prints a port scan outcome under `title`, or one raw line with `-qq`.
pub fn print_ports(title: &str, outcome: &StepOutcome<PortScan>, cfg: &Config) {
    match outcome {
        StepOutcome::Completed(ports) => {
            if cfg.quiet > 1 {
                let list: Vec<String> = ports.open_ports.iter().map(u16::to_string).collect();
                crate::wprint!("open_ports {}", list.join(","));
                return;
            }
            print::header(title, cfg);
            print::as_tree(&format::ports_to_details(ports));
        }
        StepOutcome::Degraded(result) => print::detection(title, result, cfg),
    }
}
