// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use pnet::util::MacAddr;
use wisp_common::config::Config;
use wisp_common::error::ProbeError;
use wisp_common::models::detection::Status;
use wisp_common::models::report::ThreatLevel;
use wisp_common::models::scan::{FullScan, StepOutcome};
use wisp_core::detectors::DnsAnswer;
use wisp_core::detectors::dns::ReplaySource;
use wisp_core::scanner::ScanOrchestrator;

use crate::fakes::{QueuedResolver, ScriptedNetwork};

const ROUTER_MAC: MacAddr = MacAddr(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);
const ATTACKER_MAC: MacAddr = MacAddr(0xde, 0xad, 0xbe, 0xef, 0x00, 0x01);

fn test_config() -> Config {
    Config {
        arp_sample_gap: Duration::ZERO,
        port_scan_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

fn nmap_missing() -> ProbeError {
    ProbeError::ToolUnavailable("nmap".into())
}

fn orchestrator(
    network: ScriptedNetwork,
    resolver: QueuedResolver,
    answers: Vec<DnsAnswer>,
) -> ScanOrchestrator {
    ScanOrchestrator::new(
        Arc::new(network),
        Arc::new(resolver),
        Arc::new(ReplaySource::new(answers)),
        test_config(),
    )
}

#[tokio::test]
async fn quiet_network_scores_only_its_open_ports() {
    let scanner = orchestrator(
        ScriptedNetwork::default(),
        QueuedResolver::stable(ROUTER_MAC),
        vec![],
    );
    let report: FullScan = scanner.scan_all().await;

    assert_eq!(report.arp_spoofing.status(), Status::Safe);
    assert_eq!(report.dns_spoofing.status(), Status::Safe);
    assert_eq!(report.rogue_ap.status(), Status::Safe);
    // 21 (high) + 80 (medium) + 9999 (other)
    assert_eq!(report.threat_score.score, 35);
    assert_eq!(report.threat_score.level, ThreatLevel::Low);
}

#[tokio::test]
async fn failing_port_scanner_still_yields_a_full_report() {
    let network = ScriptedNetwork {
        port_scan: Err(nmap_missing),
        ..Default::default()
    };
    let scanner = orchestrator(network, QueuedResolver::stable(ROUTER_MAC), vec![]);
    let report = scanner.scan_all().await;

    let value = serde_json::to_value(&report).unwrap();
    for key in [
        "wifi_info",
        "arp_spoofing",
        "dns_spoofing",
        "rogue_ap",
        "open_ports",
        "threat_score",
    ] {
        assert!(!value[key].is_null(), "{key} missing from report");
    }
    assert_eq!(value["open_ports"]["status"], "unknown");
    assert!(value["open_ports"].get("ip").is_none());
    assert_eq!(report.threat_score.score, 0);
}

#[tokio::test]
async fn hostile_network_is_rated_high() {
    let network = ScriptedNetwork {
        radios: vec![
            ("CafeWiFi".into(), "aa:bb:cc:00:00:01".into()),
            ("CafeWiFi".into(), "de:ad:be:ef:00:01".into()),
        ],
        ..Default::default()
    };
    let answers = vec![
        DnsAnswer::new("bank.example", "203.0.113.10".parse().unwrap()),
        DnsAnswer::new("bank.example", "10.0.0.66".parse().unwrap()),
    ];
    let scanner = orchestrator(
        network,
        QueuedResolver::new(vec![ROUTER_MAC, ATTACKER_MAC]),
        answers,
    );
    let report = scanner.scan_all().await;

    assert_eq!(report.arp_spoofing.status(), Status::Threat);
    assert_eq!(report.dns_spoofing.status(), Status::Warning);
    assert_eq!(report.rogue_ap.status(), Status::Warning);
    assert_eq!(report.threat_score.score, 40 + 30 + 30 + 35);
    assert_eq!(report.threat_score.level, ThreatLevel::High);
    assert_eq!(
        report.threat_score.reasons.first().map(String::as_str),
        Some("ARP spoofing activity detected.")
    );
}

#[tokio::test]
async fn gateway_that_stops_answering_is_a_warning() {
    let scanner = orchestrator(
        ScriptedNetwork::default(),
        QueuedResolver::new(vec![ROUTER_MAC]),
        vec![],
    );
    let result = scanner.arp_scan().await;
    assert_eq!(result.status(), Status::Warning);
}

#[tokio::test]
async fn disconnected_host_degrades_every_gateway_step() {
    let network = ScriptedNetwork {
        gateway: None,
        ssid: None,
        ..Default::default()
    };
    let scanner = orchestrator(network, QueuedResolver::new(vec![]), vec![]);
    let report = scanner.scan_all().await;

    assert!(matches!(report.wifi_info, StepOutcome::Degraded(_)));
    assert!(matches!(report.open_ports, StepOutcome::Degraded(_)));
    assert_eq!(report.arp_spoofing.status(), Status::Unknown);
    assert_eq!(report.threat_score.score, 0);
}
