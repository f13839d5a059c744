// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::IpAddr;

use colored::*;
use pnet::util::MacAddr;
use wisp_common::models::detection::{DetectionResult, Evidence, Status};
use wisp_common::models::ports::{PortRisk, classify};
use wisp_common::models::report::ThreatLevel;
use wisp_common::models::scan::PortScan;
use wisp_common::models::wireless::WifiInfo;
use wisp_common::utils::redact;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

pub fn status_label(status: Status) -> ColoredString {
    let color = match status {
        Status::Safe => colors::SAFE,
        Status::Warning => colors::WARNING,
        Status::Threat => colors::THREAT,
        Status::Unknown => colors::UNKNOWN,
    };
    status.as_str().to_uppercase().color(color).bold()
}

pub fn level_label(level: ThreatLevel) -> ColoredString {
    let color = match level {
        ThreatLevel::Low => colors::SAFE,
        ThreatLevel::Medium => colors::WARNING,
        ThreatLevel::High => colors::THREAT,
    };
    level.to_string().to_uppercase().color(color).bold()
}

pub fn mac(mac: &MacAddr, redact: bool) -> ColoredString {
    let text: String = if redact {
        redact::mac_addr(mac)
    } else {
        mac.to_string()
    };
    text.color(colors::MAC_ADDR)
}

pub fn bssid(bssid: &str, redact: bool) -> String {
    if redact {
        redact::bssid(bssid)
    } else {
        bssid.to_string()
    }
}

pub fn ssid(ssid: &str, redact: bool) -> ColoredString {
    let text: String = if redact {
        redact::ssid(ssid)
    } else {
        ssid.to_string()
    };
    text.color(colors::SSID)
}

fn ip(ip: impl Into<IpAddr>) -> ColoredString {
    ip.into().to_string().color(colors::IPV4_ADDR)
}

fn ip_list(ips: &[IpAddr]) -> String {
    ips.iter()
        .map(IpAddr::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// Key/value rows for one detector verdict, evidence included.
pub fn result_to_details(result: &DetectionResult, redact: bool) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        detail("Status", status_label(result.status())),
        detail("Message", result.message().color(colors::TEXT_DEFAULT)),
    ];

    match result.evidence() {
        Some(Evidence::Gateway(binding)) => {
            details.push(detail("Gateway", ip(binding.gateway_ip)));
            details.push(detail("MAC", mac(&binding.gateway_mac, redact)));
            if let Some(vendor) = &binding.vendor {
                details.push(detail("Vendor", vendor.as_str().color(colors::MAC_ADDR)));
            }
        }
        Some(Evidence::MacMismatch(mismatch)) => {
            details.push(detail("Gateway", ip(mismatch.gateway_ip)));
            details.push(detail("Expected", mac(&mismatch.expected_mac, redact)));
            details.push(detail("Received", mac(&mismatch.received_mac, redact)));
        }
        Some(Evidence::DnsAlerts(alerts)) => {
            for alert in alerts {
                let line = format!(
                    "{} [{}] -> {}",
                    alert.domain,
                    ip_list(&alert.old_ips),
                    alert.new_ip
                );
                details.push(detail("Domain", line.color(colors::WARNING)));
            }
        }
        Some(Evidence::RogueAps(aps)) => {
            for ap in aps {
                let bssids: Vec<String> = ap.bssids.iter().map(|b| bssid(b, redact)).collect();
                let line = format!(
                    "{} ({} BSSIDs: {})",
                    ssid(&ap.ssid, redact),
                    ap.count,
                    bssids.join(", ")
                );
                details.push(detail("SSID", line.normal()));
            }
        }
        None => {}
    }

    if let Some(hint) = result.recommendation() {
        details.push(detail("Advice", hint.italic()));
    }

    details
}

pub fn wifi_to_details(info: &WifiInfo, redact: bool) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![detail("SSID", ssid(&info.ssid, redact))];
    if let Some(b) = &info.bssid {
        details.push(detail("BSSID", bssid(b, redact).color(colors::MAC_ADDR)));
    }
    let optional = [
        ("Signal", &info.signal),
        ("Channel", &info.channel),
        ("Auth", &info.authentication),
        ("Radio", &info.radio_type),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            details.push(detail(key, value.as_str().color(colors::TEXT_DEFAULT)));
        }
    }
    details
}

fn risk_label(port: u16) -> ColoredString {
    match classify(port) {
        PortRisk::High => "high risk".color(colors::THREAT),
        PortRisk::Medium => "medium risk".color(colors::WARNING),
        PortRisk::Other => "open".color(colors::TEXT_DEFAULT),
    }
}

pub fn ports_to_details(scan: &PortScan) -> Vec<Detail> {
    if scan.open_ports.is_empty() {
        return vec![detail("Ports", "none open".color(colors::SAFE))];
    }
    scan.open_ports
        .iter()
        .map(|port| (port.to_string(), risk_label(*port)))
        .collect()
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
    use std::net::Ipv4Addr;
    use wisp_common::models::detection::MacMismatch;

    fn keys(details: &[Detail]) -> Vec<&str> {
        details.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn mismatch_shows_both_addresses_redacted() {
        let result = DetectionResult::threat("ARP spoofing detected!").with_evidence(
            Evidence::MacMismatch(MacMismatch {
                gateway_ip: Ipv4Addr::new(192, 168, 1, 1),
                expected_mac: MacAddr::new(0xaa, 0xbb, 0xcc, 1, 2, 3),
                received_mac: MacAddr::new(0x11, 0x22, 0x33, 4, 5, 6),
            }),
        );
        let details = result_to_details(&result, true);
        assert_eq!(
            keys(&details),
            vec!["Status", "Message", "Gateway", "Expected", "Received"]
        );
        assert!(details[3].1.to_string().contains("aa:bb:cc:XX:XX:XX"));
    }

    #[test]
    fn recommendation_comes_last() {
        let result = DetectionResult::unknown("no gateway").with_recommendation("connect first");
        let details = result_to_details(&result, false);
        assert_eq!(keys(&details), vec!["Status", "Message", "Advice"]);
    }

    #[test]
    fn wifi_skips_missing_fields() {
        let info = WifiInfo {
            ssid: "CafeWiFi".into(),
            signal: Some("76%".into()),
            ..Default::default()
        };
        assert_eq!(keys(&wifi_to_details(&info, false)), vec!["SSID", "Signal"]);
    }

    #[test]
    fn empty_port_scan_has_a_single_row() {
        let scan = PortScan::default();
        assert_eq!(keys(&ports_to_details(&scan)), vec!["Ports"]);

        let scan = PortScan {
            open_ports: vec![21, 8080],
            raw: String::new(),
        };
        assert_eq!(keys(&ports_to_details(&scan)), vec!["21", "8080"]);
    }
}
