// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Threat Scoring
//!
//! Heuristic aggregation of detector verdicts and open ports into a single
//! [`ThreatReport`].
//!
//! ## Inputs
//! Detector results arrive either as full result objects (`{"status": "threat", ...}`)
//! or as bare status strings. Ports arrive as a plain list, as an object holding a
//! `ports`/`open_ports` list, or as raw port scanner text under `raw`/`output`.
//! Normalization is total: anything unrecognised counts as "not detected" or
//! "no port", it never fails the request.
//!
//! ## Weights
//! | Signal                          | Points |
//! |---------------------------------|--------|
//! | ARP spoofing                    | 40     |
//! | DNS spoofing                    | 30     |
//! | Rogue AP                        | 30     |
//! | per high-risk port (21, 23)     | 20     |
//! | per medium-risk port (80, 443, 1025) | 10 |
//! | per other port                  | 5      |

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use wisp_common::models::detection::DetectionResult;
use wisp_common::models::ports::PortBuckets;
use wisp_common::models::report::ThreatReport;

pub const ARP_WEIGHT: u32 = 40;
pub const DNS_WEIGHT: u32 = 30;
pub const ROGUE_AP_WEIGHT: u32 = 30;
pub const HIGH_RISK_PORT_WEIGHT: u32 = 20;
pub const MEDIUM_RISK_PORT_WEIGHT: u32 = 10;
pub const OTHER_PORT_WEIGHT: u32 = 5;

const DETECTED_TOKENS: [&str; 3] = ["detected", "warning", "threat"];

static OPEN_PORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)/(tcp|udp)\s+open\b").expect("static open-port pattern is valid")
});

/// Normalized scorer input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreInput {
    pub arp_spoofing: bool,
    pub dns_spoofing: bool,
    pub rogue_ap: bool,
    pub ports: PortBuckets,
}

impl ScoreInput {
    /// Normalizes a client supplied object. Missing keys count as not detected.
    pub fn from_json(body: &Value) -> Self {
        Self {
            arp_spoofing: body.get("arp_spoofing").is_some_and(is_detected),
            dns_spoofing: body.get("dns_spoofing").is_some_and(is_detected),
            rogue_ap: body.get("rogue_ap").is_some_and(is_detected),
            ports: body
                .get("open_ports")
                .map(extract_ports)
                .unwrap_or_default()
                .into_iter()
                .collect(),
        }
    }

    /// Builds the input straight from typed detector results.
    pub fn from_results(
        arp: &DetectionResult,
        dns: &DetectionResult,
        rogue_ap: &DetectionResult,
        open_ports: &[u16],
    ) -> Self {
        Self {
            arp_spoofing: arp.is_detected(),
            dns_spoofing: dns.is_detected(),
            rogue_ap: rogue_ap.is_detected(),
            ports: open_ports.iter().copied().collect(),
        }
    }
}

/// True for `{"status": "<token>"}` or a bare `"<token>"`, token being one of
/// `detected`, `warning`, `threat` in any case.
pub fn is_detected(value: &Value) -> bool {
    let status: Option<&str> = match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("status").and_then(Value::as_str),
        _ => None,
    };
    status.is_some_and(|s| {
        let s = s.trim();
        DETECTED_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(s))
    })
}

/// Extracts distinct open ports from any of the accepted shapes.
///
/// Objects are searched in order: `ports`, `open_ports`, `raw`, `output`, and a
/// nested `scan_result` as returned by the port scan route.
pub fn extract_ports(value: &Value) -> BTreeSet<u16> {
    match value {
        Value::Array(items) => items.iter().filter_map(port_from_value).collect(),
        Value::String(text) => parse_raw_ports(text),
        Value::Object(map) => {
            if let Some(list @ Value::Array(_)) = map.get("ports").or_else(|| map.get("open_ports")) {
                return extract_ports(list);
            }
            let scanner_text = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
            };
            if let Some(text) = scanner_text("raw").or_else(|| scanner_text("output")) {
                return parse_raw_ports(text);
            }
            map.get("scan_result").map(extract_ports).unwrap_or_default()
        }
        _ => BTreeSet::new(),
    }
}

/// Parses port scanner text, one `<port>/<tcp|udp> open ...` entry per line.
pub fn parse_raw_ports(text: &str) -> BTreeSet<u16> {
    text.lines()
        .filter_map(|line| OPEN_PORT_LINE.captures(line.trim()))
        .filter_map(|caps| caps[1].parse::<u16>().ok())
        .collect()
}

fn port_from_value(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreatScorer;

impl ThreatScorer {
    /// Pure and deterministic: the same input always yields the same report.
    pub fn score(&self, input: &ScoreInput) -> ThreatReport {
        let mut score: u32 = 0;
        let mut reasons: Vec<String> = Vec::new();

        if input.arp_spoofing {
            score += ARP_WEIGHT;
            reasons.push("ARP spoofing activity detected.".to_string());
        }
        if input.dns_spoofing {
            score += DNS_WEIGHT;
            reasons.push("DNS spoofing activity detected.".to_string());
        }

        let tiers = [
            (&input.ports.high, HIGH_RISK_PORT_WEIGHT, "High-risk"),
            (&input.ports.medium, MEDIUM_RISK_PORT_WEIGHT, "Medium-risk"),
            (&input.ports.other, OTHER_PORT_WEIGHT, "Other"),
        ];
        for (ports, weight, label) in tiers {
            if ports.is_empty() {
                continue;
            }
            score += weight * ports.len() as u32;
            reasons.push(format!("{label} open ports: {}", join_ports(ports)));
        }

        if input.rogue_ap {
            score += ROGUE_AP_WEIGHT;
            reasons.push("Possible rogue access point detected.".to_string());
        }

        ThreatReport::new(score, reasons)
    }

    pub fn score_json(&self, body: &Value) -> ThreatReport {
        self.score(&ScoreInput::from_json(body))
    }
}

fn join_ports(ports: &BTreeSet<u16>) -> String {
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
