// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Composite Scan Model
//!
//! Shapes produced by the orchestrator when it runs more than one step.
//! Each step is a [`StepOutcome`]: either the step's own payload or, if it
//! failed, an `unknown` [`DetectionResult`] describing why.

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::error::ProbeError;
use crate::models::detection::DetectionResult;
use crate::models::report::ThreatReport;
use crate::models::wireless::WifiInfo;

/// Output of the external port scanner for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortScan {
    pub open_ports: Vec<u16>,
    /// Scanner output as printed, kept so clients can re-parse it.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepOutcome<T> {
    Completed(T),
    Degraded(DetectionResult),
}

impl<T> StepOutcome<T> {
    pub fn from_result(result: Result<T, ProbeError>) -> Self {
        match result {
            Ok(value) => StepOutcome::Completed(value),
            Err(e) => StepOutcome::Degraded(DetectionResult::from_error(&e)),
        }
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            StepOutcome::Completed(value) => Some(value),
            StepOutcome::Degraded(_) => None,
        }
    }
}

/// Port scan of the default gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayPortScan {
    pub ip: Ipv4Addr,
    pub scan_result: StepOutcome<PortScan>,
}

impl GatewayPortScan {
    /// Drops the target address, keeping only the scan outcome.
    pub fn into_outcome(self) -> StepOutcome<PortScan> {
        self.scan_result
    }
}

/// Everything the all-in-one scan found, one key per step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullScan {
    pub wifi_info: StepOutcome<WifiInfo>,
    pub arp_spoofing: DetectionResult,
    pub dns_spoofing: DetectionResult,
    pub rogue_ap: DetectionResult,
    /// The gateway scan result itself, or `unknown` when there is no
    /// gateway or the scan failed.
    pub open_ports: StepOutcome<PortScan>,
    pub threat_score: ThreatReport,
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
    use serde_json::json;

    #[test]
    fn completed_step_serializes_as_payload() {
        let step = StepOutcome::Completed(PortScan {
            open_ports: vec![22, 80],
            raw: String::new(),
        });
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value, json!({"open_ports": [22, 80], "raw": ""}));
    }

    #[test]
    fn degraded_step_serializes_as_unknown_result() {
        let step: StepOutcome<PortScan> =
            StepOutcome::from_result(Err(ProbeError::ToolUnavailable("nmap".into())));
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["status"], "unknown");
        assert_eq!(value["message"], "'nmap' is not installed or not on PATH");
        assert!(step.completed().is_none());
    }

    #[test]
    fn failed_gateway_scan_flattens_to_unknown() {
        let scan = GatewayPortScan {
            ip: Ipv4Addr::new(192, 168, 1, 1),
            scan_result: StepOutcome::from_result(Err(ProbeError::ToolUnavailable("nmap".into()))),
        };
        let value = serde_json::to_value(scan.into_outcome()).unwrap();
        assert_eq!(value["status"], "unknown");
        assert!(value.get("ip").is_none());
    }
}
