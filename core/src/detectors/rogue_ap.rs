// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Rogue access point heuristic: one network name advertised by several radios.
//!
//! Mesh systems and multi-AP deployments look exactly like this too, there is no
//! allowlist, so a warning here is a prompt to double check rather than proof.

use wisp_common::error::ProbeError;
use wisp_common::models::detection::{DetectionResult, Evidence, RogueApAlert};
use wisp_common::models::wireless::WirelessObservation;

const ALERT: &str = "Suspicious: Multiple BSSIDs found for same SSID";

#[derive(Debug, Default, Clone, Copy)]
pub struct RogueApDetector;

impl RogueApDetector {
    /// Flags every SSID seen with more than one BSSID in `observation`.
    pub fn analyze(&self, observation: &WirelessObservation) -> DetectionResult {
        let alerts: Vec<RogueApAlert> = observation
            .iter()
            .filter(|(_, bssids)| bssids.len() > 1)
            .map(|(ssid, bssids)| RogueApAlert {
                ssid: ssid.clone(),
                bssids: bssids.iter().cloned().collect(),
                count: bssids.len(),
                alert: ALERT.to_string(),
            })
            .collect();

        if alerts.is_empty() {
            return DetectionResult::safe("No rogue access points detected.");
        }

        DetectionResult::warning("Possible Rogue APs detected!")
            .with_recommendation("Verify the network with its operator before connecting.")
            .with_evidence(Evidence::RogueAps(alerts))
    }

    /// Same as [`RogueApDetector::analyze`], degrading a failed scan to `unknown`.
    pub fn detect(&self, snapshot: Result<WirelessObservation, ProbeError>) -> DetectionResult {
        match snapshot {
            Ok(observation) => self.analyze(&observation),
            Err(e) => DetectionResult::from_error(&e),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
