// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use serde::Serialize;

pub const HIGH_THRESHOLD: u32 = 70;
pub const MEDIUM_THRESHOLD: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    /// Step function over the composite score.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= HIGH_THRESHOLD => ThreatLevel::High,
            s if s >= MEDIUM_THRESHOLD => ThreatLevel::Medium,
            _ => ThreatLevel::Low,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            ThreatLevel::High => "Avoid using this Wi-Fi for any sensitive activity.",
            ThreatLevel::Medium => "Caution advised. Avoid entering passwords or personal info.",
            ThreatLevel::Low => "Wi-Fi appears safe to use.",
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// Composite verdict over all detectors. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreatReport {
    pub score: u32,
    #[serde(rename = "threat_level")]
    pub level: ThreatLevel,
    pub reasons: Vec<String>,
    pub recommendation: String,
}

impl ThreatReport {
    pub fn new(score: u32, reasons: Vec<String>) -> Self {
        let level = ThreatLevel::from_score(score);
        Self {
            score,
            level,
            reasons,
            recommendation: level.recommendation().to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(ThreatLevel::from_score(0), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_score(39), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_score(40), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(69), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(70), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_score(400), ThreatLevel::High);
    }

    #[test]
    fn level_is_serialized_as_threat_level() {
        let report = ThreatReport::new(75, vec!["ARP spoofing activity detected.".into()]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["threat_level"], "High");
        assert_eq!(value["score"], 75);
        assert_eq!(
            value["recommendation"],
            "Avoid using this Wi-Fi for any sensitive activity."
        );
    }
}
