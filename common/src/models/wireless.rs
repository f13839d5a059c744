// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Wireless Models
//!
//! * [`WifiInfo`]: what the adapter reports about the network we are joined to.
//! * [`WirelessObservation`]: one scan snapshot, SSID to the set of radios (BSSIDs)
//!   seen broadcasting it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Association details of the current wireless link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WifiInfo {
    pub ssid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    /// Signal quality as a percentage string, e.g. `"76%"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_type: Option<String>,
}

/// Converts an RSSI in dBm to the 0-100 quality scale used by most OS tools.
pub fn dbm_to_percent(dbm: i32) -> u8 {
    match dbm {
        d if d >= -50 => 100,
        d if d <= -100 => 0,
        d => (2 * (d + 100)) as u8,
    }
}

/// SSID to BSSIDs, as seen in a single scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WirelessObservation {
    networks: BTreeMap<String, BTreeSet<String>>,
}

impl WirelessObservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one radio. Hidden networks (empty SSID) are ignored and the
    /// BSSID is normalized so casing differences do not count twice.
    pub fn record(&mut self, ssid: &str, bssid: &str) {
        let ssid = ssid.trim();
        if ssid.is_empty() {
            return;
        }
        self.networks
            .entry(ssid.to_string())
            .or_default()
            .insert(normalize_bssid(bssid));
    }

    pub fn bssids(&self, ssid: &str) -> Option<&BTreeSet<String>> {
        self.networks.get(ssid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.networks.iter()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for WirelessObservation {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut observation = WirelessObservation::new();
        for (ssid, bssid) in iter {
            observation.record(ssid, bssid);
        }
        observation
    }
}

pub fn normalize_bssid(bssid: &str) -> String {
    bssid.trim().replace('-', ":").to_ascii_lowercase()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
