// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Risk tiers for ports found open on the gateway.

use std::collections::BTreeSet;

use serde::Serialize;

/// FTP and Telnet, both carry credentials in clear text.
pub const HIGH_RISK_PORTS: [u16; 2] = [21, 23];
/// HTTP, HTTPS and the first dynamic RPC port.
pub const MEDIUM_RISK_PORTS: [u16; 3] = [80, 443, 1025];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRisk {
    High,
    Medium,
    Other,
}

pub fn classify(port: u16) -> PortRisk {
    if HIGH_RISK_PORTS.contains(&port) {
        PortRisk::High
    } else if MEDIUM_RISK_PORTS.contains(&port) {
        PortRisk::Medium
    } else {
        PortRisk::Other
    }
}

/// Open ports split into disjoint risk buckets.
///
/// Every input port lands in exactly one bucket and duplicates collapse, so the
/// union of the three sets is the deduplicated input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortBuckets {
    pub high: BTreeSet<u16>,
    pub medium: BTreeSet<u16>,
    pub other: BTreeSet<u16>,
}

impl PortBuckets {
    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.medium.is_empty() && self.other.is_empty()
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.other.len()
    }

    pub fn insert(&mut self, port: u16) {
        match classify(port) {
            PortRisk::High => self.high.insert(port),
            PortRisk::Medium => self.medium.insert(port),
            PortRisk::Other => self.other.insert(port),
        };
    }

    pub fn all(&self) -> BTreeSet<u16> {
        self.high
            .iter()
            .chain(&self.medium)
            .chain(&self.other)
            .copied()
            .collect()
    }
}

impl FromIterator<u16> for PortBuckets {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut buckets = PortBuckets::default();
        for port in iter {
            buckets.insert(port);
        }
        buckets
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
