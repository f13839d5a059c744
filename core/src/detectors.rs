// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Single-pass detectors.
//!
//! Each detector owns the state of exactly one pass (ARP baseline, DNS history)
//! and turns every failure into a [`DetectionResult`](wisp_common::models::detection::DetectionResult)
//! instead of returning an error.

pub mod arp;
pub mod dns;
pub mod rogue_ap;

pub use arp::{ArpSpoofDetector, HardwareResolver, PnetResolver};
pub use dns::{DnsAnswer, DnsResponseSource, DnsSpoofDetector, PnetDnsSource};
pub use rogue_ap::RogueApDetector;
