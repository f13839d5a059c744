// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Detection and scoring engine.
//!
//! - [`detectors`]: ARP spoofing, DNS spoofing and rogue access point checks.
//! - [`scoring`]: turns detector outputs and open ports into a [`ThreatReport`](wisp_common::models::report::ThreatReport).
//! - [`scanner`]: runs every step in isolation and assembles the composite report.
//! - [`system`]: platform commands behind [`NetworkRepository`](wisp_common::system::NetworkRepository).

pub mod detectors;
pub mod network;
pub mod scanner;
pub mod scoring;
pub mod system;
