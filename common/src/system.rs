// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;

use crate::error::ProbeError;
use crate::models::scan::PortScan;
use crate::models::wireless::{WifiInfo, WirelessObservation};

/// Defines the contract for accessing OS-level network information.
///
/// This repository abstracts the platform commands used to find the gateway,
/// describe the wireless link, list nearby access points and scan ports.
/// Every method may block; async callers should run them on the blocking pool.
pub trait NetworkRepository: Send + Sync {
    /// Returns the IPv4 default gateway, or `None` if the host has no default route.
    fn gateway_ip(&self) -> Result<Option<Ipv4Addr>, ProbeError>;

    /// Describes the wireless network the adapter is currently associated with.
    fn wireless_adapter_info(&self) -> Result<WifiInfo, ProbeError>;

    /// Takes one snapshot of nearby networks and the radios advertising them.
    fn scan_wireless_networks(&self) -> Result<WirelessObservation, ProbeError>;

    /// Runs the external port scanner against a single address.
    fn run_port_scan(&self, ip: Ipv4Addr) -> Result<PortScan, ProbeError>;
}
