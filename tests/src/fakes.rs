// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! In-memory collaborators for driving the orchestrator without root.

use std::net::Ipv4Addr;
use std::sync::Mutex;

use async_trait::async_trait;
use pnet::util::MacAddr;

use wisp_common::error::ProbeError;
use wisp_common::models::scan::PortScan;
use wisp_common::models::wireless::{WifiInfo, WirelessObservation};
use wisp_common::system::NetworkRepository;
use wisp_core::detectors::HardwareResolver;

pub const GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

/// Raw `nmap -sT -F` output for a gateway with FTP, HTTP and 9999 open.
pub const NMAP_OUTPUT: &str = "\
Starting Nmap 7.94 ( https://nmap.org )
Nmap scan report for 192.168.1.1
Host is up (0.0031s latency).
Not shown: 97 closed tcp ports (conn-refused)
PORT     STATE SERVICE
21/tcp   open  ftp
80/tcp   open  http
9999/tcp open  abyss

Nmap done: 1 IP address (1 host up) scanned in 0.12 seconds
";

/// What the scripted network looks like.
pub struct ScriptedNetwork {
    pub gateway: Option<Ipv4Addr>,
    pub ssid: Option<String>,
    pub radios: Vec<(String, String)>,
    pub port_scan: Result<String, fn() -> ProbeError>,
}

impl Default for ScriptedNetwork {
    fn default() -> Self {
        Self {
            gateway: Some(GATEWAY),
            ssid: Some("CafeWiFi".to_string()),
            radios: vec![("CafeWiFi".into(), "aa:bb:cc:00:00:01".into())],
            port_scan: Ok(NMAP_OUTPUT.to_string()),
        }
    }
}

impl NetworkRepository for ScriptedNetwork {
    fn gateway_ip(&self) -> Result<Option<Ipv4Addr>, ProbeError> {
        Ok(self.gateway)
    }

    fn wireless_adapter_info(&self) -> Result<WifiInfo, ProbeError> {
        match &self.ssid {
            Some(ssid) => Ok(WifiInfo {
                ssid: ssid.clone(),
                signal: Some("76%".into()),
                ..Default::default()
            }),
            None => Err(ProbeError::parse(
                "iwconfig",
                "Wi-Fi not connected or SSID not found",
            )),
        }
    }

    fn scan_wireless_networks(&self) -> Result<WirelessObservation, ProbeError> {
        Ok(self
            .radios
            .iter()
            .map(|(ssid, bssid)| (ssid.as_str(), bssid.as_str()))
            .collect())
    }

    fn run_port_scan(&self, _ip: Ipv4Addr) -> Result<PortScan, ProbeError> {
        match &self.port_scan {
            Ok(raw) => Ok(PortScan {
                open_ports: wisp_core::system::parse::nmap_open_ports(raw),
                raw: raw.clone(),
            }),
            Err(make_err) => Err(make_err()),
        }
    }
}

/// Replies with the queued MACs in order, then stays silent.
pub struct QueuedResolver {
    replies: Mutex<Vec<MacAddr>>,
}

impl QueuedResolver {
    pub fn new(mut replies: Vec<MacAddr>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
        }
    }

    pub fn stable(mac: MacAddr) -> Self {
        Self::new(vec![mac, mac])
    }
}

#[async_trait]
impl HardwareResolver for QueuedResolver {
    async fn resolve(&self, _ip: Ipv4Addr) -> Result<Option<MacAddr>, ProbeError> {
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| ProbeError::Other(anyhow::anyhow!("resolver state poisoned")))?;
        Ok(replies.pop())
    }
}
