// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Text parsers for the platform tools `SystemRepo` shells out to.
//!
//! Kept free of any I/O so every format can be tested on every OS.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use wisp_common::models::wireless::{WifiInfo, WirelessObservation, dbm_to_percent};

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("static pattern is valid"));
    };
}

pattern!(IP_ROUTE_DEFAULT, r"default via ([0-9.]+)");
pattern!(ROUTE_TABLE_DEFAULT, r"(?m)^0\.0\.0\.0\s+([0-9.]+)");
pattern!(BSD_ROUTE_GATEWAY, r"gateway:\s*([0-9.]+)");
pattern!(BSSID_TOKEN, r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$");
pattern!(BSSID_ANYWHERE, r"([0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5})");
pattern!(NMAP_OPEN_TCP, r"(\d+)/tcp\s+open");

pattern!(IW_ESSID, r#"ESSID:"([^"]+)""#);
pattern!(IW_ACCESS_POINT, r"Access Point: ([A-Fa-f0-9:]{17})");
pattern!(IW_SIGNAL_LEVEL, r"Signal level=(-?\d+)");
pattern!(IW_RADIO, r"IEEE (802\.11\S*)");
pattern!(IWLIST_ADDRESS, r"Address: ([0-9A-Fa-f:]{17})");

pattern!(NETSH_SSID, r"(?m)^\s*SSID\s*:\s(.+)$");
pattern!(NETSH_BSSID, r"(?m)^\s*(?:AP )?BSSID\s*:\s(.+)$");
pattern!(NETSH_SIGNAL, r"(?m)^\s*Signal\s*:\s(.+)$");
pattern!(NETSH_CHANNEL, r"(?m)^\s*Channel\s*:\s(.+)$");
pattern!(NETSH_AUTH, r"(?m)^\s*Authentication\s*:\s(.+)$");
pattern!(NETSH_RADIO, r"(?m)^\s*Radio type\s*:\s(.+)$");
pattern!(NETSH_NETWORK_SSID, r"^\s*SSID\s+\d+\s*:\s?(.*)$");
pattern!(NETSH_NETWORK_BSSID, r"^\s*BSSID\s+\d+\s*:\s*([0-9A-Fa-f:]{17})");

pattern!(AIRPORT_NETWORK, r"Current Wi-Fi Network: (.*)");
pattern!(PROFILER_DBM, r"(-?\d+)\s*dBm");

fn capture_ipv4(re: &Regex, text: &str) -> Option<Ipv4Addr> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn capture_str(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn percent(dbm: i32) -> String {
    format!("{}%", dbm_to_percent(dbm))
}

// ============================================================================
// Gateway
// ============================================================================

/// `ip route show default`
pub fn ip_route_gateway(output: &str) -> Option<Ipv4Addr> {
    capture_ipv4(&IP_ROUTE_DEFAULT, output)
}

/// `route -n` (net-tools)
pub fn route_table_gateway(output: &str) -> Option<Ipv4Addr> {
    capture_ipv4(&ROUTE_TABLE_DEFAULT, output)
}

/// `route -n get default` (BSD/macOS)
pub fn bsd_route_gateway(output: &str) -> Option<Ipv4Addr> {
    capture_ipv4(&BSD_ROUTE_GATEWAY, output)
}

/// `ipconfig` (Windows).
///
/// The value sits after the dotted label, and when an IPv6 gateway comes
/// first the IPv4 one follows on an unlabeled continuation line.
pub fn ipconfig_gateway(output: &str) -> Option<Ipv4Addr> {
    let lines: Vec<&str> = output.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if !line.contains("Default Gateway") {
            continue;
        }
        let inline: &str = line.split_once(':').map(|(_, v)| v.trim()).unwrap_or("");
        if let Ok(ip) = inline.parse::<Ipv4Addr>() {
            return Some(ip);
        }
        for next in lines.iter().skip(i + 1) {
            let next = next.trim();
            if next.is_empty() || next.contains(" . ") {
                break;
            }
            if let Ok(ip) = next.parse::<Ipv4Addr>() {
                return Some(ip);
            }
        }
    }
    None
}

// ============================================================================
// Adapter info
// ============================================================================

/// `iwconfig`. `None` when no interface is associated.
pub fn iwconfig_info(output: &str) -> Option<WifiInfo> {
    let ssid: String = capture_str(&IW_ESSID, output)?;
    Some(WifiInfo {
        ssid,
        bssid: capture_str(&IW_ACCESS_POINT, output),
        signal: IW_SIGNAL_LEVEL
            .captures(output)
            .and_then(|c| c[1].parse::<i32>().ok())
            .map(percent),
        channel: None,
        authentication: None,
        radio_type: capture_str(&IW_RADIO, output),
    })
}

/// `netsh wlan show interfaces`. SSID and BSSID are both required.
pub fn netsh_interface_info(output: &str) -> Option<WifiInfo> {
    Some(WifiInfo {
        ssid: capture_str(&NETSH_SSID, output)?,
        bssid: Some(capture_str(&NETSH_BSSID, output)?),
        signal: capture_str(&NETSH_SIGNAL, output),
        channel: capture_str(&NETSH_CHANNEL, output),
        authentication: capture_str(&NETSH_AUTH, output),
        radio_type: capture_str(&NETSH_RADIO, output),
    })
}

/// `airport -I` (macOS).
pub fn airport_info(output: &str) -> Option<WifiInfo> {
    let mut info = WifiInfo::default();
    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value: &str = value.trim();
        match key.trim() {
            "SSID" => info.ssid = value.to_string(),
            "BSSID" => info.bssid = Some(value.to_string()),
            "agrCtlRSSI" => info.signal = value.parse::<i32>().ok().map(percent),
            "channel" => info.channel = Some(value.to_string()),
            "link auth" => info.authentication = Some(value.to_string()),
            _ => {}
        }
    }
    (!info.ssid.is_empty()).then_some(info)
}

/// `networksetup -listallhardwareports`, the device behind the Wi-Fi port.
pub fn wifi_device(output: &str) -> Option<String> {
    let mut lines = output.lines();
    while let Some(line) = lines.next() {
        if line.contains("Hardware Port: Wi-Fi") || line.contains("Hardware Port: AirPort") {
            return lines
                .by_ref()
                .take(4)
                .find_map(|l| l.trim().strip_prefix("Device:"))
                .map(|d| d.trim().to_string());
        }
    }
    None
}

/// `networksetup -getairportnetwork <device>`
pub fn networksetup_ssid(output: &str) -> Option<String> {
    capture_str(&AIRPORT_NETWORK, output).filter(|s| !s.to_lowercase().contains("not associated"))
}

/// The "Current Network Information" block of `system_profiler SPAirPortDataType`.
pub fn profiler_current_network(output: &str) -> Option<WifiInfo> {
    let mut lines = output.lines().skip_while(|l| !l.contains("Current Network Information:"));
    lines.next()?;

    let ssid: String = lines.next()?.trim().strip_suffix(':')?.trim().to_string();
    if ssid.is_empty() {
        return None;
    }

    let mut info = WifiInfo {
        ssid,
        ..Default::default()
    };
    for line in lines.take(12) {
        let line = line.trim();
        if let Some(v) = line.strip_prefix("PHY Mode:") {
            info.radio_type = Some(v.trim().to_string());
        } else if let Some(v) = line.strip_prefix("Channel:") {
            info.channel = Some(v.trim().to_string());
        } else if let Some(v) = line.strip_prefix("Security:") {
            info.authentication = Some(v.trim().to_string());
        } else if line.starts_with("Signal / Noise:") {
            info.signal = PROFILER_DBM
                .captures(line)
                .and_then(|c| c[1].parse::<i32>().ok())
                .map(percent);
        } else if line.ends_with(':') {
            break;
        }
    }
    Some(info)
}

// ============================================================================
// Wireless scan
// ============================================================================

/// `nmcli -t -f BSSID,SSID dev wifi list`. Colons inside fields are escaped as `\:`.
pub fn nmcli_networks(output: &str) -> WirelessObservation {
    let mut observation = WirelessObservation::new();
    for line in output.lines() {
        let fields: Vec<String> = split_terse(line);
        if let [bssid, ssid, ..] = fields.as_slice()
            && BSSID_TOKEN.is_match(bssid)
        {
            observation.record(ssid, bssid);
        }
    }
    observation
}

fn split_terse(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = vec![String::new()];
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next()
                    && let Some(field) = fields.last_mut()
                {
                    field.push(escaped);
                }
            }
            ':' => fields.push(String::new()),
            c => {
                if let Some(field) = fields.last_mut() {
                    field.push(c);
                }
            }
        }
    }
    fields
}

/// `iwlist scan`. Each cell starts with its address; the ESSID follows.
pub fn iwlist_networks(output: &str) -> WirelessObservation {
    let mut observation = WirelessObservation::new();
    let mut cell_address: Option<String> = None;
    for line in output.lines() {
        if let Some(address) = capture_str(&IWLIST_ADDRESS, line) {
            cell_address = Some(address);
        } else if let Some(ssid) = capture_str(&IW_ESSID, line)
            && let Some(address) = cell_address.take()
        {
            observation.record(&ssid, &address);
        }
    }
    observation
}

/// `netsh wlan show networks mode=bssid`
pub fn netsh_networks(output: &str) -> WirelessObservation {
    let mut observation = WirelessObservation::new();
    let mut current_ssid: Option<String> = None;
    for line in output.lines() {
        if let Some(caps) = NETSH_NETWORK_SSID.captures(line) {
            current_ssid = Some(caps[1].trim().to_string());
        } else if let Some(caps) = NETSH_NETWORK_BSSID.captures(line)
            && let Some(ssid) = &current_ssid
        {
            observation.record(ssid, &caps[1]);
        }
    }
    observation
}

/// `airport -s`. The SSID may contain spaces, so the BSSID column is located
/// by shape and everything before it is the name.
pub fn airport_networks(output: &str) -> WirelessObservation {
    let mut observation = WirelessObservation::new();
    for line in output.lines().skip(1) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if let Some(idx) = parts.iter().position(|p| BSSID_TOKEN.is_match(p)) {
            observation.record(&parts[..idx].join(" "), parts[idx]);
        }
    }
    observation
}

/// Network sections of `system_profiler SPAirPortDataType`. Only entries that
/// expose a BSSID are recorded; recent macOS releases hide it.
pub fn profiler_networks(output: &str) -> WirelessObservation {
    let mut observation = WirelessObservation::new();
    let mut in_networks = false;
    let mut current_ssid: Option<String> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed == "Current Network Information:" || trimmed == "Other Local Wi-Fi Networks:" {
            in_networks = true;
            current_ssid = None;
            continue;
        }
        if !in_networks {
            continue;
        }
        if let Some(name) = trimmed.strip_suffix(':')
            && !name.contains(':')
        {
            current_ssid = Some(name.trim().to_string());
        } else if trimmed.starts_with("BSSID:")
            && let (Some(ssid), Some(caps)) = (&current_ssid, BSSID_ANYWHERE.captures(trimmed))
        {
            observation.record(ssid, &caps[1]);
        }
    }
    observation
}

// ============================================================================
// Port scan
// ============================================================================

/// `nmap -sT -F <ip>`, distinct open TCP ports in ascending order.
pub fn nmap_open_ports(output: &str) -> Vec<u16> {
    NMAP_OPEN_TCP
        .captures_iter(output)
        .filter_map(|c| c[1].parse::<u16>().ok())
        .collect::<BTreeSet<u16>>()
        .into_iter()
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
