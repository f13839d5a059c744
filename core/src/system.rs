// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Platform implementation of [`NetworkRepository`].
//!
//! Everything here shells out to the tools each OS ships with and hands the
//! text to [`parse`]. Missing tools surface as [`ProbeError::ToolUnavailable`].

use std::net::Ipv4Addr;
use std::process::{Command, Output};

use wisp_common::debug;
use wisp_common::error::ProbeError;
use wisp_common::models::scan::PortScan;
use wisp_common::models::wireless::{WifiInfo, WirelessObservation};
use wisp_common::system::NetworkRepository;

pub mod parse;

#[cfg(target_os = "macos")]
const AIRPORT: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

#[cfg(target_os = "windows")]
const NMAP_FALLBACK: &str = r"C:\Program Files (x86)\Nmap\nmap.exe";

pub struct SystemRepo;

/// A tool invocation and the parser for its output.
type Attempt<'a, T> = (&'a str, &'a [&'a str], fn(&str) -> Option<T>);

/// Runs `tool` and returns its stdout, failing on a non-zero exit.
fn run(tool: &str, args: &[&str]) -> Result<String, ProbeError> {
    debug!(verbosity = 2, "Running {tool} {}", args.join(" "));
    let output: Output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| ProbeError::from_io(tool, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::parse(
            tool,
            format!("exited with {}: {}", output.status, stderr.trim()),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// First successful parse among `attempts`.
///
/// Once a tool has run and found nothing, that answer wins over any later
/// tool failing to start. Otherwise the last error seen is returned.
fn first_of<T>(
    attempts: &[Attempt<'_, T>],
    not_found: impl Fn(&str) -> ProbeError,
) -> Result<T, ProbeError> {
    let mut answered: Option<ProbeError> = None;
    let mut last_err: Option<ProbeError> = None;
    for (tool, args, parser) in attempts {
        match run(tool, args) {
            Ok(out) => match parser(&out) {
                Some(value) => return Ok(value),
                None => {
                    answered.get_or_insert_with(|| not_found(tool));
                }
            },
            Err(e) => {
                debug!(verbosity = 1, "{tool} unavailable: {e}");
                last_err = Some(e);
            }
        }
    }
    Err(answered
        .or(last_err)
        .unwrap_or_else(|| not_found("no supported tool")))
}

fn not_connected(tool: &str) -> ProbeError {
    ProbeError::parse(tool, "Wi-Fi not connected or SSID not found")
}

impl NetworkRepository for SystemRepo {
    fn gateway_ip(&self) -> Result<Option<Ipv4Addr>, ProbeError> {
        #[cfg(target_os = "linux")]
        let attempts: &[Attempt<Ipv4Addr>] = &[
            ("ip", &["route", "show", "default"], parse::ip_route_gateway),
            ("route", &["-n"], parse::route_table_gateway),
        ];
        #[cfg(target_os = "macos")]
        let attempts: &[Attempt<Ipv4Addr>] =
            &[("route", &["-n", "get", "default"], parse::bsd_route_gateway)];
        #[cfg(target_os = "windows")]
        let attempts: &[Attempt<Ipv4Addr>] =
            &[("ipconfig", &[], parse::ipconfig_gateway)];
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        let attempts: &[Attempt<Ipv4Addr>] = &[];

        match first_of(attempts, |_| ProbeError::NoGatewayFound) {
            Ok(ip) => Ok(Some(ip)),
            Err(ProbeError::NoGatewayFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn wireless_adapter_info(&self) -> Result<WifiInfo, ProbeError> {
        #[cfg(target_os = "linux")]
        {
            let attempts: &[Attempt<WifiInfo>] = &[("iwconfig", &[], parse::iwconfig_info)];
            first_of(attempts, not_connected)
        }
        #[cfg(target_os = "windows")]
        {
            let attempts: &[Attempt<WifiInfo>] =
                &[("netsh", &["wlan", "show", "interfaces"], parse::netsh_interface_info)];
            first_of(attempts, not_connected)
        }
        #[cfg(target_os = "macos")]
        {
            macos_adapter_info()
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            Err(ProbeError::ToolUnavailable("wireless adapter tooling".to_string()))
        }
    }

    fn scan_wireless_networks(&self) -> Result<WirelessObservation, ProbeError> {
        #[cfg(target_os = "linux")]
        let attempts: &[Attempt<WirelessObservation>] = &[
            ("nmcli", &["-t", "-f", "BSSID,SSID", "dev", "wifi", "list"], |o| {
                Some(parse::nmcli_networks(o))
            }),
            ("iwlist", &["scan"], |o| Some(parse::iwlist_networks(o))),
        ];
        #[cfg(target_os = "macos")]
        let attempts: &[Attempt<WirelessObservation>] = &[
            ("system_profiler", &["SPAirPortDataType"], |o| {
                Some(parse::profiler_networks(o)).filter(|obs| !obs.is_empty())
            }),
            (AIRPORT, &["-s"], |o| Some(parse::airport_networks(o))),
        ];
        #[cfg(target_os = "windows")]
        let attempts: &[Attempt<WirelessObservation>] = &[(
            "netsh",
            &["wlan", "show", "networks", "mode=bssid"],
            |o| Some(parse::netsh_networks(o)),
        )];
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        let attempts: &[Attempt<WirelessObservation>] = &[];

        first_of(attempts, |tool| ProbeError::parse(tool, "no wireless networks listed"))
    }

    fn run_port_scan(&self, ip: Ipv4Addr) -> Result<PortScan, ProbeError> {
        let target: String = ip.to_string();
        let args: [&str; 3] = ["-sT", "-F", &target];

        #[cfg(target_os = "windows")]
        let raw: String = match run("nmap", &args) {
            Err(ProbeError::ToolUnavailable(_)) => run(NMAP_FALLBACK, &args)?,
            other => other?,
        };
        #[cfg(not(target_os = "windows"))]
        let raw: String = run("nmap", &args)?;

        Ok(PortScan {
            open_ports: parse::nmap_open_ports(&raw),
            raw,
        })
    }
}

#[cfg(target_os = "macos")]
fn macos_adapter_info() -> Result<WifiInfo, ProbeError> {
    if let Ok(out) = run(AIRPORT, &["-I"])
        && let Some(info) = parse::airport_info(&out)
    {
        return Ok(info);
    }

    let device: String = run("networksetup", &["-listallhardwareports"])
        .ok()
        .and_then(|out| parse::wifi_device(&out))
        .unwrap_or_else(|| "en0".to_string());
    if let Ok(out) = run("networksetup", &["-getairportnetwork", &device])
        && let Some(ssid) = parse::networksetup_ssid(&out)
    {
        return Ok(WifiInfo {
            ssid,
            ..Default::default()
        });
    }

    let attempts: &[Attempt<WifiInfo>] =
        &[("system_profiler", &["SPAirPortDataType"], parse::profiler_current_network)];
    first_of(attempts, not_connected)
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
    fn missing_tool_is_reported_as_unavailable() {
        let err = run("wisp-definitely-not-a-real-tool", &[]).unwrap_err();
        assert!(matches!(err, ProbeError::ToolUnavailable(ref t) if t == "wisp-definitely-not-a-real-tool"));
    }

    #[test]
    fn first_of_falls_through_to_the_last_error() {
        let attempts: &[Attempt<u8>] =
            &[("wisp-missing-a", &[], |_| Some(1)), ("wisp-missing-b", &[], |_| Some(2))];
        let err = first_of(attempts, |_| ProbeError::NoGatewayFound).unwrap_err();
        assert!(matches!(err, ProbeError::ToolUnavailable(ref t) if t == "wisp-missing-b"));
    }

    #[cfg(unix)]
    #[test]
    fn empty_answer_beats_a_later_missing_tool() {
        let attempts: &[Attempt<Ipv4Addr>] = &[
            ("true", &[], parse::ip_route_gateway),
            ("wisp-missing-route", &["-n"], parse::route_table_gateway),
        ];
        let err = first_of(attempts, |_| ProbeError::NoGatewayFound).unwrap_err();
        assert!(matches!(err, ProbeError::NoGatewayFound));
    }

    #[cfg(unix)]
    #[test]
    fn missing_tool_before_an_empty_answer_is_not_found() {
        let attempts: &[Attempt<Ipv4Addr>] = &[
            ("wisp-missing-ip", &[], parse::ip_route_gateway),
            ("true", &[], parse::route_table_gateway),
        ];
        let err = first_of(attempts, |_| ProbeError::NoGatewayFound).unwrap_err();
        assert!(matches!(err, ProbeError::NoGatewayFound));
    }

    #[test]
    fn no_attempts_uses_the_not_found_error() {
        let attempts: &[Attempt<u8>] = &[];
        let err = first_of(attempts, |_| ProbeError::NoGatewayFound).unwrap_err();
        assert!(matches!(err, ProbeError::NoGatewayFound));
    }
}
