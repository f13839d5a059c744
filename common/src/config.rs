// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;
use std::time::Duration;

/// Observation window used by the HTTP routes and the composite scan.
pub const DEFAULT_DNS_WINDOW: Duration = Duration::from_secs(2);
/// Lower and upper bound for any DNS observation window.
pub const MIN_DNS_WINDOW: Duration = Duration::from_secs(1);
pub const MAX_DNS_WINDOW: Duration = Duration::from_secs(30);

pub const DEFAULT_ARP_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_ARP_SAMPLE_GAP: Duration = Duration::from_secs(1);
pub const DEFAULT_PORT_SCAN_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Global configuration options for a detection run.
///
/// This struct controls the runtime behavior of the application, including
/// UI verbosity, probe time bounds and the HTTP listener.
/// It is typically constructed via CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Toggles the display of the startup ASCII banner.
    pub no_banner: bool,

    /// Controls the visual density and formatting of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, spinners, and detailed trees.
    /// * **1**: Reduced styling.
    /// * **2**: Raw mode, one line per detector.
    pub quiet: u8,

    /// Enables privacy mode for sensitive data in the output.
    ///
    /// # Masked Fields
    /// * MAC addresses and BSSIDs
    /// * SSIDs
    pub redact: bool,

    /// Print results as JSON instead of the styled report.
    pub json: bool,

    /// How long the DNS detector listens for responses in a single pass.
    ///
    /// Clamped to [`MIN_DNS_WINDOW`]..=[`MAX_DNS_WINDOW`] before use.
    pub dns_window: Duration,

    /// How long a single ARP probe waits for the gateway to answer.
    pub arp_timeout: Duration,

    /// Pause between the baseline ARP sample and the follow-up sample.
    pub arp_sample_gap: Duration,

    /// Ceiling applied to the external port scanner.
    ///
    /// The scanner itself has no time bound, an expiry is reported as an
    /// `unknown` result instead of stalling the composite scan.
    pub port_scan_timeout: Duration,

    /// Socket address the HTTP server listens on.
    pub bind: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            redact: false,
            json: false,
            dns_window: DEFAULT_DNS_WINDOW,
            arp_timeout: DEFAULT_ARP_TIMEOUT,
            arp_sample_gap: DEFAULT_ARP_SAMPLE_GAP,
            port_scan_timeout: DEFAULT_PORT_SCAN_TIMEOUT,
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
        }
    }
}

impl Config {
    /// Returns the DNS window bounded to the supported range.
    pub fn bounded_dns_window(&self) -> Duration {
        clamp_dns_window(self.dns_window)
    }
}

pub fn clamp_dns_window(window: Duration) -> Duration {
    window.clamp(MIN_DNS_WINDOW, MAX_DNS_WINDOW)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
