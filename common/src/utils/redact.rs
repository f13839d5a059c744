// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Utilities for privacy-preserving output.
//!
//! Masks hardware addresses and network names in reports so they can be shared
//! without pinpointing the location or the devices involved. The OUI part of a MAC
//! is kept since the vendor is often what matters when judging a spoofed gateway.

use pnet::util::MacAddr;

/// Redacts a network name while keeping it recognizable to its owner.
///
/// Preserves the first 2 and last 2 characters. Names of 4 characters or less
/// are fully redacted.
///
/// # Examples
/// ```
/// use wisp_common::utils::redact;
///
/// assert_eq!(redact::ssid("CoffeeHouse_5G"), "CoXXXXX5G");
/// assert_eq!(redact::ssid("home"), "XXXXX");
/// ```
pub fn ssid(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 4 {
        return "XXXXX".to_string();
    }

    let first_two: String = chars[..2].iter().collect();
    let last_two: String = chars[chars.len() - 2..].iter().collect();
    format!("{first_two}XXXXX{last_two}")
}

/// Redacts a MAC address to prevent hardware fingerprinting.
///
/// # Examples
/// ```
/// use pnet::util::MacAddr;
/// use wisp_common::utils::redact;
///
/// let mac = MacAddr::new(0x2c, 0xcf, 0x67, 0xf2, 0x51, 0xe3);
/// assert_eq!(redact::mac_addr(&mac), "2c:cf:67:XX:XX:XX");
/// ```
pub fn mac_addr(mac: &MacAddr) -> String {
    format!("{:02x}:{:02x}:{:02x}:XX:XX:XX", mac.0, mac.1, mac.2)
}

/// Same as [`mac_addr`] for BSSIDs that are only available as text.
/// Unparsable input is masked entirely.
pub fn bssid(bssid: &str) -> String {
    match crate::utils::mac::parse(bssid) {
        Some(mac) => mac_addr(&mac),
        None => "XX:XX:XX:XX:XX:XX".to_string(),
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
