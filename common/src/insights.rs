// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Guidance about the detectors themselves.
const DETECTOR_TIPS: &[&str] = &[
    "Running with root enables ARP probing and DNS capture",
    "'unknown' means a probe could not run, not that you are safe",
    "Mesh networks advertise one SSID from many BSSIDs",
    "Use 'wisp dns --window 30' to watch DNS traffic for longer",
    "The '--redact' flag hides MACs and SSIDs for sharing",
];

/// General public Wi-Fi hygiene.
const WIFI_HYGIENE: &[&str] = &[
    "Prefer HTTPS sites and a VPN on shared networks",
    "Forget open networks you no longer use",
    "Evil twins often copy the exact SSID of a cafe network",
    "Telnet and FTP send credentials in clear text",
];

/// Generates a randomized list of spinner messages.
///
/// Every slot has a 50% probability of being a detector tip and a 50%
/// probability of being a hygiene hint while both pools still have items.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = DETECTOR_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut hygiene = WIFI_HYGIENE.to_vec();
    hygiene.shuffle(&mut rng);

    let mut output = Vec::with_capacity(tips.len() + hygiene.len());

    while !tips.is_empty() && !hygiene.is_empty() {
        if rng.random_bool(0.5) {
            output.push(tips.remove(0));
        } else {
            output.push(hygiene.remove(0));
        }
    }

    output.extend(tips);
    output.extend(hygiene);
    output
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
