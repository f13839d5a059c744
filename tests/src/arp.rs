// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use wisp_common::models::detection::{Evidence, Status};
use wisp_core::detectors::{ArpSpoofDetector, HardwareResolver, PnetResolver};

#[cfg(target_os = "linux")]
use crate::utils::{NetnsContext, PEER_ADDR};

#[cfg(target_os = "linux")]
#[tokio::test]
#[ignore = "requires root privileges"]
async fn namespace_peer_answers_arp_with_its_own_mac() {
    let Some(ctx) = NetnsContext::new("arp") else {
        panic!("could not create network namespace");
    };

    let resolver = PnetResolver::new(Duration::from_secs(2));
    let mac = resolver
        .resolve(PEER_ADDR)
        .await
        .expect("probe should run as root")
        .expect("peer should answer");

    assert_eq!(Some(mac.to_string()), ctx.peer_mac());
}

#[cfg(target_os = "linux")]
#[tokio::test]
#[ignore = "requires root privileges"]
async fn stable_peer_is_not_flagged() {
    let Some(_ctx) = NetnsContext::new("arp2") else {
        panic!("could not create network namespace");
    };

    let detector = ArpSpoofDetector::new(
        Arc::new(PnetResolver::new(Duration::from_secs(2))),
        Duration::from_millis(200),
    );
    let result = detector.detect(Some(PEER_ADDR)).await;

    assert_eq!(result.status(), Status::Safe, "{}", result.message());
    assert!(matches!(result.evidence(), Some(Evidence::Gateway(_))));
}

#[tokio::test]
async fn unprivileged_probe_degrades_to_unknown() {
    if is_root::is_root() {
        return;
    }
    let detector = ArpSpoofDetector::new(
        Arc::new(PnetResolver::new(Duration::from_millis(100))),
        Duration::ZERO,
    );
    let result = detector.detect(Some("192.168.1.1".parse().unwrap())).await;
    assert_eq!(result.status(), Status::Unknown);
    assert!(result.recommendation().is_some());
}
