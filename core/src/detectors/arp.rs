// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! **ARP spoofing** detection.
//!
//! The gateway's hardware address is sampled twice within one pass. A reply that
//! changes between the two samples means someone else is answering for the
//! gateway, the classic man-in-the-middle setup on shared Wi-Fi.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use is_root::is_root;
use pnet::util::MacAddr;
use tokio::time::Sleep;

use wisp_common::error::ProbeError;
use wisp_common::interface::{self, LinkContext};
use wisp_common::models::detection::{DetectionResult, Evidence, GatewayBinding, MacMismatch};
use wisp_common::utils::mac;
use wisp_common::{debug, warn};
use wisp_protocols::arp;

use crate::network::channel::{self, EthernetHandle};

const NO_BASELINE: &str = "Could not retrieve MAC address of gateway (permissions or connectivity)";
const NO_BASELINE_HINT: &str = "Try running with elevated privileges or check network connectivity.";

/// Resolves the hardware address currently answering for an IPv4 address.
#[async_trait]
pub trait HardwareResolver: Send + Sync {
    /// `Ok(None)` means the request went out but nobody answered in time.
    async fn resolve(&self, ip: Ipv4Addr) -> Result<Option<MacAddr>, ProbeError>;
}

/// The first sample of a pass. Never outlives the pass that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpBaseline {
    pub gateway_ip: Ipv4Addr,
    pub gateway_mac: MacAddr,
}

impl ArpBaseline {
    /// Judges the follow-up sample against this baseline.
    pub fn compare(&self, received: MacAddr) -> DetectionResult {
        if received != self.gateway_mac {
            return DetectionResult::threat("ARP spoofing detected!")
                .with_recommendation("Avoid entering sensitive information on this network.")
                .with_evidence(Evidence::MacMismatch(MacMismatch {
                    gateway_ip: self.gateway_ip,
                    expected_mac: self.gateway_mac,
                    received_mac: received,
                }));
        }

        DetectionResult::safe("No ARP spoofing detected.").with_evidence(Evidence::Gateway(
            GatewayBinding {
                gateway_ip: self.gateway_ip,
                gateway_mac: self.gateway_mac,
                vendor: mac::get_vendor(self.gateway_mac),
            },
        ))
    }
}

pub struct ArpSpoofDetector {
    resolver: Arc<dyn HardwareResolver>,
    sample_gap: Duration,
}

impl ArpSpoofDetector {
    pub fn new(resolver: Arc<dyn HardwareResolver>, sample_gap: Duration) -> Self {
        Self {
            resolver,
            sample_gap,
        }
    }

    /// Runs one two-sample pass against `gateway`.
    ///
    /// No retries: a missing first reply is `unknown`, a missing second reply
    /// is a `warning` since the gateway answered a moment ago.
    pub async fn detect(&self, gateway: Option<Ipv4Addr>) -> DetectionResult {
        let Some(gateway_ip) = gateway else {
            return DetectionResult::unknown("Unable to detect gateway IP")
                .with_recommendation("Check that you are connected to a network.");
        };

        let baseline: ArpBaseline = match self.resolver.resolve(gateway_ip).await {
            Ok(Some(gateway_mac)) => ArpBaseline {
                gateway_ip,
                gateway_mac,
            },
            Ok(None) => {
                return DetectionResult::unknown(NO_BASELINE).with_recommendation(NO_BASELINE_HINT);
            }
            Err(e) => {
                debug!("Baseline ARP probe towards {gateway_ip} failed: {e}");
                let hint: &str = e.remediation().unwrap_or(NO_BASELINE_HINT);
                return DetectionResult::unknown(format!("{NO_BASELINE}: {e}"))
                    .with_recommendation(hint);
            }
        };
        debug!(verbosity = 1, "Baseline for {gateway_ip} is {}", baseline.gateway_mac);

        tokio::time::sleep(self.sample_gap).await;

        match self.resolver.resolve(gateway_ip).await {
            Ok(Some(received)) => baseline.compare(received),
            Ok(None) => DetectionResult::warning("No ARP reply from gateway"),
            Err(e) => {
                warn!("Follow-up ARP probe towards {gateway_ip} failed: {e}");
                DetectionResult::warning("No ARP reply from gateway")
            }
        }
    }
}

/// Raw-socket resolver: one broadcast request, first matching reply wins.
pub struct PnetResolver {
    timeout: Duration,
}

impl PnetResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl HardwareResolver for PnetResolver {
    async fn resolve(&self, ip: Ipv4Addr) -> Result<Option<MacAddr>, ProbeError> {
        if !is_root() {
            return Err(ProbeError::PermissionDenied("sending ARP requests".to_string()));
        }

        let link: LinkContext = interface::find_link_for(ip)
            .ok_or_else(|| ProbeError::Other(anyhow!("no interface on the same link as {ip}")))?;
        let frame: Vec<u8> = arp::create_request(link.local_mac, link.local_net.ip(), ip)?;

        let mut eth_handle: EthernetHandle = channel::start_capture(&link.interface)
            .map_err(|e| {
                ProbeError::from_io(format!("opening datalink channel on {}", link.interface.name), e)
            })?;

        if let Some(Err(e)) = eth_handle.tx.send_to(&frame, None) {
            return Err(ProbeError::from_io("sending ARP request", e));
        }
        debug!(verbosity = 2, "ARP who-has {ip} sent on {}", link.interface.name);

        let deadline: Sleep = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                pkt = eth_handle.rx.recv() => {
                    let Some(bytes) = pkt else { break };
                    if let Some(reply) = matching_reply(&bytes, ip) {
                        return Ok(Some(reply));
                    }
                }
                _ = &mut deadline => break,
            }
        }

        Ok(None)
    }
}

fn matching_reply(frame: &[u8], target: Ipv4Addr) -> Option<MacAddr> {
    match arp::parse_reply(frame) {
        Ok(Some(reply)) if reply.sender_ip == target => Some(reply.sender_mac),
        Ok(_) => None,
        Err(e) => {
            debug!(verbosity = 2, "Dropping frame: {e}");
            None
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use wisp_common::models::detection::Status;

    const GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);
    const ROUTER_MAC: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22);
    const ATTACKER_MAC: MacAddr = MacAddr(0xde, 0xad, 0xbe, 0xef, 0x00, 0x01);

    /// Replays a fixed sequence of probe outcomes.
    struct ScriptedResolver {
        replies: Mutex<VecDeque<Result<Option<MacAddr>, ProbeError>>>,
    }

    impl ScriptedResolver {
        fn new(replies: Vec<Result<Option<MacAddr>, ProbeError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl HardwareResolver for ScriptedResolver {
        async fn resolve(&self, _ip: Ipv4Addr) -> Result<Option<MacAddr>, ProbeError> {
            self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn detector(replies: Vec<Result<Option<MacAddr>, ProbeError>>) -> ArpSpoofDetector {
        ArpSpoofDetector::new(ScriptedResolver::new(replies), Duration::ZERO)
    }

    #[tokio::test]
    async fn stable_gateway_is_safe() {
        let result = detector(vec![Ok(Some(ROUTER_MAC)), Ok(Some(ROUTER_MAC))])
            .detect(Some(GATEWAY))
            .await;
        assert_eq!(result.status(), Status::Safe);
        match result.evidence() {
            Some(Evidence::Gateway(binding)) => {
                assert_eq!(binding.gateway_ip, GATEWAY);
                assert_eq!(binding.gateway_mac, ROUTER_MAC);
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[tokio::test]
    async fn changed_mac_is_a_threat_with_both_addresses() {
        let result = detector(vec![Ok(Some(ROUTER_MAC)), Ok(Some(ATTACKER_MAC))])
            .detect(Some(GATEWAY))
            .await;
        assert_eq!(result.status(), Status::Threat);
        match result.evidence() {
            Some(Evidence::MacMismatch(mismatch)) => {
                assert_eq!(mismatch.expected_mac, ROUTER_MAC);
                assert_eq!(mismatch.received_mac, ATTACKER_MAC);
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_gateway_is_unknown() {
        let result = detector(vec![]).detect(None).await;
        assert_eq!(result.status(), Status::Unknown);
        assert_eq!(result.message(), "Unable to detect gateway IP");
    }

    #[tokio::test]
    async fn no_baseline_is_unknown_with_hint() {
        let result = detector(vec![Ok(None)]).detect(Some(GATEWAY)).await;
        assert_eq!(result.status(), Status::Unknown);
        assert_eq!(result.recommendation(), Some(NO_BASELINE_HINT));
    }

    #[tokio::test]
    async fn baseline_probe_error_is_unknown() {
        let err = ProbeError::PermissionDenied("sending ARP requests".into());
        let result = detector(vec![Err(err)]).detect(Some(GATEWAY)).await;
        assert_eq!(result.status(), Status::Unknown);
        assert!(result.message().contains("permission denied"));
    }

    #[tokio::test]
    async fn silent_follow_up_is_a_warning() {
        let result = detector(vec![Ok(Some(ROUTER_MAC)), Ok(None)])
            .detect(Some(GATEWAY))
            .await;
        assert_eq!(result.status(), Status::Warning);
        assert_eq!(result.message(), "No ARP reply from gateway");
    }

    #[test]
    fn only_replies_from_the_target_match() {
        let mut frame = vec![0u8; 60];
        {
            use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket};
            use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
            let mut eth = MutableEthernetPacket::new(&mut frame).unwrap();
            eth.set_ethertype(EtherTypes::Arp);
            let mut reply = MutableArpPacket::new(&mut frame[14..42]).unwrap();
            reply.set_hardware_type(ArpHardwareTypes::Ethernet);
            reply.set_protocol_type(EtherTypes::Ipv4);
            reply.set_hw_addr_len(6);
            reply.set_proto_addr_len(4);
            reply.set_operation(ArpOperations::Reply);
            reply.set_sender_hw_addr(ROUTER_MAC);
            reply.set_sender_proto_addr(GATEWAY);
        }
        assert_eq!(matching_reply(&frame, GATEWAY), Some(ROUTER_MAC));
        assert_eq!(matching_reply(&frame, Ipv4Addr::new(192, 168, 1, 2)), None);
    }

    #[tokio::test]
    #[ignore = "requires root privileges and a reachable gateway"]
    async fn resolves_real_gateway() {
        let resolver = PnetResolver::new(Duration::from_secs(3));
        let result = resolver.resolve(GATEWAY).await;
        assert!(result.is_ok());
    }
}
