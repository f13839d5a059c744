// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use crate::utils::{ARP_LEN, ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS};
use anyhow::Context;
use pnet::datalink::MacAddr;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use std::net::Ipv4Addr;

/// Sender of an ARP reply, i.e. who claims to own `sender_ip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpReply {
    pub sender_ip: Ipv4Addr,
    pub sender_mac: MacAddr,
}

/// Builds a broadcast "who-has `dst_addr`" frame, padded to the Ethernet minimum.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut frame: Vec<u8> = vec![0u8; MIN_ETH_FRAME_NO_FCS];
    {
        let mut eth: MutableEthernetPacket = MutableEthernetPacket::new(&mut frame)
            .context("failed to create mutable Ethernet packet")?;
        eth.set_source(src_mac);
        eth.set_destination(MacAddr::broadcast());
        eth.set_ethertype(EtherTypes::Arp);
    }
    {
        let mut arp_packet: MutableArpPacket =
            MutableArpPacket::new(&mut frame[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
                .context("failed to create mutable ARP packet")?;
        arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp_packet.set_protocol_type(EtherTypes::Ipv4);
        arp_packet.set_hw_addr_len(6);
        arp_packet.set_proto_addr_len(4);
        arp_packet.set_operation(ArpOperations::Request);
        arp_packet.set_sender_hw_addr(src_mac);
        arp_packet.set_target_hw_addr(MacAddr::zero());
        arp_packet.set_sender_proto_addr(src_addr);
        arp_packet.set_target_proto_addr(dst_addr);
    }
    Ok(frame)
}

/// Extracts the sender of an ARP reply from a raw Ethernet frame.
///
/// Returns `Ok(None)` for frames that are valid but not ARP replies, so capture
/// loops can skip unrelated traffic without treating it as an error.
pub fn parse_reply(frame_bytes: &[u8]) -> anyhow::Result<Option<ArpReply>> {
    let eth_packet: EthernetPacket =
        EthernetPacket::new(frame_bytes).context("truncated or invalid Ethernet frame")?;
    if eth_packet.get_ethertype() != EtherTypes::Arp {
        return Ok(None);
    }

    let arp_packet: ArpPacket = ArpPacket::new(eth_packet.payload()).context(format!(
        "truncated or invalid ARP packet (payload len {})",
        eth_packet.payload().len()
    ))?;
    if arp_packet.get_operation() != ArpOperations::Reply {
        return Ok(None);
    }

    Ok(Some(ArpReply {
        sender_ip: arp_packet.get_sender_proto_addr(),
        sender_mac: arp_packet.get_sender_hw_addr(),
    }))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
