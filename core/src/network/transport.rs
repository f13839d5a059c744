// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use pnet::{
    packet::{Packet, ip::IpNextHeaderProtocols, udp::UdpPacket},
    transport::{self, TransportChannelType, TransportProtocol, TransportReceiver},
};
use std::io;
use std::net::IpAddr;
use tokio::sync::mpsc;

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_UDP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Udp));

#[cfg(unix)]
const READ_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(100);

/// A captured UDP datagram, already split into ports and payload.
#[derive(Debug, Clone)]
pub struct Datagram {
    pub source: IpAddr,
    pub source_port: u16,
    pub destination_port: u16,
    pub payload: Vec<u8>,
}

impl Datagram {
    fn from_packet(packet: &UdpPacket, source: IpAddr) -> Self {
        Self {
            source,
            source_port: packet.get_source(),
            destination_port: packet.get_destination(),
            payload: packet.payload().to_vec(),
        }
    }
}

pub struct TransportHandle {
    pub rx: mpsc::UnboundedReceiver<Datagram>,
}

/// Starts capturing inbound UDP on every interface.
///
/// The raw socket sees every datagram delivered to this host, so callers
/// filter by port themselves. Needs `CAP_NET_RAW` or equivalent.
pub fn start_udp_capture() -> io::Result<TransportHandle> {
    let (_tx, rx_socket) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_UDP)?;
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    spawn_udp_listener(queue_tx, rx_socket);
    Ok(TransportHandle { rx: queue_rx })
}

#[cfg(unix)]
fn spawn_udp_listener(queue_tx: mpsc::UnboundedSender<Datagram>, mut rx_socket: TransportReceiver) {
    std::thread::spawn(move || {
        let mut iterator = transport::udp_packet_iter(&mut rx_socket);
        loop {
            match iterator.next_with_timeout(READ_TIMEOUT) {
                Ok(Some((packet, source))) => {
                    if queue_tx.send(Datagram::from_packet(&packet, source)).is_err() {
                        break;
                    }
                }
                Ok(None) | Err(_) if queue_tx.is_closed() => break,
                Ok(None) | Err(_) => continue,
            }
        }
    });
}

// No timed reads on this platform, the thread lingers until the next datagram.
#[cfg(not(unix))]
fn spawn_udp_listener(queue_tx: mpsc::UnboundedSender<Datagram>, mut rx_socket: TransportReceiver) {
    std::thread::spawn(move || {
        let mut iterator = transport::udp_packet_iter(&mut rx_socket);
        loop {
            if let Ok((packet, source)) = iterator.next()
                && queue_tx.send(Datagram::from_packet(&packet, source)).is_err()
            {
                break;
            }
        }
    });
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
