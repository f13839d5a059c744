// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

use crate::debug;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// None of the interface's IPv4 networks contains the target.
    NotOnLink,
}

/// Everything needed to put an ARP request for `target` on the wire.
#[derive(Debug, Clone)]
pub struct LinkContext {
    pub interface: NetworkInterface,
    pub local_mac: MacAddr,
    pub local_net: Ipv4Network,
}

/// Finds the interface that can reach `target` at layer 2.
pub fn find_link_for(target: Ipv4Addr) -> Option<LinkContext> {
    select_link(datalink::interfaces(), target)
}

fn select_link(interfaces: Vec<NetworkInterface>, target: Ipv4Addr) -> Option<LinkContext> {
    interfaces.into_iter().find_map(|intf| {
        match is_viable_for(&intf, target) {
            Ok(local_net) => {
                let local_mac = intf.mac?;
                Some(LinkContext {
                    interface: intf,
                    local_mac,
                    local_net,
                })
            }
            Err(reason) => {
                debug!(verbosity = 2, "Skipping interface {}: {reason:?}", intf.name);
                None
            }
        }
    })
}

fn is_viable_for(
    interface: &NetworkInterface,
    target: Ipv4Addr,
) -> Result<Ipv4Network, ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.mac.is_none() || interface.mac == Some(MacAddr::zero()) {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }

    interface
        .ips
        .iter()
        .find_map(|net| match net {
            IpNetwork::V4(v4) if v4.contains(target) => Some(*v4),
            _ => None,
        })
        .ok_or(ViabilityError::NotOnLink)
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

    const IFF_UP: u32 = 1;
    const IFF_BROADCAST: u32 = 1 << 1;
    const IFF_LOOPBACK: u32 = 1 << 3;
    const IFF_POINTTOPOINT: u32 = 1 << 4;

    fn mock_interface(name: &str, flags: u32, cidr: &str, mac: Option<MacAddr>) -> NetworkInterface {
        NetworkInterface {
            name: name.to_string(),
            description: String::new(),
            index: 1,
            mac,
            ips: vec![cidr.parse().unwrap()],
            flags,
        }
    }

    fn wlan_mac() -> Option<MacAddr> {
        Some(MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01))
    }

    #[test]
    fn picks_interface_on_the_gateway_subnet() {
        let interfaces = vec![
            mock_interface("eth0", IFF_UP | IFF_BROADCAST, "10.0.0.5/24", wlan_mac()),
            mock_interface("wlan0", IFF_UP | IFF_BROADCAST, "192.168.1.42/24", wlan_mac()),
        ];
        let link = select_link(interfaces, Ipv4Addr::new(192, 168, 1, 1)).unwrap();
        assert_eq!(link.interface.name, "wlan0");
        assert_eq!(link.local_net.ip(), Ipv4Addr::new(192, 168, 1, 42));
    }

    #[test]
    fn rejects_down_loopback_and_tunnels() {
        let target = Ipv4Addr::new(10, 8, 0, 1);
        let down = mock_interface("wlan0", IFF_BROADCAST, "10.8.0.2/24", wlan_mac());
        let lo = mock_interface("lo", IFF_UP | IFF_LOOPBACK, "10.8.0.2/24", wlan_mac());
        let tun = mock_interface("tun0", IFF_UP | IFF_POINTTOPOINT, "10.8.0.2/24", wlan_mac());
        let no_mac = mock_interface("wlan1", IFF_UP | IFF_BROADCAST, "10.8.0.2/24", None);

        assert_eq!(is_viable_for(&down, target), Err(ViabilityError::IsDown));
        assert_eq!(is_viable_for(&lo, target), Err(ViabilityError::IsLoopback));
        assert_eq!(is_viable_for(&tun, target), Err(ViabilityError::NotBroadcast));
        assert_eq!(is_viable_for(&no_mac, target), Err(ViabilityError::NoMacAddress));
    }

    #[test]
    fn off_link_target_has_no_interface() {
        let interfaces = vec![mock_interface(
            "wlan0",
            IFF_UP | IFF_BROADCAST,
            "192.168.1.42/24",
            wlan_mac(),
        )];
        assert!(select_link(interfaces, Ipv4Addr::new(172, 16, 0, 1)).is_none());
    }
}
