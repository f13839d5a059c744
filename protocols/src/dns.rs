// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::{Context, Result};
use dns_parser::{Packet, RData};
use std::net::IpAddr;

/// A single `domain -> address` binding carried by a DNS response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub domain: String,
    pub address: IpAddr,
}

/// Pulls the first question name and the first A/AAAA answer out of a DNS response.
///
/// Queries and responses without an address record yield `Ok(None)`. The domain
/// is lowercased and any trailing dot is removed so that `Example.com.` and
/// `example.com` land in the same history bucket.
pub fn extract_answer(payload: &[u8]) -> Result<Option<ResolvedName>> {
    let packet: Packet = Packet::parse(payload).context("Failed to parse DNS packet")?;
    if packet.header.query {
        return Ok(None);
    }

    let Some(question) = packet.questions.first() else {
        return Ok(None);
    };
    let domain: String = normalize_domain(&question.qname.to_string());
    if domain.is_empty() {
        return Ok(None);
    }

    let address: Option<IpAddr> = packet.answers.iter().find_map(|record| match record.data {
        RData::A(a) => Some(IpAddr::V4(a.0)),
        RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
        _ => None,
    });

    Ok(address.map(|address| ResolvedName { domain, address }))
}

fn normalize_domain(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
