// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Detection Result Model
//!
//! This module defines [`DetectionResult`], the single output shape shared by every
//! detector (ARP, DNS, rogue AP) and by degraded orchestrator steps.
//!
//! ## Key Concepts
//! * **Four verdicts**: `safe`, `warning`, `threat` and `unknown`. Serialized as a flat
//!   JSON object with a lowercase `status` field next to the message.
//! * **Unknown is not safe**: it means the probe could not run (privileges, missing
//!   tool, no connectivity) and says nothing about the network.
//! * **Evidence**: optional structured data backing the verdict, e.g. the expected and
//!   received gateway MAC or the list of suspicious DNS answers.

use std::net::{IpAddr, Ipv4Addr};

use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

use crate::error::ProbeError;
use crate::utils::mac;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Warning,
    Threat,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Warning => "warning",
            Status::Threat => "threat",
            Status::Unknown => "unknown",
        }
    }
}

/// Message, hint and evidence attached to every verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

impl Finding {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recommendation: None,
            evidence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DetectionResult {
    Safe(Finding),
    Warning(Finding),
    Threat(Finding),
    Unknown(Finding),
}

impl DetectionResult {
    pub fn safe(message: impl Into<String>) -> Self {
        Self::Safe(Finding::new(message))
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning(Finding::new(message))
    }

    pub fn threat(message: impl Into<String>) -> Self {
        Self::Threat(Finding::new(message))
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(Finding::new(message))
    }

    /// Degrades a probe failure into an `unknown` verdict, keeping the
    /// remediation hint of the error if it has one.
    pub fn from_error(err: &ProbeError) -> Self {
        let result = Self::unknown(err.to_string());
        match err.remediation() {
            Some(hint) => result.with_recommendation(hint),
            None => result,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.finding_mut().recommendation = Some(recommendation.into());
        self
    }

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.finding_mut().evidence = Some(evidence);
        self
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Safe(_) => Status::Safe,
            Self::Warning(_) => Status::Warning,
            Self::Threat(_) => Status::Threat,
            Self::Unknown(_) => Status::Unknown,
        }
    }

    pub fn finding(&self) -> &Finding {
        match self {
            Self::Safe(f) | Self::Warning(f) | Self::Threat(f) | Self::Unknown(f) => f,
        }
    }

    fn finding_mut(&mut self) -> &mut Finding {
        match self {
            Self::Safe(f) | Self::Warning(f) | Self::Threat(f) | Self::Unknown(f) => f,
        }
    }

    pub fn message(&self) -> &str {
        &self.finding().message
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.finding().recommendation.as_deref()
    }

    pub fn evidence(&self) -> Option<&Evidence> {
        self.finding().evidence.as_ref()
    }

    /// True for the verdicts that count as a positive signal when scoring.
    pub fn is_detected(&self) -> bool {
        matches!(self.status(), Status::Warning | Status::Threat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Evidence {
    Gateway(GatewayBinding),
    MacMismatch(MacMismatch),
    DnsAlerts(Vec<DnsAlert>),
    RogueAps(Vec<RogueApAlert>),
}

/// The gateway answered both ARP samples with the same hardware address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayBinding {
    pub gateway_ip: Ipv4Addr,
    #[serde(serialize_with = "mac::serialize")]
    pub gateway_mac: MacAddr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

/// The gateway's hardware address changed between the two ARP samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacMismatch {
    pub gateway_ip: Ipv4Addr,
    #[serde(serialize_with = "mac::serialize")]
    pub expected_mac: MacAddr,
    #[serde(serialize_with = "mac::serialize")]
    pub received_mac: MacAddr,
}

/// A domain resolved to an address that was not trusted earlier in the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsAlert {
    pub domain: String,
    /// Trusted addresses as they were right before this answer arrived.
    pub old_ips: Vec<IpAddr>,
    pub new_ip: IpAddr,
    pub message: String,
}

/// One SSID advertised by more than one BSSID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RogueApAlert {
    pub ssid: String,
    pub bssids: Vec<String>,
    pub count: usize,
    pub alert: String,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
