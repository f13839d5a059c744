// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Failure taxonomy shared by every probe and collaborator.
//!
//! Detectors never let these escape: each variant is turned into an `unknown`
//! (or `warning`) [`DetectionResult`](crate::models::detection::DetectionResult)
//! carrying [`ProbeError::to_string`] and [`ProbeError::remediation`].

use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// Raw sockets or capture devices require elevated privileges.
    #[error("permission denied while {0}")]
    PermissionDenied(String),

    /// An external binary (nmap, nmcli, netsh, ...) is missing.
    #[error("'{0}' is not installed or not on PATH")]
    ToolUnavailable(String),

    #[error("no default gateway found")]
    NoGatewayFound,

    #[error("{probe} did not finish within {}s", .after.as_secs_f64())]
    ProbeTimeout { probe: &'static str, after: Duration },

    /// A collaborator produced output we could not make sense of.
    #[error("unexpected output from {tool}: {reason}")]
    ParseFailure { tool: String, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProbeError {
    /// Maps an I/O failure, promoting `EPERM`/`EACCES` to [`ProbeError::PermissionDenied`]
    /// and a missing executable to [`ProbeError::ToolUnavailable`].
    pub fn from_io(context: impl Into<String>, err: io::Error) -> Self {
        let context: String = context.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(context),
            io::ErrorKind::NotFound => Self::ToolUnavailable(context),
            _ => Self::Io {
                context,
                source: err,
            },
        }
    }

    pub fn parse(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// A short hint on how the operator can make the probe work.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied(_) => {
                Some("Run with elevated privileges (root / Administrator) to enable raw sockets")
            }
            Self::ToolUnavailable(_) => {
                Some("Install the missing tool or make sure it is on PATH")
            }
            Self::NoGatewayFound => Some("Check that you are connected to a network"),
            Self::ProbeTimeout { .. } => Some("Retry the scan, the network may be congested"),
            Self::ParseFailure { .. } | Self::Io { .. } | Self::Other(_) => None,
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
