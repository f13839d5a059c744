// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! Argument schema for the `wisp` binary. Execution lives in the submodules;
//! this module only declares flags and maps them onto [`Config`] through
//! `From<&CommandLine>`, so the core crates never see `clap` types.
//!
//! Global flags (`--json`, `--redact`, `-q`, `-v`, `--no-banner`) apply to
//! every subcommand.

pub mod all;
pub mod detect;
pub mod score;
pub mod serve;

use std::net::SocketAddr;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use wisp_common::config::{Config, DEFAULT_DNS_WINDOW};

/// Default listening window of the `dns` subcommand, in seconds.
pub const CLI_DNS_WINDOW_SECS: u64 = 10;

#[derive(Parser)]
#[command(name = "wisp")]
#[command(about = "Checks whether the Wi-Fi network you are on can be trusted.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Print machine readable JSON instead of the styled report
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Reduce UI visual density (-q: reduce styling, -qq: one line per detector)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Redact sensitive info (MAC addresses, BSSIDs, SSIDs)
    #[arg(long = "redact", global = true)]
    pub redact: bool,

    /// Increase logging detail (-v: debug logs, -vv: every probe step)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the scan API over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Show the wireless network this machine is associated with
    #[command(alias = "w")]
    Wifi,

    /// Check the gateway for ARP spoofing
    Arp,

    /// Watch DNS responses for conflicting answers
    Dns {
        /// Listening window in seconds (1 to 30)
        #[arg(long, value_name = "SECS", default_value_t = CLI_DNS_WINDOW_SECS)]
        window: u64,
    },

    /// Look for SSIDs advertised by more than one access point
    #[command(name = "rogue-ap")]
    RogueAp,

    /// Scan the default gateway for open ports
    #[command(alias = "p")]
    Ports,

    /// Run every check and compute the threat score
    #[command(alias = "a")]
    All,

    /// Score a report given as JSON
    Score {
        #[arg(value_name = "JSON")]
        report: String,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        let mut cfg = Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            redact: cmd.redact,
            json: cmd.json,
            dns_window: DEFAULT_DNS_WINDOW,
            ..Self::default()
        };
        match &cmd.command {
            Commands::Serve { bind: Some(addr) } => cfg.bind = *addr,
            Commands::Dns { window } => cfg.dns_window = Duration::from_secs(*window),
            _ => {}
        }
        cfg
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
