// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Wisp CLI Entry Point
//!
//! Boots the tokio runtime and the tracing subscriber, maps the parsed flags
//! onto [`Config`], dispatches to the subcommand and turns any error that
//! bubbles up into a non-zero exit code.

mod commands;
mod terminal;

use std::process::ExitCode;

use wisp_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, all, detect, score, serve},
    terminal::{print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    spinner::init_logging(commands.verbosity);

    let cfg = Config::from(&commands);
    print::banner(&cfg);

    let result = match &commands.command {
        Commands::Serve { .. } => serve::serve(&cfg).await,
        Commands::Wifi => detect::wifi(&cfg).await,
        Commands::Arp => detect::arp(&cfg).await,
        Commands::Dns { .. } => detect::dns(&cfg).await,
        Commands::RogueAp => detect::rogue_ap(&cfg).await,
        Commands::Ports => detect::ports(&cfg).await,
        Commands::All => all::all(&cfg).await,
        Commands::Score { report } => score::score(report, &cfg),
    };

    let exit_code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    };

    print::end_of_program(&cfg);

    exit_code
}
