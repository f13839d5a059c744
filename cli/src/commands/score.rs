// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::{Context, ensure};
use serde_json::Value;
use wisp_common::config::Config;
use wisp_common::models::report::ThreatReport;
use wisp_core::scoring::ThreatScorer;

use crate::terminal::print;

/// Parses `report` and scores it. Only JSON objects are accepted.
pub fn score_report(report: &str) -> anyhow::Result<ThreatReport> {
    let value: Value = serde_json::from_str(report).context("report is not valid JSON")?;
    ensure!(value.is_object(), "report must be a JSON object");
    Ok(ThreatScorer.score_json(&value))
}

pub fn score(report: &str, cfg: &Config) -> anyhow::Result<()> {
    let threat: ThreatReport = score_report(report)?;
    if cfg.json {
        return print::json(&threat);
    }
    print::threat_report(&threat, cfg);
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
