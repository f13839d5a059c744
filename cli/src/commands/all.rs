// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::Instant;

use colored::*;
use wisp_common::config::Config;
use wisp_common::models::scan::{FullScan, StepOutcome};
use wisp_common::success;
use wisp_core::scanner::ScanOrchestrator;

use crate::commands::detect::print_ports;
use crate::terminal::{colors, format, print, spinner::spin_while};

pub async fn all(cfg: &Config) -> anyhow::Result<()> {
    let scanner = ScanOrchestrator::system(cfg.clone());
    let start_time: Instant = Instant::now();
    let report: FullScan = spin_while(cfg, "Running every check", scanner.scan_all()).await;

    if cfg.json {
        return print::json(&report);
    }

    match &report.wifi_info {
        StepOutcome::Completed(wifi) => {
            print::header("wireless network", cfg);
            print::as_tree(&format::wifi_to_details(wifi, cfg.redact));
        }
        StepOutcome::Degraded(result) => print::detection("wireless network", result, cfg),
    }
    print::detection("arp spoofing", &report.arp_spoofing, cfg);
    print::detection("dns spoofing", &report.dns_spoofing, cfg);
    print::detection("rogue access points", &report.rogue_ap, cfg);
    print_ports("open ports", &report.open_ports, cfg);
    print::threat_report(&report.threat_score, cfg);

    if cfg.quiet == 1 {
        let elapsed = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
        success!(
            "{}",
            format!("Assessment complete in {elapsed}").color(colors::TEXT_DEFAULT)
        );
    }
    Ok(())
}
