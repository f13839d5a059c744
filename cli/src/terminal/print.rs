// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;
use wisp_common::config::Config;
use wisp_common::models::detection::DetectionResult;
use wisp_common::models::report::ThreatReport;

use crate::terminal::colors;
use crate::terminal::format::{self, Detail};

pub const TOTAL_WIDTH: usize = 64;

/// Prints one raw line through the tracing pipeline, above any spinner.
#[macro_export]
macro_rules! wprint {
    () => {
        $crate::wprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "wisp::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

const BANNER: &str = r#"
        __      __ _
        \ \    / /(_) ___ _ __
         \ \/\/ / | |(_-<| '_ \
          \_/\_/  |_|/__/| .__/
                         |_|
"#;

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet > 0 || cfg.json {
        return;
    }

    let text_content: String = format!("⟦ WISP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .bright_black();

    wprint!("{}{}{}", sep, text, sep);
    wprint!("{}", BANNER.trim_end_matches('\n').color(colors::SECONDARY));
}

pub fn header(msg: &str, cfg: &Config) {
    if cfg.json || cfg.quiet > 1 {
        return;
    }
    if cfg.quiet > 0 {
        wprint!();
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    wprint!("{}", line);
}

pub fn fat_separator() {
    wprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
}

pub fn end_of_program(cfg: &Config) {
    if cfg.quiet > 0 || cfg.json {
        return;
    }
    fat_separator();
}

pub fn as_tree(details: &[Detail]) {
    let padding_width: usize = details.iter().map(|(k, _)| k.width()).max().unwrap_or(0);

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.width());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        wprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    wprint!("{}{}{}", space, msg, space);
}

/// Pretty JSON on stdout, for piping into other tools.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One detector verdict: a titled tree, or a single line with `-qq`.
pub fn detection(title: &str, result: &DetectionResult, cfg: &Config) {
    if cfg.quiet > 1 {
        wprint!(
            "{} {} {}",
            title.to_lowercase().replace(' ', "_"),
            result.status().as_str(),
            result.message()
        );
        return;
    }
    header(title, cfg);
    as_tree(&format::result_to_details(result, cfg.redact));
}

pub fn threat_report(report: &ThreatReport, cfg: &Config) {
    if cfg.quiet > 1 {
        wprint!("threat_score {} {}", report.score, report.level);
        return;
    }

    header("threat score", cfg);
    let mut details: Vec<Detail> = vec![
        ("Score".to_string(), report.score.to_string().bold()),
        ("Level".to_string(), format::level_label(report.level)),
    ];
    details.extend(
        report
            .reasons
            .iter()
            .map(|reason| ("Reason".to_string(), reason.color(colors::TEXT_DEFAULT))),
    );
    as_tree(&details);

    if cfg.quiet == 0 {
        fat_separator();
        centerln(&report.recommendation.color(colors::PRIMARY).bold().to_string());
    } else {
        wprint!("{}", report.recommendation);
    }
}
