// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Terminal UI & Logging
//!
//! Wires `tracing` to stderr through [`WispFormatter`](crate::terminal::logging::WispFormatter)
//! and keeps log lines above the progress spinner.
//!
//! The spinner runs in its own tokio task and alternates between a status line
//! (what is being probed, elapsed seconds) and a rotating Wi-Fi safety tip:
//!
//! * **0s - 2s**: status
//! * **2s - 5s**: tip
//! * **Repeat**

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::{IndicatifLayer, span_ext::IndicatifSpanExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wisp_common::{config::Config, insights};

use crate::terminal::{colors, logging};

/// Total length of one text cycle (Status + Tip).
const CYCLE_MS: u128 = 5000;
/// How long the status message stays visible at the start of a cycle.
const STATUS_MS: u128 = 2000;

const TICKS: &[&str] = &["▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"];

/// Installs the global subscriber: env filter, [`logging::WispFormatter`]
/// and the indicatif layer that owns the spinner line.
pub fn init_logging(verbosity: u8) {
    let style: ProgressStyle = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS);
    let indicatif_layer = IndicatifLayer::new().with_progress_style(style);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wisp=debug,wisp_core=debug,mio=error"));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .event_format(logging::WispFormatter {
            max_verbosity: verbosity,
        })
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(formatting_layer)
        .with(indicatif_layer)
        .init();
}

async fn run_spinner_loop<F>(span: Span, running: Arc<AtomicBool>, status_fn: F)
where
    F: Fn(Duration) -> ColoredString + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let start_time = tokio::time::Instant::now();
    let mut last_text = String::new();

    let active_insights: Vec<&'static str> = insights::get_shuffled_insights();

    while running.load(Ordering::Relaxed) {
        interval.tick().await;

        let elapsed = start_time.elapsed();
        let elapsed_ms: u128 = elapsed.as_millis();
        let tip = active_insights
            .get((elapsed_ms / CYCLE_MS) as usize % active_insights.len().max(1))
            .copied();

        let colored_msg: ColoredString = match tip {
            Some(tip) if elapsed_ms % CYCLE_MS >= STATUS_MS => {
                tip.italic().color(colors::TEXT_DEFAULT)
            }
            _ => status_fn(elapsed),
        };

        let current_text = colored_msg.to_string();
        if current_text != last_text {
            span.pb_set_message(&current_text);
            last_text = current_text;
        }
    }
}

/// Keeps the spinner alive until dropped.
pub struct SpinnerGuard {
    running: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl SpinnerGuard {
    pub fn with_status<F>(span: Span, status_fn: F) -> Self
    where
        F: Fn(Duration) -> ColoredString + Send + Sync + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let run_clone = running.clone();

        let handle = tokio::spawn(async move {
            run_spinner_loop(span, run_clone, status_fn).await;
        });

        Self { running, handle }
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.handle.abort();
    }
}

fn start(label: &'static str) -> SpinnerGuard {
    let span = info_span!("probe", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), move |elapsed| {
        format!("{label} ({}s)", elapsed.as_secs())
            .color(colors::TEXT_DEFAULT)
            .italic()
    })
}

/// Awaits `fut` with a spinner showing `label`.
///
/// The spinner is skipped in JSON and raw modes so stdout stays clean.
pub async fn spin_while<F: Future>(cfg: &Config, label: &'static str, fut: F) -> F::Output {
    if cfg.json || cfg.quiet > 1 {
        return fut.await;
    }
    let _guard: SpinnerGuard = start(label);
    fut.await
}
