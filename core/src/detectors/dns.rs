// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! **DNS spoofing** detection.
//!
//! DNS responses reaching this host are observed for a bounded window. The first
//! address seen for a domain becomes trusted; a later answer with an address
//! outside the trusted set raises one alert and is trusted from then on.
//!
//! Only domains resolved more than once inside the window are checked, so a
//! forgery that is consistent for the whole pass goes unnoticed.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use is_root::is_root;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::Sleep;

use wisp_common::config::clamp_dns_window;
use wisp_common::error::ProbeError;
use wisp_common::models::detection::{DetectionResult, DnsAlert, Evidence};
use wisp_common::utils::timing::CaptureWindow;
use wisp_common::{debug, warn};
use wisp_protocols::dns;
use wisp_protocols::utils::{DNS_HDR_LEN, DNS_PORT};

use crate::network::transport::{self, Datagram};

const ALERT_MESSAGE: &str = "Suspicious DNS response detected. May indicate an attack.";

/// One `domain -> address` observation taken from a DNS response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub domain: String,
    pub resolved_ip: IpAddr,
}

impl DnsAnswer {
    pub fn new(domain: impl Into<String>, resolved_ip: IpAddr) -> Self {
        Self {
            domain: domain.into(),
            resolved_ip,
        }
    }
}

/// Starts a capture of DNS responses.
///
/// Dropping the returned receiver must stop the capture.
#[async_trait]
pub trait DnsResponseSource: Send + Sync {
    async fn start(&self) -> Result<UnboundedReceiver<DnsAnswer>, ProbeError>;
}

/// Domain to trusted-addresses map, append-only for the lifetime of one pass.
#[derive(Debug, Default)]
pub struct DnsHistory {
    trusted: HashMap<String, Vec<IpAddr>>,
}

impl DnsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `answer`, returning an alert if it contradicts earlier answers.
    ///
    /// The alert carries the trusted set as it was before this answer.
    pub fn observe(&mut self, answer: &DnsAnswer) -> Option<DnsAlert> {
        let Some(known) = self.trusted.get_mut(&answer.domain) else {
            self.trusted
                .insert(answer.domain.clone(), vec![answer.resolved_ip]);
            return None;
        };

        if known.contains(&answer.resolved_ip) {
            return None;
        }

        let alert = DnsAlert {
            domain: answer.domain.clone(),
            old_ips: known.clone(),
            new_ip: answer.resolved_ip,
            message: ALERT_MESSAGE.to_string(),
        };
        known.push(answer.resolved_ip);
        Some(alert)
    }

    pub fn trusted(&self, domain: &str) -> Option<&[IpAddr]> {
        self.trusted.get(domain).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.trusted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trusted.is_empty()
    }
}

/// Explicit monitoring session owning its [`DnsHistory`].
///
/// [`DnsSpoofDetector::monitor`] creates a fresh session per call. Callers that
/// want a longer-lived view feed a session themselves.
#[derive(Debug, Default)]
pub struct DnsMonitorSession {
    history: DnsHistory,
    alerts: Vec<DnsAlert>,
    observed: usize,
}

impl DnsMonitorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, answer: &DnsAnswer) {
        self.observed += 1;
        if let Some(alert) = self.history.observe(answer) {
            warn!(
                "{} resolved to {} (previously {:?})",
                alert.domain, alert.new_ip, alert.old_ips
            );
            self.alerts.push(alert);
        }
    }

    pub fn alerts(&self) -> &[DnsAlert] {
        &self.alerts
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn history(&self) -> &DnsHistory {
        &self.history
    }

    /// Closes the session and produces its verdict.
    pub fn finish(self) -> DetectionResult {
        if self.alerts.is_empty() {
            return DetectionResult::safe("No DNS spoofing detected.")
                .with_recommendation("Wi-Fi appears safe for now.");
        }

        DetectionResult::warning("Possible DNS Spoofing Detected")
            .with_recommendation("Avoid entering sensitive information while using this Wi-Fi.")
            .with_evidence(Evidence::DnsAlerts(self.alerts))
    }
}

pub struct DnsSpoofDetector {
    source: Arc<dyn DnsResponseSource>,
}

impl DnsSpoofDetector {
    pub fn new(source: Arc<dyn DnsResponseSource>) -> Self {
        Self { source }
    }

    /// Observes responses for `window` (clamped to the supported range) and
    /// returns the verdict of a fresh session.
    pub async fn monitor(&self, window: Duration) -> DetectionResult {
        let mut answers: UnboundedReceiver<DnsAnswer> = match self.source.start().await {
            Ok(rx) => rx,
            Err(e) => {
                return DetectionResult::unknown(format!("DNS sniffing unavailable: {e}"))
                    .with_recommendation(
                        "Run with appropriate permissions (root / Administrator) to capture DNS traffic.",
                    );
            }
        };

        let mut window: CaptureWindow = CaptureWindow::new(clamp_dns_window(window));
        let mut session = DnsMonitorSession::new();

        let deadline: Sleep = tokio::time::sleep(window.remaining());
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                answer = answers.recv() => {
                    let Some(answer) = answer else { break };
                    window.mark_seen();
                    session.observe(&answer);
                }
                _ = &mut deadline => break,
            }
        }

        debug!(
            verbosity = 1,
            "DNS window closed after {:.1}s, {} responses, {} domains",
            window.elapsed().as_secs_f64(),
            window.observed(),
            session.history().len()
        );
        session.finish()
    }
}

/// Captures DNS responses from a raw UDP socket.
#[derive(Debug, Default)]
pub struct PnetDnsSource;

#[async_trait]
impl DnsResponseSource for PnetDnsSource {
    async fn start(&self) -> Result<UnboundedReceiver<DnsAnswer>, ProbeError> {
        if !is_root() {
            return Err(ProbeError::PermissionDenied(
                "capturing DNS responses".to_string(),
            ));
        }

        let mut handle = transport::start_udp_capture()
            .map_err(|e| ProbeError::from_io("opening UDP capture", e))?;
        let (answer_tx, answer_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    datagram = handle.rx.recv() => {
                        let Some(datagram) = datagram else { break };
                        if let Some(answer) = decode(&datagram)
                            && answer_tx.send(answer).is_err()
                        {
                            break;
                        }
                    }
                    _ = answer_tx.closed() => break,
                }
            }
        });

        Ok(answer_rx)
    }
}

fn decode(datagram: &Datagram) -> Option<DnsAnswer> {
    if datagram.source_port != DNS_PORT || datagram.payload.len() < DNS_HDR_LEN {
        return None;
    }

    match dns::extract_answer(&datagram.payload) {
        Ok(Some(resolved)) => Some(DnsAnswer::new(resolved.domain, resolved.address)),
        Ok(None) => None,
        Err(e) => {
            debug!(verbosity = 2, "Skipping DNS payload from {}: {e}", datagram.source);
            None
        }
    }
}

/// Feeds a fixed list of answers, then closes the channel.
///
/// Useful for replaying captures and for exercising the detector without
/// raw sockets.
#[derive(Debug, Default, Clone)]
pub struct ReplaySource {
    answers: Vec<DnsAnswer>,
}

impl ReplaySource {
    pub fn new(answers: Vec<DnsAnswer>) -> Self {
        Self { answers }
    }
}

#[async_trait]
impl DnsResponseSource for ReplaySource {
    async fn start(&self) -> Result<UnboundedReceiver<DnsAnswer>, ProbeError> {
        let (tx, rx) = mpsc::unbounded_channel();
        for answer in &self.answers {
            let _ = tx.send(answer.clone());
        }
        Ok(rx)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use wisp_common::models::detection::Status;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(93, 184, 216, last))
    }

    struct BrokenSource;

    #[async_trait]
    impl DnsResponseSource for BrokenSource {
        async fn start(&self) -> Result<UnboundedReceiver<DnsAnswer>, ProbeError> {
            Err(ProbeError::PermissionDenied("capturing DNS responses".into()))
        }
    }

    #[test]
    fn first_answer_is_trusted_silently() {
        let mut history = DnsHistory::new();
        assert!(history.observe(&DnsAnswer::new("example.com", ip(1))).is_none());
        assert_eq!(history.trusted("example.com"), Some(&[ip(1)][..]));
    }

    #[test]
    fn new_address_alerts_once_with_previous_set() {
        let mut history = DnsHistory::new();
        history.observe(&DnsAnswer::new("example.com", ip(1)));

        let alert = history
            .observe(&DnsAnswer::new("example.com", ip(2)))
            .expect("second address must alert");
        assert_eq!(alert.old_ips, vec![ip(1)]);
        assert_eq!(alert.new_ip, ip(2));
        assert_eq!(alert.message, ALERT_MESSAGE);

        assert!(history.observe(&DnsAnswer::new("example.com", ip(2))).is_none());
        assert!(history.observe(&DnsAnswer::new("example.com", ip(1))).is_none());
    }

    #[test]
    fn old_ips_snapshot_excludes_the_new_address() {
        let mut history = DnsHistory::new();
        history.observe(&DnsAnswer::new("example.com", ip(1)));
        history.observe(&DnsAnswer::new("example.com", ip(2)));
        let alert = history
            .observe(&DnsAnswer::new("example.com", ip(3)))
            .unwrap();
        assert_eq!(alert.old_ips, vec![ip(1), ip(2)]);
    }

    #[test]
    fn domains_are_tracked_independently() {
        let mut history = DnsHistory::new();
        history.observe(&DnsAnswer::new("a.example", ip(1)));
        assert!(history.observe(&DnsAnswer::new("b.example", ip(2))).is_none());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn empty_session_is_safe() {
        let result = DnsMonitorSession::new().finish();
        assert_eq!(result.status(), Status::Safe);
        assert_eq!(result.message(), "No DNS spoofing detected.");
    }

    #[tokio::test]
    async fn conflicting_answers_produce_a_warning() {
        let source = ReplaySource::new(vec![
            DnsAnswer::new("example.com", ip(1)),
            DnsAnswer::new("example.com", ip(2)),
            DnsAnswer::new("example.com", ip(2)),
        ]);
        let result = DnsSpoofDetector::new(Arc::new(source))
            .monitor(Duration::from_secs(2))
            .await;

        assert_eq!(result.status(), Status::Warning);
        match result.evidence() {
            Some(Evidence::DnsAlerts(alerts)) => {
                assert_eq!(alerts.len(), 1);
                assert_eq!(alerts[0].domain, "example.com");
            }
            other => panic!("unexpected evidence: {other:?}"),
        }
    }

    /// Hands out a different capture on every start.
    struct PassPerStart {
        passes: std::sync::Mutex<Vec<Vec<DnsAnswer>>>,
    }

    #[async_trait]
    impl DnsResponseSource for PassPerStart {
        async fn start(&self) -> Result<UnboundedReceiver<DnsAnswer>, ProbeError> {
            let answers = self.passes.lock().unwrap().remove(0);
            ReplaySource::new(answers).start().await
        }
    }

    #[tokio::test]
    async fn every_pass_starts_with_fresh_history() {
        let source = PassPerStart {
            passes: std::sync::Mutex::new(vec![
                vec![DnsAnswer::new("example.com", ip(1))],
                vec![DnsAnswer::new("example.com", ip(2))],
            ]),
        };
        let detector = DnsSpoofDetector::new(Arc::new(source));
        assert_eq!(detector.monitor(Duration::from_secs(1)).await.status(), Status::Safe);
        assert_eq!(detector.monitor(Duration::from_secs(1)).await.status(), Status::Safe);
    }

    #[tokio::test]
    async fn capture_failure_is_unknown() {
        let result = DnsSpoofDetector::new(Arc::new(BrokenSource))
            .monitor(Duration::from_secs(1))
            .await;
        assert_eq!(result.status(), Status::Unknown);
        assert!(result.message().starts_with("DNS sniffing unavailable:"));
        assert!(result.recommendation().is_some());
    }

    #[test]
    fn only_port_53_responses_are_decoded() {
        let datagram = Datagram {
            source: ip(53),
            source_port: 5353,
            destination_port: 40_000,
            payload: vec![0u8; 32],
        };
        assert!(decode(&datagram).is_none());
    }
}
