// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::{Duration, Instant};

/// Hard deadline for a bounded capture or probe.
///
/// Capture loops sleep on [`CaptureWindow::remaining`] and stop once it
/// reaches zero, keeping whatever was observed so far.
#[derive(Debug, Clone, Copy)]
pub struct CaptureWindow {
    started: Instant,
    deadline: Instant,
    observed: usize,
}

impl CaptureWindow {
    pub fn new(length: Duration) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            deadline: now + length,
            observed: 0,
        }
    }

    /// Counts one relevant packet.
    pub fn mark_seen(&mut self) {
        self.observed += 1;
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
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

    #[test]
    fn zero_length_window_is_expired_immediately() {
        let window = CaptureWindow::new(Duration::ZERO);
        assert!(window.is_expired());
        assert_eq!(window.remaining(), Duration::ZERO);
    }

    #[test]
    fn window_counts_observations() {
        let mut window = CaptureWindow::new(Duration::from_secs(60));
        assert!(!window.is_expired());
        window.mark_seen();
        window.mark_seen();
        assert_eq!(window.observed(), 2);
        assert!(window.remaining() <= Duration::from_secs(60));
    }
}
