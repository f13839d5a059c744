// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Thin wrapper around the 'tracing' crate.
//!
//! Every event carries a `status` field that the terminal formatter maps to a
//! symbol and color, so detectors can report "success" separately from plain
//! "info" without depending on the formatter.

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        tracing::info!(status = "info", $($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        tracing::info!(status = "success", $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        tracing::debug!(status = "debug", $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        tracing::error!(status = "error", $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        tracing::warn!(status = "warn", $($arg)+)
    };
}

/// Logs the outcome of a detector pass at a level matching its status.
///
/// `threat` is an error, `warning` a warning, `unknown` a plain info line
/// and `safe` a success.
#[macro_export]
macro_rules! verdict {
    ($detector:expr, $result:expr) => {{
        let result = &$result;
        match result.status() {
            $crate::models::detection::Status::Safe => {
                $crate::success!(detector = $detector, "{}", result.message())
            }
            $crate::models::detection::Status::Warning => {
                $crate::warn!(detector = $detector, "{}", result.message())
            }
            $crate::models::detection::Status::Threat => {
                $crate::error!(detector = $detector, "{}", result.message())
            }
            $crate::models::detection::Status::Unknown => {
                $crate::info!(detector = $detector, "{}", result.message())
            }
        }
    }};
}
