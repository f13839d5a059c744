// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Wire formats the detectors speak: ARP requests towards the gateway and
//! DNS responses observed on the local host.

pub mod arp;
pub mod dns;
pub mod utils;
