// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use is_root::is_root;
use wisp_common::{config::Config, info, warn};

use crate::terminal::print;

pub async fn serve(cfg: &Config) -> anyhow::Result<()> {
    print::header("starting api server", cfg);
    if !is_root() {
        warn!("Not running as root: ARP and DNS checks will report 'unknown'");
    }
    info!("Press Ctrl+C to stop");
    wisp_server::serve(cfg.clone()).await
}
