// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::settings::{LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Watches addresses for incoming token deposits and announces them."
)]
pub(crate) struct WatcherArgs {
    /// Configuration file [default: `$HOME/.deposit-watcher/config.toml`]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// The coin records source fully qualified URL
    #[arg(long)]
    pub source: Option<Url>,

    /// Incoming webhook receiving deposit messages
    #[arg(long, env = "SLACK_WEBHOOK")]
    pub webhook: Option<Url>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Output log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Extra log filter directives, e.g. `reqwest=warn,deposit_watcher=debug`
    #[arg(long, env = "RUST_LOG", default_value = "")]
    pub log_filter: String,

    /// Logging output type
    #[arg(long, value_enum, default_value_t = LogFormat::Coloured)]
    pub log_type: LogFormat,
}
