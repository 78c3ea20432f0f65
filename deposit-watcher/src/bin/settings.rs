// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fmt;

use deposit_watcher::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use url::Url;

use crate::args::WatcherArgs;

#[derive(clap::ValueEnum, Debug, Clone)]
pub(crate) enum LogFormat {
    Json,
    Plain,
    Coloured,
}

#[derive(clap::ValueEnum, Debug, Clone)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug)]
pub(crate) struct Logging {
    /// Default log level
    pub level: LogLevel,
    /// Filter directives on top of the level
    pub filter: String,
    /// Log format
    pub format: LogFormat,
}

impl Logging {
    pub fn args(args: &WatcherArgs) -> Self {
        Self {
            level: args.log_level.clone(),
            filter: args.log_filter.clone(),
            format: args.log_type.clone(),
        }
    }

    /// The filter directives with the level as default
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        let level: Level = (&self.level).into();
        Ok(EnvFilter::try_new(&self.filter)?.add_directive(level.into()))
    }
}

/// Apply the command line overrides to the loaded configuration
pub(crate) fn apply_overrides(
    mut config: Config,
    args: &WatcherArgs,
) -> Config {
    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(webhook) = &args.webhook {
        config.webhook = Some(webhook.clone());
    }
    config
}

/// Webhook without its secret path, safe to log
pub(crate) fn redacted(webhook: &Url) -> String {
    let host = webhook.host_str().unwrap_or_default();
    format!("{}://{host}/***", webhook.scheme())
}

impl From<&LogLevel> for Level {
    fn from(level: &LogLevel) -> Level {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Json => "json",
                Self::Plain => "plain",
                Self::Coloured => "coloured",
            }
        )
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Trace => "trace",
                Self::Debug => "debug",
                Self::Info => "info",
                Self::Warn => "warn",
                Self::Error => "error",
            }
        )
    }
}

impl fmt::Display for Logging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logging: [{}] ({})", self.level, self.format)
    }
}
