// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Watcher configuration, read from a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;
use tracing::warn;
use url::Url;
use watcher_core::address;

use crate::{Error, Token};

/// The configuration written on first start when none exists
pub const DEFAULT_CONFIG: &str = include_str!("../default.config.toml");

const DEFAULT_POLL_INTERVAL: u64 = 15;
const DEFAULT_REQUEST_TIMEOUT: u64 = 10;
const DEFAULT_PREFIX: &str = "xch";

/// A token entry of the configuration file
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    /// Ticker
    pub symbol: String,
    /// Human readable name
    pub name: String,
    /// Hex encoded tail
    pub tail: String,
    /// Base units per display unit
    pub scale: u64,
}

/// Config holds the settings of the watcher
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Coin records source endpoint
    pub source: Url,
    /// Seconds between poll cycles
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    /// Seconds before a request is abandoned
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Whether the source should list spent coins too
    #[serde(default = "default_include_spent_coins")]
    pub include_spent_coins: bool,
    /// Expected address prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Addresses to watch
    #[serde(default)]
    pub addresses: Vec<String>,
    /// Explorer prefix used to link coins
    #[serde(default)]
    pub explorer: Option<String>,
    /// Incoming webhook receiving deposit messages
    #[serde(default)]
    pub webhook: Option<Url>,
    /// Tokens to watch
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_include_spent_coins() -> bool {
    true
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    fs::read_to_string(&path)
        .map(Some)
        .or_else(|e| match e.kind() {
            io::ErrorKind::NotFound => Ok(None),
            _ => Err(e),
        })
}

fn write_default(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)
}

impl Config {
    /// Default location of the configuration file,
    /// `$HOME/.deposit-watcher/config.toml`
    ///
    /// # Errors
    /// Returns [`Error::OsNotSupported`] if there is no home directory.
    pub fn default_path() -> Result<PathBuf, Error> {
        let mut path = dirs::home_dir().ok_or(Error::OsNotSupported)?;
        path.push(".deposit-watcher");
        path.push("config.toml");
        Ok(path)
    }

    /// Attempt to load configuration from file.
    ///
    /// An explicitly given file must exist. Without one, the default
    /// location is used, and the embedded default configuration is written
    /// there if nothing exists yet.
    ///
    /// # Errors
    /// Errors if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Config, Error> {
        let contents = match path {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let path = Self::default_path()?;
                match read_to_string(&path)? {
                    Some(contents) => contents,
                    None => {
                        // the embedded default is used even if it cannot be
                        // written
                        if let Err(err) = write_default(&path) {
                            warn!(
                                event = "default config not written",
                                path = %path.display(),
                                %err,
                            );
                        }

                        DEFAULT_CONFIG.to_string()
                    }
                }
            }
        };

        Self::from_toml(&contents)
    }

    /// Parse and validate a configuration.
    ///
    /// # Errors
    /// Errors if the content is not valid TOML or fails validation.
    pub fn from_toml(contents: &str) -> Result<Config, Error> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value that would otherwise only fail once watching.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] for bad values and
    /// [`Error::InvalidEncoding`] for addresses that cannot be decoded.
    pub fn validate(&self) -> Result<(), Error> {
        if self.poll_interval == 0 {
            return Err(Error::Configuration(
                "poll_interval must be greater than zero".into(),
            ));
        }
        if self.request_timeout == 0 {
            return Err(Error::Configuration(
                "request_timeout must be greater than zero".into(),
            ));
        }
        if self.addresses.is_empty() {
            return Err(Error::Configuration("no address to watch".into()));
        }
        if self.tokens.is_empty() {
            return Err(Error::Configuration("no token to watch".into()));
        }

        for addr in &self.addresses {
            let (prefix, _) = address::decode_with_prefix(addr)
                .map_err(|_| Error::InvalidEncoding(addr.clone()))?;
            if prefix != self.prefix {
                return Err(Error::Configuration(format!(
                    "address {addr} is not a {} address",
                    self.prefix
                )));
            }
        }

        self.tokens().map(|_| ())
    }

    /// The configured tokens.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if a token is malformed.
    pub fn tokens(&self) -> Result<Vec<Token>, Error> {
        self.tokens
            .iter()
            .map(|t| Token::new(&t.symbol, &t.name, &t.tail, t.scale))
            .collect()
    }

    /// Time between two poll cycles
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Time before a request is abandoned
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
