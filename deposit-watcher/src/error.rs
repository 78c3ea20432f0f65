// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io;

use watcher_core::Error as CoreError;

/// Errors returned by this library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed address or checksum mismatch
    #[error("Invalid address encoding: {0}")]
    InvalidEncoding(String),
    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The coin-record source could not be reached or answered with an error
    #[error("Coin record source unavailable: {0}")]
    SourceUnavailable(String),
    /// The coin-record source explicitly reported a failure
    #[error("Coin record source reported a failure: {0}")]
    PartialData(String),
    /// A deposit notification could not be delivered
    #[error("Notification failed: {0}")]
    Notify(String),
    /// Cannot build the HTTP client
    #[error("Cannot create the HTTP client")]
    HttpClient,
    /// The home directory cannot be located
    #[error("OS not supported")]
    OsNotSupported,
    /// Filesystem errors
    #[error(transparent)]
    IO(#[from] io::Error),
    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Configuration file parsing errors
    #[error("Cannot parse the configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<CoreError> for Error {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidEncoding => {
                Self::InvalidEncoding("malformed bech32m string".into())
            }
            CoreError::Configuration(reason) => Self::Configuration(reason),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::SourceUnavailable(e.to_string())
    }
}

impl Error {
    /// Whether the error only affects the current poll cycle and the work
    /// should be retried on the next one.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable(_) | Self::PartialData(_) | Self::Notify(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_convert() {
        let err: Error = CoreError::InvalidEncoding.into();
        assert!(matches!(err, Error::InvalidEncoding(_)));
        assert!(!err.is_transient());

        let err: Error = CoreError::Configuration("bad tail".into()).into();
        assert!(matches!(
            err,
            Error::Configuration(reason) if reason == "bad tail"
        ));
    }

    #[test]
    fn transient_errors() {
        assert!(Error::SourceUnavailable("timeout".into()).is_transient());
        assert!(Error::PartialData("no flag".into()).is_transient());
        assert!(Error::Notify("500".into()).is_transient());
        assert!(!Error::Configuration("zero scale".into()).is_transient());
        assert!(!Error::OsNotSupported.is_transient());
    }
}
