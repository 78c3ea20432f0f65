// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

/// Errors returned by the watcher core.
///
/// Both variants describe bad startup input: no valid puzzle hash can be
/// derived from it, so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed address or checksum mismatch
    #[error("Invalid address encoding")]
    InvalidEncoding,
    /// Malformed token identifier or other bad configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),
}
