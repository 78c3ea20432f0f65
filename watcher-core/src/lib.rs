// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Core functionalities for watching coin-set ledger addresses.
//!
//! The crate turns a bech32m wallet address and a token tail into the puzzle
//! hash the ledger indexes that wallet's token coins by, and tells genuine
//! deposits apart from the wallet reshuffling its own coins.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::pedantic)]

pub mod address;
pub mod classifier;
pub mod coin;
pub mod puzzle;
pub mod tree_hash;

mod error;

pub use classifier::{Classifier, NewCoin, TrackState, TrackedCoins};
pub use coin::Coin;
pub use error::Error;
pub use puzzle::{CAT_MOD_HASH, Deriver, TailId};

/// Size in bytes of every hash and identity handled by the crate.
pub const HASH_SIZE: usize = 32;

/// A 32-byte hash, identity or puzzle hash.
pub type Bytes32 = [u8; HASH_SIZE];

/// Parse a hex string, with or without a `0x` prefix, into [`Bytes32`].
///
/// # Errors
/// Returns [`Error::Configuration`] if the string is not valid hex or does not
/// decode to exactly 32 bytes.
pub fn bytes32_from_hex(s: &str) -> Result<Bytes32, Error> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);

    let bytes = hex::decode(s)
        .map_err(|e| Error::Configuration(format!("invalid hex {s:?}: {e}")))?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        Error::Configuration(format!(
            "expected {HASH_SIZE} bytes, got {}",
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_and_without_prefix() {
        let plain = bytes32_from_hex(&"ab".repeat(32)).unwrap();
        let prefixed = bytes32_from_hex(&format!("0x{}", "ab".repeat(32)))
            .unwrap();

        assert_eq!(plain, [0xab; 32]);
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn hex_wrong_length() {
        assert!(matches!(
            bytes32_from_hex(&"ab".repeat(31)),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            bytes32_from_hex("zz"),
            Err(Error::Configuration(_))
        ));
    }
}
