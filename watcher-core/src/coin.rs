// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Coins and their identities.

use sha2::{Digest, Sha256};

use crate::Bytes32;

/// An unspent output of the ledger.
///
/// Coins are immutable: spending one destroys it and creates children whose
/// `parent_coin_info` is the spent coin's [`Coin::coin_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coin {
    /// Identity of the coin this one was created by
    pub parent_coin_info: Bytes32,
    /// Hash of the puzzle locking this coin
    pub puzzle_hash: Bytes32,
    /// Amount in base units
    pub amount: u64,
}

impl Coin {
    /// Create a new coin.
    #[must_use]
    pub const fn new(
        parent_coin_info: Bytes32,
        puzzle_hash: Bytes32,
        amount: u64,
    ) -> Self {
        Self {
            parent_coin_info,
            puzzle_hash,
            amount,
        }
    }

    /// The identity of the coin:
    /// `sha256(parent ‖ puzzle_hash ‖ minimal_signed_be(amount))`.
    ///
    /// Two coins with the same three fields share the same identity.
    #[must_use]
    pub fn coin_id(&self) -> Bytes32 {
        let mut hasher = Sha256::new();
        hasher.update(self.parent_coin_info);
        hasher.update(self.puzzle_hash);
        hasher.update(minimal_signed_be(self.amount));
        hasher.finalize().into()
    }
}

/// Encode `value` as the shortest big-endian two's-complement byte string
/// that reads back as the same non-negative number.
///
/// Zero is the empty string, and a `0x00` byte is prepended whenever the
/// most significant bit of the natural encoding is set.
#[must_use]
pub fn minimal_signed_be(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len());

    let mut out = Vec::with_capacity(bytes.len() - first + 1);
    if bytes.get(first).is_some_and(|&b| b & 0x80 != 0) {
        out.push(0);
    }
    out.extend_from_slice(&bytes[first..]);
    out
}
