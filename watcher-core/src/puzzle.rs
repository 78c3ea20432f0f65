// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Derivation of token puzzle hashes.
//!
//! Token coins owned by a wallet are locked by the token module curried with
//! the module hash, the token tail and the wallet's own puzzle hash. The
//! resulting tree hash is what the ledger indexes those coins by.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::tree_hash::{QUOTE_HASH, atom_hash, curry_tree_hash, pair_hash};
use crate::{Bytes32, Error, address, bytes32_from_hex};

/// Tree hash of the CAT v2 token module.
pub const CAT_MOD_HASH: Bytes32 = [
    0x37, 0xbe, 0xf3, 0x60, 0xee, 0x85, 0x81, 0x33, 0xb6, 0x9d, 0x59, 0x5a,
    0x90, 0x6d, 0xc4, 0x5d, 0x01, 0xaf, 0x50, 0x37, 0x9d, 0xad, 0x51, 0x5e,
    0xb9, 0x51, 0x8a, 0xbb, 0x7c, 0x1d, 0x2a, 0x7a,
];

/// Identifier of a token type, the hash of its tail program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TailId(Bytes32);

impl TailId {
    /// Wrap raw tail bytes.
    #[must_use]
    pub const fn new(bytes: Bytes32) -> Self {
        Self(bytes)
    }

    /// The raw tail bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &Bytes32 {
        &self.0
    }
}

impl FromStr for TailId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        bytes32_from_hex(s).map(Self).map_err(|e| match e {
            Error::Configuration(reason) => {
                Error::Configuration(format!("invalid token tail: {reason}"))
            }
            e => e,
        })
    }
}

impl fmt::Display for TailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TailId({self})")
    }
}

/// Compute the puzzle hash of the token coins identified by `tail` owned by
/// the wallet whose inner puzzle hash is `inner`.
///
/// The module hash and the tail are curried as atoms, while `inner` is
/// already a tree hash and is curried as is.
#[must_use]
pub fn cat_puzzle_hash(
    mod_hash: &Bytes32,
    tail: &TailId,
    inner: &Bytes32,
) -> Bytes32 {
    let quoted_mod = pair_hash(&QUOTE_HASH, mod_hash);
    let args = [atom_hash(mod_hash), atom_hash(tail.as_bytes()), *inner];

    curry_tree_hash(&quoted_mod, &args)
}

/// Derives token puzzle hashes and remembers them.
///
/// Entries are keyed by inner identity and tail, so a different address or
/// token never reuses a stale value.
#[derive(Debug, Clone)]
pub struct Deriver {
    mod_hash: Bytes32,
    cache: HashMap<(Bytes32, TailId), Bytes32>,
}

impl Default for Deriver {
    fn default() -> Self {
        Self::new(CAT_MOD_HASH)
    }
}

impl Deriver {
    /// Create a deriver for the token standard whose module hash is
    /// `mod_hash`.
    #[must_use]
    pub fn new(mod_hash: Bytes32) -> Self {
        Self {
            mod_hash,
            cache: HashMap::new(),
        }
    }

    /// The module hash this deriver curries into.
    #[must_use]
    pub fn mod_hash(&self) -> &Bytes32 {
        &self.mod_hash
    }

    /// Puzzle hash of the `tail` coins owned by `inner`.
    pub fn puzzle_hash(&mut self, inner: &Bytes32, tail: &TailId) -> Bytes32 {
        let mod_hash = self.mod_hash;
        *self
            .cache
            .entry((*inner, *tail))
            .or_insert_with(|| cat_puzzle_hash(&mod_hash, tail, inner))
    }

    /// Decode `address` and derive the puzzle hash of its `tail` coins.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEncoding`] if the address cannot be decoded.
    pub fn derive(
        &mut self,
        address: &str,
        tail: &TailId,
    ) -> Result<Bytes32, Error> {
        let inner = address::decode(address)?;
        Ok(self.puzzle_hash(&inner, tail))
    }

    /// Number of cached puzzle hashes.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
