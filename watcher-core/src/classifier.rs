// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Classification of fetched coins into deposits.
//!
//! Every watched (address, token) pair keeps the set of coin identities it
//! has already seen. The first batch only establishes that baseline; later
//! batches report coins that are new and were not created by another coin of
//! the same batch.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::{Bytes32, Coin};

/// Whether the baseline of a tracked pair has been established.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// No batch has been observed yet
    #[default]
    Uninitialized,
    /// The first batch has been recorded as baseline
    Initialized,
}

/// A coin reported as an incoming deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCoin {
    /// Identity of the coin
    pub coin_id: Bytes32,
    /// The coin itself
    pub coin: Coin,
}

/// Coins seen so far for one watched pair.
///
/// The set only grows for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct TrackedCoins {
    state: TrackState,
    seen: HashSet<Bytes32>,
}

impl TrackedCoins {
    /// Create an empty, uninitialized tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a batch of coins fetched for this pair and return the ones
    /// that are deposits.
    ///
    /// The first batch ever observed yields nothing, whatever its size. A
    /// coin whose parent is another coin of the same batch is the wallet
    /// shuffling its own funds and is not reported either.
    pub fn observe(&mut self, batch: &[Coin]) -> Vec<NewCoin> {
        let ids: Vec<Bytes32> = batch.iter().map(Coin::coin_id).collect();

        match self.state {
            TrackState::Uninitialized => {
                self.seen.extend(ids);
                self.state = TrackState::Initialized;
                vec![]
            }
            TrackState::Initialized => {
                let own: HashSet<&Bytes32> = ids.iter().collect();
                let mut deposits = vec![];

                for (coin, coin_id) in batch.iter().zip(&ids) {
                    if !self.seen.insert(*coin_id) {
                        continue;
                    }
                    if own.contains(&coin.parent_coin_info) {
                        continue;
                    }
                    deposits.push(NewCoin {
                        coin_id: *coin_id,
                        coin: *coin,
                    });
                }

                deposits
            }
        }
    }

    /// Current state of the tracker.
    #[must_use]
    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Whether the coin identity has already been seen.
    #[must_use]
    pub fn contains(&self, coin_id: &Bytes32) -> bool {
        self.seen.contains(coin_id)
    }

    /// Number of coin identities seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no coin has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// The tracked coins of every watched pair, keyed by `K`.
#[derive(Debug, Clone)]
pub struct Classifier<K> {
    tracked: HashMap<K, TrackedCoins>,
}

impl<K> Default for Classifier<K> {
    fn default() -> Self {
        Self {
            tracked: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> Classifier<K> {
    /// Create a classifier with no tracked pair.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `batch` for the pair `key`, starting to track it if needed.
    ///
    /// See [`TrackedCoins::observe`].
    pub fn observe(&mut self, key: K, batch: &[Coin]) -> Vec<NewCoin> {
        self.tracked.entry(key).or_default().observe(batch)
    }

    /// The tracked coins of `key`, if any batch was observed for it.
    #[must_use]
    pub fn tracked(&self, key: &K) -> Option<&TrackedCoins> {
        self.tracked.get(key)
    }

    /// State of the pair `key`.
    #[must_use]
    pub fn state(&self, key: &K) -> TrackState {
        self.tracked
            .get(key)
            .map(TrackedCoins::state)
            .unwrap_or_default()
    }
}
