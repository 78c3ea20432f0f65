// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The poll loop.
//!
//! Every watched (address, token) pair has its puzzle hash derived once at
//! startup. Each cycle fetches the coin records of all pairs concurrently,
//! then feeds them to the classifier one pair at a time and hands the
//! resulting deposits to the notifier. Cycles never overlap.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing::{debug, info, warn};
use watcher_core::{
    Bytes32, Classifier, Coin, Deriver, TailId, TrackState, address,
};

use crate::{
    CoinRecord, CoinRecordSource, Config, DepositEvent, Error, Notifier, Token,
};

/// Classifier key of a watched pair: inner identity and token tail
type PairKey = (Bytes32, TailId);

/// An (address, token) pair being watched
#[derive(Debug, Clone)]
pub struct WatchedPair {
    /// The watched address
    pub address: String,
    /// The watched token
    pub token: Token,
    /// Puzzle hash of the token coins owned by the address
    pub puzzle_hash: Bytes32,
    key: PairKey,
}

/// Outcome of a poll cycle
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Deposits found during the cycle
    pub deposits: Vec<DepositEvent>,
    /// Pairs whose baseline was established during the cycle
    pub initialized: usize,
    /// New coins ignored as consolidations of the wallet's own coins
    pub suppressed: usize,
    /// Pairs skipped because their coins could not be fetched
    pub failed: usize,
}

/// Watches addresses for token deposits
pub struct Watcher<S, N> {
    source: S,
    notifier: N,
    poll_interval: Duration,
    request_timeout: Duration,
    deriver: Deriver,
    classifier: Classifier<PairKey>,
    pairs: Vec<WatchedPair>,
}

impl<S, N> Watcher<S, N>
where
    S: CoinRecordSource,
    N: Notifier,
{
    /// Create a watcher for every address and token of `config`, deriving
    /// their puzzle hashes.
    ///
    /// # Errors
    /// Fails if an address cannot be decoded or a token is malformed. These
    /// errors are fatal: nothing can be watched without the puzzle hash.
    pub fn new(config: &Config, source: S, notifier: N) -> Result<Self, Error> {
        let mut watcher = Self {
            source,
            notifier,
            poll_interval: config.poll_interval(),
            request_timeout: config.request_timeout(),
            deriver: Deriver::default(),
            classifier: Classifier::new(),
            pairs: vec![],
        };

        let tokens = config.tokens()?;
        for addr in &config.addresses {
            for token in &tokens {
                watcher.watch(addr, token.clone())?;
            }
        }

        Ok(watcher)
    }

    /// Start watching deposits of `token` to `addr`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEncoding`] if the address cannot be decoded.
    pub fn watch(&mut self, addr: &str, token: Token) -> Result<(), Error> {
        let inner = address::decode(addr)
            .map_err(|_| Error::InvalidEncoding(addr.to_string()))?;
        let puzzle_hash = self.deriver.puzzle_hash(&inner, &token.tail);

        info!(
            event = "watching",
            address = addr,
            token = %token.symbol,
            tail = %token.tail,
            puzzle_hash = hex::encode(puzzle_hash),
        );

        self.pairs.push(WatchedPair {
            address: addr.to_string(),
            key: (inner, token.tail),
            token,
            puzzle_hash,
        });

        Ok(())
    }

    /// The watched pairs
    pub fn pairs(&self) -> &[WatchedPair] {
        &self.pairs
    }

    /// Baseline state of a watched pair
    pub fn state(&self, pair: &WatchedPair) -> TrackState {
        self.classifier.state(&pair.key)
    }

    /// Run a single poll cycle.
    ///
    /// Fetch failures only skip the affected pair until the next cycle, and
    /// notification failures are logged; neither aborts the cycle.
    pub async fn poll_once(&mut self) -> CycleReport {
        let source = &self.source;
        let request_timeout = self.request_timeout;

        let fetches = self.pairs.iter().map(|pair| async move {
            let fetch = source.coin_records(&pair.puzzle_hash);
            match timeout(request_timeout, fetch).await {
                Ok(result) => result,
                Err(_) => Err(Error::SourceUnavailable(format!(
                    "no answer within {}s",
                    request_timeout.as_secs()
                ))),
            }
        });
        let results = join_all(fetches).await;

        let mut report = CycleReport::default();

        for (pair, result) in self.pairs.iter().zip(results) {
            let records = match result {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        event = "fetch failed",
                        address = %pair.address,
                        token = %pair.token.symbol,
                        %err,
                    );
                    report.failed += 1;
                    continue;
                }
            };

            let coins: Vec<Coin> =
                records.iter().map(|r: &CoinRecord| r.coin).collect();

            let tracked_before = self
                .classifier
                .tracked(&pair.key)
                .map_or(0, |tracked| tracked.len());
            let was_initialized =
                self.classifier.state(&pair.key) == TrackState::Initialized;

            let new_coins = self.classifier.observe(pair.key, &coins);

            if !was_initialized {
                info!(
                    event = "baseline established",
                    address = %pair.address,
                    token = %pair.token.symbol,
                    coins = coins.len(),
                );
                report.initialized += 1;
                continue;
            }

            let tracked_after = self
                .classifier
                .tracked(&pair.key)
                .map_or(0, |tracked| tracked.len());
            let suppressed = tracked_after - tracked_before - new_coins.len();
            if suppressed > 0 {
                debug!(
                    event = "consolidation ignored",
                    address = %pair.address,
                    token = %pair.token.symbol,
                    coins = suppressed,
                );
            }
            report.suppressed += suppressed;

            report.deposits.extend(new_coins.iter().map(|coin| {
                DepositEvent::new(&pair.token, &pair.address, coin)
            }));
        }

        for event in &report.deposits {
            info!(
                event = "deposit",
                token = %event.token_symbol,
                amount = %event.display_amount,
                address = %event.address,
                coin_id = %event.coin_id,
            );
            if let Err(err) = self.notifier.notify(event).await {
                warn!(event = "notification failed", %err);
            }
        }

        report
    }

    /// Poll every interval until `shutdown` completes.
    ///
    /// A cycle is never interrupted and ticks missed while a cycle runs are
    /// skipped, so cycles never overlap.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        info!(
            event = "started",
            pairs = self.pairs.len(),
            interval = self.poll_interval.as_secs(),
        );

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!(event = "stopped");
                    return;
                }
                _ = ticker.tick() => {
                    debug!("Checking for deposits...");
                    let report = self.poll_once().await;
                    debug!(
                        event = "cycle done",
                        deposits = report.deposits.len(),
                        suppressed = report.suppressed,
                        failed = report.failed,
                    );
                }
            }
        }
    }
}
