// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use deposit_watcher_core::{Coin, TrackState, TrackedCoins};

const PUZZLE_HASH: [u8; 32] = [0x42; 32];

/// Generate a coin locked by the watched puzzle hash
fn gen_coin(parent: u8, amount: u64) -> Coin {
    Coin::new([parent; 32], PUZZLE_HASH, amount)
}

/// Generate a coin created by spending `parent`
fn child_of(parent: &Coin, amount: u64) -> Coin {
    Coin::new(parent.coin_id(), PUZZLE_HASH, amount)
}

/// Tracker whose baseline is already established with `baseline`
fn initialized(baseline: &[Coin]) -> TrackedCoins {
    let mut tracked = TrackedCoins::new();
    assert!(tracked.observe(baseline).is_empty());
    tracked
}

#[test]
fn first_batch_is_baseline() {
    let batch: Vec<Coin> = (1..=5).map(|i| gen_coin(i, 100)).collect();
    let mut tracked = TrackedCoins::new();

    assert!(tracked.observe(&batch).is_empty());
    assert_eq!(tracked.state(), TrackState::Initialized);
    assert_eq!(tracked.len(), batch.len());
    for coin in &batch {
        assert!(tracked.contains(&coin.coin_id()));
    }
}

#[test]
fn same_batch_twice_is_idempotent() {
    let mut tracked = initialized(&[gen_coin(1, 100)]);
    let batch = [gen_coin(1, 100), gen_coin(2, 250), gen_coin(3, 7)];

    assert_eq!(tracked.observe(&batch).len(), 2);
    assert!(tracked.observe(&batch).is_empty());
    assert_eq!(tracked.len(), 3);
}

#[test]
fn deposit_reports_identity_and_amount() {
    let mut tracked = initialized(&[]);
    let coin = gen_coin(9, 1_234_000);

    let deposits = tracked.observe(&[coin]);

    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].coin_id, coin.coin_id());
    assert_eq!(deposits[0].coin.amount, 1_234_000);
}

#[test]
fn consolidation_in_same_batch_is_suppressed() {
    let mut tracked = initialized(&[]);
    let a = gen_coin(1, 1000);
    let b = child_of(&a, 400);

    let deposits = tracked.observe(&[a, b]);

    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].coin_id, a.coin_id());
    // suppressed coins are still tracked
    assert!(tracked.contains(&b.coin_id()));
}

#[test]
fn change_of_known_coin_is_suppressed() {
    let a = gen_coin(1, 1000);
    let mut tracked = initialized(&[a]);
    let change = child_of(&a, 900);

    assert!(tracked.observe(&[a, change]).is_empty());
    assert!(tracked.contains(&change.coin_id()));
}

#[test]
fn parent_outside_batch_is_a_deposit() {
    // the parent was tracked in an earlier cycle but is no longer listed
    let a = gen_coin(1, 1000);
    let mut tracked = initialized(&[a]);
    let child = child_of(&a, 900);

    let deposits = tracked.observe(&[child]);

    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].coin_id, child.coin_id());
}

#[test]
fn zero_and_large_amounts_are_distinct_coins() {
    let mut tracked = initialized(&[]);
    let zero = gen_coin(1, 0);
    let big = gen_coin(1, 256);

    assert_eq!(tracked.observe(&[zero, big]).len(), 2);
    assert_eq!(tracked.len(), 2);
}
