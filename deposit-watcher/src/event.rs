// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Deposit events handed to notifiers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use watcher_core::NewCoin;

use crate::Token;

/// An incoming deposit of a watched token to a watched address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositEvent {
    /// Ticker of the deposited token
    pub token_symbol: String,
    /// Name of the deposited token
    pub token_name: String,
    /// Address that received the deposit
    pub address: String,
    /// Amount in base units
    pub amount: u64,
    /// Amount in display units, formatted exactly
    pub display_amount: String,
    /// Amount in display units, approximated
    pub display_value: f64,
    /// Hex encoded identity of the deposited coin
    pub coin_id: String,
    /// When the deposit was detected
    pub timestamp: DateTime<Utc>,
}

impl DepositEvent {
    /// Build the event for `coin`, a deposit of `token` to `address`.
    #[must_use]
    pub fn new(token: &Token, address: &str, coin: &NewCoin) -> Self {
        let amount = coin.coin.amount;

        Self {
            token_symbol: token.symbol.clone(),
            token_name: token.name.clone(),
            address: address.to_string(),
            amount,
            display_amount: token.display_amount(amount).to_string(),
            display_value: token.display_amount(amount).as_f64(),
            coin_id: hex::encode(coin.coin_id),
            timestamp: Utc::now(),
        }
    }
}
