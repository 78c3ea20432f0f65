// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # Deposit Watcher
//!
//! The `deposit_watcher` library polls a coin-record source for the token
//! coins of a set of wallet addresses and reports the ones that are incoming
//! deposits.
//!
//! Clients build a [`Watcher`] from a [`Config`], a [`CoinRecordSource`] and
//! a [`Notifier`], then either run it forever or drive single cycles.

#![deny(missing_docs)]

mod error;

pub mod config;
pub mod event;
pub mod notify;
pub mod source;
pub mod token;
pub mod watcher;

pub use config::Config;
pub use error::Error;
pub use event::DepositEvent;
pub use notify::{Notifier, StdoutNotifier, WebhookNotifier};
pub use source::{CoinRecord, CoinRecordSource, HttpCoinSource};
pub use token::Token;
pub use watcher::{CycleReport, Watcher};
