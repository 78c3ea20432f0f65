// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Sources of coin records.
//!
//! A source answers, for a puzzle hash, with the coin records locked by it.
//! [`HttpCoinSource`] queries a full node style RPC endpoint such as the one
//! exposed by coinset.org.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use watcher_core::{Bytes32, Coin, bytes32_from_hex};

use crate::Error;

/// RPC method listing the coins of a puzzle hash
const COIN_RECORDS_METHOD: &str = "get_coin_records_by_puzzle_hash";

/// A coin as listed by the source, with its ledger metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoinRecord {
    /// The coin itself
    #[serde(deserialize_with = "deserialize_coin")]
    pub coin: Coin,
    /// Whether the coin has been spent
    #[serde(default)]
    pub spent: bool,
    /// Height of the block that created the coin
    #[serde(default)]
    pub confirmed_block_index: u32,
    /// Height of the block that spent the coin, zero if unspent
    #[serde(default)]
    pub spent_block_index: u32,
    /// Whether the coin is a farming reward
    #[serde(default)]
    pub coinbase: bool,
    /// Timestamp of the block that created the coin
    #[serde(default)]
    pub timestamp: u64,
}

/// Something able to list the coin records of a puzzle hash.
#[async_trait]
pub trait CoinRecordSource: Send + Sync {
    /// Fetch the coin records locked by `puzzle_hash`.
    ///
    /// # Errors
    /// Returns [`Error::SourceUnavailable`] if the source cannot be reached
    /// and [`Error::PartialData`] if it reports a failure. Neither means the
    /// puzzle hash has no coins.
    async fn coin_records(
        &self,
        puzzle_hash: &Bytes32,
    ) -> Result<Vec<CoinRecord>, Error>;
}

#[derive(Deserialize)]
struct RawCoin {
    parent_coin_info: String,
    puzzle_hash: String,
    amount: u64,
}

fn deserialize_coin<'de, D>(deserializer: D) -> Result<Coin, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawCoin::deserialize(deserializer)?;

    let parent = bytes32_from_hex(&raw.parent_coin_info)
        .map_err(serde::de::Error::custom)?;
    let puzzle_hash =
        bytes32_from_hex(&raw.puzzle_hash).map_err(serde::de::Error::custom)?;

    Ok(Coin::new(parent, puzzle_hash, raw.amount))
}

#[derive(Serialize)]
struct CoinRecordsRequest {
    puzzle_hash: String,
    include_spent_coins: bool,
}

impl CoinRecordsRequest {
    fn new(puzzle_hash: &Bytes32, include_spent_coins: bool) -> Self {
        Self {
            puzzle_hash: format!("0x{}", hex::encode(puzzle_hash)),
            include_spent_coins,
        }
    }
}

#[derive(Deserialize)]
struct CoinRecordsResponse {
    #[serde(default)]
    coin_records: Vec<CoinRecord>,
    #[serde(default)]
    success: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Parse the body of a coin records response.
///
/// # Errors
/// Returns [`Error::PartialData`] if the body does not carry a `success`
/// flag set to `true`, and [`Error::SourceUnavailable`] if it is not a valid
/// response.
pub fn parse_coin_records(body: &[u8]) -> Result<Vec<CoinRecord>, Error> {
    let response: CoinRecordsResponse = serde_json::from_slice(body)
        .map_err(|e| Error::SourceUnavailable(format!("bad response: {e}")))?;

    match response.success {
        Value::Bool(true) => Ok(response.coin_records),
        _ => Err(Error::PartialData(
            response.error.unwrap_or_else(|| "success flag not set".into()),
        )),
    }
}

#[derive(Clone)]
/// Coin record source backed by a full node RPC over HTTP
pub struct HttpCoinSource {
    client: reqwest::Client,
    uri: String,
    include_spent_coins: bool,
}

impl HttpCoinSource {
    /// Create a new HTTP source
    ///
    /// # Errors
    /// This method errors if a TLS backend cannot be initialized, or the
    /// resolver cannot load the system configuration.
    pub fn new<S: Into<String>>(
        uri: S,
        timeout: Duration,
        include_spent_coins: bool,
    ) -> Result<Self, Error> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build();

        match client {
            Ok(client) => Ok(Self {
                uri: uri.into(),
                client,
                include_spent_coins,
            }),
            Err(_) => Err(Error::HttpClient),
        }
    }

    /// Send a request to an RPC method and return the raw body
    ///
    /// # Errors
    /// This method errors if there was an error while sending the request or
    /// if the source answered with a non-success status.
    pub async fn call<T: Serialize + ?Sized>(
        &self,
        method: &str,
        request: &T,
    ) -> Result<Vec<u8>, Error> {
        let uri = self.uri.trim_end_matches('/');

        let response = self
            .client
            .post(format!("{uri}/{method}"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let error = &response.bytes().await?;

            let error = String::from_utf8(error.to_vec())
                .unwrap_or("unparsable error".into());

            let msg = format!("{status}: {error}");

            Err(Error::SourceUnavailable(msg))
        } else {
            Ok(response.bytes().await?.to_vec())
        }
    }
}

#[async_trait]
impl CoinRecordSource for HttpCoinSource {
    async fn coin_records(
        &self,
        puzzle_hash: &Bytes32,
    ) -> Result<Vec<CoinRecord>, Error> {
        let request = CoinRecordsRequest::new(
            puzzle_hash,
            self.include_spent_coins,
        );

        let body = self.call(COIN_RECORDS_METHOD, &request).await?;

        parse_coin_records(&body)
    }
}
