// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Delivery of deposit events.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::{DepositEvent, Error};

/// Something that wants to hear about deposits.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one deposit event.
    ///
    /// # Errors
    /// Returns [`Error::Notify`] if the event could not be delivered.
    async fn notify(&self, event: &DepositEvent) -> Result<(), Error>;
}

/// Notifier printing every deposit as a JSON line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn notify(&self, event: &DepositEvent) -> Result<(), Error> {
        let line = serde_json::to_string(event)?;
        println!("{line}");
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Notifier posting a formatted message to a chat incoming webhook
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook: Url,
    explorer: Option<String>,
}

impl WebhookNotifier {
    /// Create a notifier posting to `webhook`.
    ///
    /// When `explorer` is set, messages link the deposited coin as
    /// `{explorer}{coin_id}`. A delivery not answered within `timeout` fails.
    ///
    /// # Errors
    /// This method errors if the HTTP client cannot be initialized.
    pub fn new(
        webhook: Url,
        explorer: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .map_err(|_| Error::HttpClient)?;

        Ok(Self {
            client,
            webhook,
            explorer,
        })
    }

    /// Render the message announcing `event`.
    #[must_use]
    pub fn message(&self, event: &DepositEvent) -> String {
        let banner = banner(event.display_value);

        let mut lines = vec![];
        if !banner.is_empty() {
            lines.push(banner.clone());
        }
        lines.push(format!("*New {} Deposit!*", event.token_symbol));
        lines.push(format!("• To: `{}`", event.address));
        lines.push(format!(
            "• Amount: *{} {}*",
            event.display_amount, event.token_symbol
        ));
        lines.push(format!("• Token: {}", event.token_name));
        match &self.explorer {
            Some(explorer) => {
                lines.push(format!("• Coin: {explorer}{}", event.coin_id));
            }
            None => lines.push(format!("• Coin: `0x{}`", event.coin_id)),
        }
        if !banner.is_empty() {
            lines.push(banner);
        }

        lines.join("\n")
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &DepositEvent) -> Result<(), Error> {
        let text = self.message(event);

        let response = self
            .client
            .post(self.webhook.clone())
            .json(&WebhookMessage { text: &text })
            .send()
            .await
            .map_err(|e| Error::Notify(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Notify(format!("webhook answered {status}")))
        }
    }
}

/// Emoji banner sized after the deposited amount
fn banner(value: f64) -> String {
    let emoji = match value {
        v if v >= 100_000.0 => "🚨",
        v if v >= 10_000.0 => "🦍",
        v if v >= 1_000.0 => "🐋",
        v if v >= 10.0 => "🐟",
        _ => return String::new(),
    };
    emoji.repeat(5)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn event(display_amount: &str, display_value: f64) -> DepositEvent {
        DepositEvent {
            token_symbol: "wUSDC.b".into(),
            token_name: "Base warp.green USDC".into(),
            address: "xch1test".into(),
            amount: 0,
            display_amount: display_amount.into(),
            display_value,
            coin_id: "ab".repeat(32),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn banners() {
        assert_eq!(banner(1.0), "");
        assert_eq!(banner(10.0), "🐟🐟🐟🐟🐟");
        assert_eq!(banner(1_500.0), "🐋🐋🐋🐋🐋");
        assert_eq!(banner(10_000.0), "🦍🦍🦍🦍🦍");
        assert_eq!(banner(250_000.0), "🚨🚨🚨🚨🚨");
    }

    #[test]
    fn message_layout() {
        let notifier = WebhookNotifier::new(
            "https://hooks.example.com/x".parse().unwrap(),
            Some("https://www.spacescan.io/coin/0x".into()),
            Duration::from_secs(10),
        )
        .unwrap();

        let small = notifier.message(&event("1.5", 1.5));
        assert!(small.starts_with("*New wUSDC.b Deposit!*"));
        assert!(small.contains("• Amount: *1.5 wUSDC.b*"));
        assert!(small.contains(&format!(
            "• Coin: https://www.spacescan.io/coin/0x{}",
            "ab".repeat(32)
        )));

        let big = notifier.message(&event("2000", 2000.0));
        assert!(big.starts_with("🐋🐋🐋🐋🐋\n"));
        assert!(big.ends_with("\n🐋🐋🐋🐋🐋"));
    }

    #[tokio::test]
    async fn unanswered_delivery_times_out() {
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let webhook =
            format!("http://{}/hook", listener.local_addr().unwrap());

        // accept connections and never answer
        let held = tokio::spawn(async move {
            let mut open = vec![];
            while let Ok((stream, _)) = listener.accept().await {
                open.push(stream);
            }
        });

        let notifier = WebhookNotifier::new(
            webhook.parse().unwrap(),
            None,
            Duration::from_millis(500),
        )
        .unwrap();

        let delivery = tokio::time::timeout(
            Duration::from_secs(10),
            notifier.notify(&event("1", 1.0)),
        )
        .await
        .expect("delivery to give up on its own");

        assert!(matches!(delivery, Err(Error::Notify(_))));
        held.abort();
    }
}
