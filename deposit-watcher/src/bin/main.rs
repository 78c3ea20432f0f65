// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

mod args;
mod settings;

use clap::Parser;
use tracing::info;

use deposit_watcher::{
    Config, HttpCoinSource, Notifier, StdoutNotifier, Watcher, WebhookNotifier,
};

use crate::args::WatcherArgs;
use crate::settings::{LogFormat, Logging};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = exec().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(logging.env_filter()?)
        .with_writer(std::io::stderr);

    // set the subscriber as global
    match logging.format {
        LogFormat::Json => {
            let subscriber = subscriber.json().flatten_event(true).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Plain => {
            let subscriber = subscriber.with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Coloured => {
            let subscriber = subscriber.finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    };

    Ok(())
}

async fn exec() -> anyhow::Result<()> {
    // parse user args
    let args = WatcherArgs::parse();

    // logging comes first so configuration errors are reported too
    let logging = Logging::args(&args);
    init_logging(&logging)?;

    let config = Config::load(args.config.as_deref())?;
    let config = settings::apply_overrides(config, &args);
    config.validate()?;

    info!(
        event = "configured",
        source = %config.source,
        addresses = config.addresses.len(),
        tokens = config.tokens.len(),
        webhook = ?config.webhook.as_ref().map(settings::redacted),
        %logging,
    );

    let source = HttpCoinSource::new(
        config.source.as_str(),
        config.request_timeout(),
        config.include_spent_coins,
    )?;

    match config.webhook.clone() {
        Some(webhook) => {
            let notifier = WebhookNotifier::new(
                webhook,
                config.explorer.clone(),
                config.request_timeout(),
            )?;
            watch(&config, source, notifier, args.once).await
        }
        None => watch(&config, source, StdoutNotifier, args.once).await,
    }
}

async fn watch<N: Notifier>(
    config: &Config,
    source: HttpCoinSource,
    notifier: N,
    once: bool,
) -> anyhow::Result<()> {
    let mut watcher = Watcher::new(config, source, notifier)?;

    if once {
        let report = watcher.poll_once().await;
        info!(
            event = "cycle done",
            initialized = report.initialized,
            deposits = report.deposits.len(),
            failed = report.failed,
        );
        return Ok(());
    }

    watcher
        .run(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(event = "signal handler failed", %err);
            }
        })
        .await;

    Ok(())
}
