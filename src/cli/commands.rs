use std::time::Duration;

use crate::app::{AppContext, MonitorError, Result};
use crate::cli::Options;
use crate::config::ConfigStore;
use crate::monitor::{Monitor, MonitorReport};

/// Entry point of a run: set up config, then either store it or watch.
pub async fn run(options: &Options, ctx: &AppContext) -> Result<()> {
    let store = &ctx.config_store;

    if !store.exists() {
        println!(
            "Setting up default configuration in {}",
            store.path().display()
        );
        store.ensure_default()?;
    }

    let config = store.load()?;
    let channel = options
        .channel
        .clone()
        .or(config.channel.clone())
        .filter(|channel| !channel.is_empty());
    let check_delay = config.check_delay();

    if options.store_config {
        let channel = channel.ok_or_else(|| missing_channel(store))?;
        return store_config(store, &channel, check_delay);
    }

    let channel = channel.ok_or_else(|| missing_channel(store))?;
    watch(options, ctx, &channel, Duration::from_secs(check_delay)).await?;
    Ok(())
}

pub fn store_config(store: &ConfigStore, channel: &str, check_delay: u64) -> Result<()> {
    store.store(channel, check_delay)?;
    println!("Stored channel {} in {}", channel, store.path().display());
    tracing::debug!("Exiting");
    Ok(())
}

/// Wait for `options.n` new videos on `channel`, then run the exit action.
pub async fn watch(
    options: &Options,
    ctx: &AppContext,
    channel: &str,
    check_delay: Duration,
) -> Result<MonitorReport> {
    let report = Monitor::new(&ctx.feed_client, ctx.clock.as_ref(), channel)
        .threshold(options.n)
        .check_delay(check_delay)
        .run()
        .await?;

    if options.hibernate {
        if let Err(e) = ctx.hibernator.hibernate() {
            tracing::error!("Failed to hibernate: {}", e);
        }
    }

    tracing::warn!("Exiting");
    Ok(report)
}

fn missing_channel(store: &ConfigStore) -> MonitorError {
    MonitorError::MissingChannel(store.path().display().to_string())
}
