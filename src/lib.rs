//! # youtube-monitor
//!
//! Waits until a YouTube channel has published a given number of new videos,
//! then exits, optionally hibernating the machine.
//!
//! ## Architecture
//!
//! ```text
//! Config → Fetcher → Normalizer → Monitor → Power
//! ```
//!
//! The monitor takes a baseline of the channel's video ids when it starts and
//! polls the channel's public feed until enough ids outside that baseline
//! show up.
//!
//! ## Quick Start
//!
//! ```bash
//! # Remember the channel to watch
//! youtube-monitor --channel UCxxxxxxxxxxxxxxxxxxxxxx --store-config
//!
//! # Wait for two new videos, then hibernate
//! youtube-monitor -n 2 --hibernate
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct holds the collaborators a run
/// needs: config store, feed client, clock and hibernate capability.
pub mod app;

/// Command-line interface using clap.
///
/// Parses flags into immutable [`Options`](cli::Options) and runs them.
pub mod cli;

/// Config file with the channel to watch and the delay between checks.
///
/// Loads from `~/.config/youtube-monitor/config.toml`.
pub mod config;

/// Video-id snapshots and the set difference against the baseline.
pub mod domain;

/// HTTP fetching of channel feeds.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FeedClient`](fetcher::FeedClient): channel id to video ids
pub mod fetcher;

/// Console and file logging with tracing.
pub mod logging;

/// The poll loop.
pub mod monitor;

/// XML to nested-mapping conversion and video-id extraction.
pub mod normalizer;

/// Hibernating the host.
pub mod power;
