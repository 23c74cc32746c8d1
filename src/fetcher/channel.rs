use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;
use crate::domain::Snapshot;
use crate::fetcher::Fetcher;
use crate::monitor::VideoSource;
use crate::normalizer::{extract_video_ids, parse_mapping};

pub const FEED_BASE_URL: &str = "https://www.youtube.com/feeds/videos.xml";

/// Feed URL of `channel_id`. The id is interpolated as-is.
pub fn channel_feed_url(base_url: &str, channel_id: &str) -> String {
    format!("{}?channel_id={}", base_url, channel_id)
}

/// Fetches channel feeds and reads video ids out of them.
pub struct FeedClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: String,
}

impl FeedClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_base_url(fetcher, FEED_BASE_URL)
    }

    pub fn with_base_url(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn feed_url(&self, channel_id: &str) -> String {
        channel_feed_url(&self.base_url, channel_id)
    }

    /// Download the channel feed and parse it into a nested mapping.
    pub async fn fetch_channel_feed(&self, channel_id: &str) -> Result<Value> {
        let body = self.fetcher.fetch(&self.feed_url(channel_id)).await?;
        parse_mapping(&body)
    }

    /// Ids of the videos currently listed in the channel feed.
    pub async fn ids_for_channel(&self, channel_id: &str) -> Result<Snapshot> {
        let feed = self.fetch_channel_feed(channel_id).await?;
        let ids = extract_video_ids(&feed)?;
        tracing::debug!("Feed of {} lists {} videos", channel_id, ids.len());
        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl VideoSource for FeedClient {
    async fn ids_for_channel(&self, channel_id: &str) -> Result<Snapshot> {
        FeedClient::ids_for_channel(self, channel_id).await
    }
}
